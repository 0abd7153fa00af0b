//! Core traits for Leadgate.
//!
//! This module defines the storage seams the admission gate and capture
//! service consume. Adapters (relational, in-memory, ...) implement these;
//! the core never owns persistence itself.

use async_trait::async_trait;

use crate::error::LeadResult;
use crate::types::{Lead, NewLead, SubscriptionState};

/// Read access to an account's billing and usage facts.
///
/// Both reads happen on every public form submission, so implementations
/// should be cheap; the lead count in particular is expected to be a
/// `COUNT(*)` over persisted rows rather than a separately maintained
/// counter.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Returns the account's persisted subscription fields.
    async fn subscription_state(&self, account_id: &str) -> LeadResult<SubscriptionState>;

    /// Returns the number of leads currently persisted for the account.
    async fn count_leads(&self, account_id: &str) -> LeadResult<u64>;
}

/// Persistence for captured leads.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persists a new lead for the account and returns the stored record.
    async fn create_lead(&self, account_id: &str, fields: NewLead) -> LeadResult<Lead>;

    /// Looks up an existing lead by email within a form, for duplicate
    /// suppression.
    async fn find_by_email(&self, form_id: &str, email: &str) -> LeadResult<Option<Lead>>;
}
