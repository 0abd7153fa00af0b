//! # Leadgate Memory Adapter
//!
//! An in-memory storage adapter for Leadgate, primarily intended
//! for testing and development purposes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use leadgate_adapter_memory::MemoryAdapter;
//!
//! let adapter = Arc::new(MemoryAdapter::new());
//! adapter.set_subscription("acct_1", state).await;
//! adapter.add_destination(destination).await;
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use leadgate_core::error::{LeadError, LeadResult};
use leadgate_core::traits::{AccountStore, LeadStore};
use leadgate_core::types::{Lead, NewLead, SubscriptionState};
use leadgate_webhooks::{Destination, DestinationRegistry, WebhookResult};

/// In-memory storage for a single entity type.
type Store<T> = Arc<RwLock<HashMap<String, T>>>;

/// In-memory storage adapter for Leadgate.
///
/// This adapter stores all data in memory and is suitable for
/// testing and development. Data is lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    subscriptions: Store<SubscriptionState>,
    leads: Store<Lead>,
    destinations: Store<Destination>,
}

impl MemoryAdapter {
    /// Creates a new in-memory adapter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all stored data.
    pub async fn clear(&self) {
        self.subscriptions.write().await.clear();
        self.leads.write().await.clear();
        self.destinations.write().await.clear();
    }

    /// Sets an account's subscription state.
    pub async fn set_subscription(&self, account_id: impl Into<String>, state: SubscriptionState) {
        self.subscriptions
            .write()
            .await
            .insert(account_id.into(), state);
    }

    /// Registers a webhook destination.
    pub async fn add_destination(&self, destination: Destination) {
        self.destinations
            .write()
            .await
            .insert(destination.id.clone(), destination);
    }

    /// Persists `count` placeholder leads for an account, for seeding quota
    /// scenarios.
    pub async fn seed_leads(&self, account_id: &str, count: u64) {
        let mut leads = self.leads.write().await;
        let base = leads.len() as u64;
        for i in 0..count {
            let offset = base + i;
            let lead = Lead::from_submission(
                account_id,
                NewLead::new("form_seed", format!("seed+{offset}@example.com")),
            );
            leads.insert(lead.id.clone(), lead);
        }
    }

    /// Returns the number of leads stored across all accounts.
    pub async fn lead_count(&self) -> usize {
        self.leads.read().await.len()
    }
}

#[async_trait]
impl AccountStore for MemoryAdapter {
    async fn subscription_state(&self, account_id: &str) -> LeadResult<SubscriptionState> {
        // Unknown accounts have no paid period, which derives to the free tier.
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.get(account_id).cloned().unwrap_or_default())
    }

    async fn count_leads(&self, account_id: &str) -> LeadResult<u64> {
        let leads = self.leads.read().await;
        Ok(leads.values().filter(|l| l.account_id == account_id).count() as u64)
    }
}

#[async_trait]
impl LeadStore for MemoryAdapter {
    async fn create_lead(&self, account_id: &str, fields: NewLead) -> LeadResult<Lead> {
        let lead = Lead::from_submission(account_id, fields);
        let mut leads = self.leads.write().await;
        if leads.contains_key(&lead.id) {
            return Err(LeadError::internal("lead id collision"));
        }
        leads.insert(lead.id.clone(), lead.clone());
        Ok(lead)
    }

    async fn find_by_email(&self, form_id: &str, email: &str) -> LeadResult<Option<Lead>> {
        let leads = self.leads.read().await;
        Ok(leads
            .values()
            .find(|l| l.form_id == form_id && l.email == email)
            .cloned())
    }
}

#[async_trait]
impl DestinationRegistry for MemoryAdapter {
    async fn list_active_destinations(&self, account_id: &str) -> WebhookResult<Vec<Destination>> {
        let destinations = self.destinations.read().await;
        Ok(destinations
            .values()
            .filter(|d| d.account_id == account_id && d.active)
            .cloned()
            .collect())
    }
}
