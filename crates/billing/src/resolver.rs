//! Uncached plan resolution from persisted subscription state.

use std::sync::Arc;

use chrono::Utc;

use leadgate_core::{AccountStore, LeadResult};

use crate::plan::{Plan, PlanCatalog};

/// Derives an account's current plan from its stored subscription fields.
///
/// The result is never cached: billing-provider webhooks update the stored
/// fields out of band, and a stale entitlement here would either over-admit
/// or lock a paying customer out. Every call re-reads the store and
/// re-evaluates the period against the current time.
#[derive(Clone)]
pub struct PlanResolver {
    catalog: PlanCatalog,
    accounts: Arc<dyn AccountStore>,
}

impl PlanResolver {
    /// Creates a resolver over the given catalog and account store.
    pub fn new(catalog: PlanCatalog, accounts: Arc<dyn AccountStore>) -> Self {
        Self { catalog, accounts }
    }

    /// Resolves the account's plan as of now.
    ///
    /// Fails only when the store itself is unavailable; an unknown price id
    /// or lapsed period resolves to the free plan.
    pub async fn resolve_plan(&self, account_id: &str) -> LeadResult<Plan> {
        let state = self.accounts.subscription_state(account_id).await?;
        Ok(self.catalog.plan_at(&state, Utc::now()))
    }

    /// The catalog this resolver maps price ids through.
    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }
}
