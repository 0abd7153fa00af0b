//! The admission gate consulted before every lead write.

use std::sync::Arc;

use leadgate_core::{AccountStore, LeadResult};

use crate::resolver::PlanResolver;

/// Decides whether an account may persist one more lead.
///
/// The gate is a pure decision over current state: it resolves the plan,
/// counts persisted leads, and compares against the quota. It mutates
/// nothing itself. The count-then-write sequence is not atomic, so
/// concurrent submissions for one account can each observe the
/// pre-increment count and overshoot the ceiling by the number of in-flight
/// requests. The count is derived from persisted rows, so the overshoot is
/// temporary over-admission, never corruption. Stores that need exactness
/// can serialize admission behind a conditional insert.
#[derive(Clone)]
pub struct AdmissionGate {
    resolver: PlanResolver,
    accounts: Arc<dyn AccountStore>,
}

impl AdmissionGate {
    /// Creates a gate over the given resolver and account store.
    pub fn new(resolver: PlanResolver, accounts: Arc<dyn AccountStore>) -> Self {
        Self { resolver, accounts }
    }

    /// Returns true if the account may persist one more lead.
    ///
    /// A store failure propagates as an error: admission fails closed, the
    /// caller must not write the lead.
    pub async fn can_admit_lead(&self, account_id: &str) -> LeadResult<bool> {
        let plan = self.resolver.resolve_plan(account_id).await?;
        let count = self.accounts.count_leads(account_id).await?;
        Ok(plan.lead_quota.allows(count))
    }

    /// Returns how many more leads the account may persist, or `None` when
    /// the plan is unlimited.
    pub async fn leads_remaining(&self, account_id: &str) -> LeadResult<Option<u64>> {
        let plan = self.resolver.resolve_plan(account_id).await?;
        let count = self.accounts.count_leads(account_id).await?;
        Ok(plan.lead_quota.remaining(count))
    }

    /// The resolver backing this gate.
    pub fn resolver(&self) -> &PlanResolver {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{FREE_LEAD_QUOTA, PlanCatalog};
    use chrono::Utc;
    use leadgate_adapter_memory::MemoryAdapter;
    use leadgate_core::SubscriptionState;

    fn gate(adapter: Arc<MemoryAdapter>) -> AdmissionGate {
        let resolver = PlanResolver::new(
            PlanCatalog::new("price_starter", "price_pro"),
            adapter.clone(),
        );
        AdmissionGate::new(resolver, adapter)
    }

    #[tokio::test]
    async fn test_free_tier_boundary() {
        let adapter = Arc::new(MemoryAdapter::new());
        let gate = gate(adapter.clone());

        adapter.seed_leads("acct_1", FREE_LEAD_QUOTA - 1).await;
        assert!(gate.can_admit_lead("acct_1").await.unwrap());

        adapter.seed_leads("acct_1", 1).await;
        assert!(!gate.can_admit_lead("acct_1").await.unwrap());
    }

    #[tokio::test]
    async fn test_pro_tier_is_unlimited() {
        let adapter = Arc::new(MemoryAdapter::new());
        adapter
            .set_subscription(
                "acct_1",
                SubscriptionState::active("price_pro", Utc::now() + chrono::Duration::days(30)),
            )
            .await;
        adapter.seed_leads("acct_1", 10_000).await;

        let gate = gate(adapter);
        assert!(gate.can_admit_lead("acct_1").await.unwrap());
        assert_eq!(gate.leads_remaining("acct_1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_leads_remaining_floors_at_zero() {
        let adapter = Arc::new(MemoryAdapter::new());
        adapter.seed_leads("acct_1", FREE_LEAD_QUOTA + 5).await;

        let gate = gate(adapter);
        assert_eq!(gate.leads_remaining("acct_1").await.unwrap(), Some(0));
    }
}
