//! Plan tiers, lead quotas, and the price-id catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use leadgate_core::SubscriptionState;

/// Lead ceiling for the free tier.
pub const FREE_LEAD_QUOTA: u64 = 100;

/// Lead ceiling for the starter tier.
pub const STARTER_LEAD_QUOTA: u64 = 1_000;

/// An account's entitlement level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanTier {
    /// No active paid subscription.
    Free,
    /// Paid entry tier.
    Starter,
    /// Paid top tier, unlimited leads.
    Pro,
}

impl PlanTier {
    /// Returns the fixed lead quota for this tier.
    pub fn lead_quota(self) -> LeadQuota {
        match self {
            PlanTier::Free => LeadQuota::Limited(FREE_LEAD_QUOTA),
            PlanTier::Starter => LeadQuota::Limited(STARTER_LEAD_QUOTA),
            PlanTier::Pro => LeadQuota::Unlimited,
        }
    }
}

/// The maximum number of leads a plan admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadQuota {
    /// At most this many leads may be persisted.
    Limited(u64),
    /// No ceiling.
    Unlimited,
}

impl LeadQuota {
    /// Returns true if an account holding `current` leads may add one more.
    pub fn allows(self, current: u64) -> bool {
        match self {
            LeadQuota::Limited(ceiling) => current < ceiling,
            LeadQuota::Unlimited => true,
        }
    }

    /// Returns how many leads remain before the ceiling, or `None` when
    /// unlimited.
    pub fn remaining(self, current: u64) -> Option<u64> {
        match self {
            LeadQuota::Limited(ceiling) => Some(ceiling.saturating_sub(current)),
            LeadQuota::Unlimited => None,
        }
    }
}

/// An account's derived entitlement: tier plus its lead quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// The entitlement level.
    pub tier: PlanTier,
    /// The tier's lead ceiling.
    pub lead_quota: LeadQuota,
}

impl Plan {
    /// Creates the plan for a tier.
    pub fn for_tier(tier: PlanTier) -> Self {
        Self {
            tier,
            lead_quota: tier.lead_quota(),
        }
    }

    /// The plan every account falls back to.
    pub fn free() -> Self {
        Self::for_tier(PlanTier::Free)
    }
}

/// Maps billing-provider price identifiers to paid tiers.
///
/// Price ids are injected at construction (they differ per deployment);
/// anything unmatched resolves to the free tier rather than erroring.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    starter_price_id: String,
    pro_price_id: String,
}

impl PlanCatalog {
    /// Creates a catalog from the deployment's configured price ids.
    pub fn new(starter_price_id: impl Into<String>, pro_price_id: impl Into<String>) -> Self {
        Self {
            starter_price_id: starter_price_id.into(),
            pro_price_id: pro_price_id.into(),
        }
    }

    /// Derives the tier for a subscription state at evaluation time.
    ///
    /// A paid tier holds only while the period end is strictly in the future
    /// and the stored price id matches a known paid price. Expired periods and
    /// unknown price ids fall back to `Free`.
    pub fn tier_at(&self, state: &SubscriptionState, now: DateTime<Utc>) -> PlanTier {
        if !state.period_valid_at(now) {
            return PlanTier::Free;
        }

        match state.price_id.as_deref() {
            Some(price) if price == self.pro_price_id => PlanTier::Pro,
            Some(price) if price == self.starter_price_id => PlanTier::Starter,
            _ => PlanTier::Free,
        }
    }

    /// Derives the full plan for a subscription state at evaluation time.
    pub fn plan_at(&self, state: &SubscriptionState, now: DateTime<Utc>) -> Plan {
        Plan::for_tier(self.tier_at(state, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PlanCatalog {
        PlanCatalog::new("price_starter", "price_pro")
    }

    #[test]
    fn test_quota_allows() {
        assert!(LeadQuota::Limited(100).allows(99));
        assert!(!LeadQuota::Limited(100).allows(100));
        assert!(!LeadQuota::Limited(100).allows(150));
        assert!(LeadQuota::Unlimited.allows(u64::MAX));
    }

    #[test]
    fn test_quota_remaining() {
        assert_eq!(LeadQuota::Limited(100).remaining(30), Some(70));
        assert_eq!(LeadQuota::Limited(100).remaining(150), Some(0));
        assert_eq!(LeadQuota::Unlimited.remaining(10_000), None);
    }

    #[test]
    fn test_active_paid_tiers() {
        let now = Utc::now();
        let end = now + chrono::Duration::days(30);

        let pro = SubscriptionState::active("price_pro", end);
        assert_eq!(catalog().tier_at(&pro, now), PlanTier::Pro);

        let starter = SubscriptionState::active("price_starter", end);
        assert_eq!(catalog().tier_at(&starter, now), PlanTier::Starter);
    }

    #[test]
    fn test_expired_period_is_free_regardless_of_price() {
        let now = Utc::now();
        let state = SubscriptionState::active("price_pro", now - chrono::Duration::seconds(1));
        assert_eq!(catalog().tier_at(&state, now), PlanTier::Free);
    }

    #[test]
    fn test_unknown_price_is_free() {
        let now = Utc::now();
        let state = SubscriptionState::active("price_legacy", now + chrono::Duration::days(1));
        assert_eq!(catalog().tier_at(&state, now), PlanTier::Free);
    }

    #[test]
    fn test_no_subscription_is_free() {
        let state = SubscriptionState::default();
        assert_eq!(catalog().tier_at(&state, Utc::now()), PlanTier::Free);
    }

    #[test]
    fn test_period_end_exactly_now_is_free() {
        let now = Utc::now();
        let state = SubscriptionState::active("price_pro", now);
        assert_eq!(catalog().tier_at(&state, now), PlanTier::Free);
    }
}
