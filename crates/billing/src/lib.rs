//! # Leadgate Billing
//!
//! Plan-based entitlements for Leadgate:
//! - The `PlanTier` / `LeadQuota` model with fixed per-tier ceilings
//! - A `PlanCatalog` mapping billing-provider price ids to paid tiers
//! - The uncached `PlanResolver` that derives an account's current plan
//! - The `AdmissionGate` consulted before every lead write
//!
//! ## Example
//!
//! ```rust,ignore
//! use leadgate_billing::{AdmissionGate, PlanCatalog, PlanResolver};
//!
//! let resolver = PlanResolver::new(PlanCatalog::new("price_starter", "price_pro"), accounts.clone());
//! let gate = AdmissionGate::new(resolver, accounts);
//!
//! if !gate.can_admit_lead("acct_1").await? {
//!     // surface "upgrade required" to the caller
//! }
//! ```

mod admission;
mod plan;
mod resolver;

pub use admission::AdmissionGate;
pub use plan::{LeadQuota, Plan, PlanCatalog, PlanTier};
pub use resolver::PlanResolver;
