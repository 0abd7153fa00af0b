//! # Leadgate Core
//!
//! Core types and traits for the Leadgate lead-capture system:
//! - The canonical `Lead` and `SubscriptionState` data types
//! - The `LeadError` taxonomy shared across crates
//! - Storage trait seams (`AccountStore`, `LeadStore`) that adapters implement

pub mod error;
pub mod traits;
pub mod types;

pub use error::{LeadError, LeadResult};
pub use traits::{AccountStore, LeadStore};
pub use types::{Lead, NewLead, SubscriptionState};
