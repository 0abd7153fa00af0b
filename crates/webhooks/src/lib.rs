//! # Leadgate Webhooks
//!
//! Webhook subsystem for Leadgate providing:
//! - Customer-configured destinations with event subscriptions
//! - A canonical, serialize-once event envelope
//! - HMAC-SHA256 payload signing
//! - Concurrent, single-attempt, per-destination-isolated delivery
//!
//! ## Example
//!
//! ```rust,ignore
//! use leadgate_webhooks::{WebhookDispatcher, DispatcherConfig};
//!
//! let dispatcher = WebhookDispatcher::new(registry);
//!
//! // Fire-and-forget relative to the triggering request:
//! dispatcher.dispatch_detached("acct_1", "lead.created", summary);
//! ```

mod destination;
#[cfg(feature = "http-client")]
mod dispatcher;
mod envelope;
mod error;
mod registry;
mod signature;

pub use destination::Destination;
#[cfg(feature = "http-client")]
pub use dispatcher::{DeliveryOutcome, DeliveryStatus, DispatcherConfig, WebhookDispatcher};
pub use envelope::Envelope;
pub use error::{WebhookError, WebhookResult};
pub use registry::DestinationRegistry;
pub use signature::WebhookSigner;
