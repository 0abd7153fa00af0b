//! Destination registry trait.

use async_trait::async_trait;

use crate::destination::Destination;
use crate::error::WebhookResult;

/// Read access to an account's configured webhook destinations.
///
/// The registry is owned by the CRUD layer; the dispatcher only consumes it.
/// Implementations may pre-filter on `active`, but the dispatcher filters
/// again on both activity and event subscription before delivering.
#[async_trait]
pub trait DestinationRegistry: Send + Sync {
    /// Lists the account's active destinations.
    async fn list_active_destinations(&self, account_id: &str) -> WebhookResult<Vec<Destination>>;
}
