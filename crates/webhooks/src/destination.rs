//! Customer-configured webhook destinations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A webhook destination configured by an account owner.
///
/// Destinations are created through the external CRUD registry; delivery
/// captures a snapshot of the url/secret/active fields at dispatch time, so
/// edits never affect in-flight attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    /// Unique identifier.
    pub id: String,
    /// The account that owns this destination.
    pub account_id: String,
    /// Target URL.
    pub url: String,
    /// Secret for signing payloads. `None` means the owner opted out of
    /// signing and deliveries go out unsigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Event names this destination is subscribed to.
    pub events: HashSet<String>,
    /// Whether this destination receives deliveries.
    pub active: bool,
    /// When the destination was created.
    pub created_at: DateTime<Utc>,
}

impl Destination {
    /// Creates a new destination subscribed to `lead.created`.
    pub fn new(account_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            url: url.into(),
            secret: None,
            events: HashSet::from(["lead.created".to_string()]),
            active: true,
            created_at: Utc::now(),
        }
    }

    /// Sets the signing secret.
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Generates and sets a fresh signing secret.
    pub fn with_generated_secret(mut self) -> Self {
        self.secret = Some(generate_secret());
        self
    }

    /// Replaces the subscribed events.
    pub fn events(mut self, events: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.events = events.into_iter().map(|e| e.into()).collect();
        self
    }

    /// Deactivates the destination.
    pub fn disabled(mut self) -> Self {
        self.active = false;
        self
    }

    /// Checks if this destination should receive an event.
    pub fn should_receive(&self, event_name: &str) -> bool {
        self.active && self.events.contains(event_name)
    }
}

/// Generates a fresh `whsec_`-prefixed signing secret.
pub fn generate_secret() -> String {
    format!("whsec_{}", uuid::Uuid::new_v4().simple())
}
