//! The canonical envelope delivered to webhook destinations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::WebhookResult;

/// The JSON structure posted to every destination for one event.
///
/// Exactly three top-level keys: `event`, `timestamp`, `data`. The envelope
/// is serialized once per triggering event and the identical bytes go to
/// every destination, so each destination can verify its signature against
/// exactly the body it received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// Event name, e.g. `lead.created`.
    pub event: String,
    /// When the event occurred (UTC, RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,
    /// Event-specific payload.
    pub data: Value,
}

impl Envelope {
    /// Creates an envelope for an event occurring now.
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            timestamp: Utc::now(),
            data,
        }
    }

    /// Serializes the envelope to the bytes placed on the wire.
    pub fn to_bytes(&self) -> WebhookResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
