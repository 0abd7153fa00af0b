//! Concurrent webhook fan-out.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::destination::Destination;
use crate::envelope::Envelope;
use crate::registry::DestinationRegistry;
use crate::signature::WebhookSigner;

/// Result of one delivery attempt to one destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    /// The destination that was attempted.
    pub destination_id: String,
    /// How the single attempt ended.
    pub status: DeliveryStatus,
    /// When the attempt finished.
    pub completed_at: DateTime<Utc>,
}

/// Terminal state of a delivery attempt. There is no retry edge: each
/// attempt goes straight from pending to one of these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The destination answered with a 2xx status.
    Delivered {
        /// The HTTP status received.
        http_status: u16,
    },
    /// Non-2xx response or transport error.
    Failed {
        /// What went wrong.
        error: String,
    },
}

impl DeliveryOutcome {
    fn delivered(destination_id: impl Into<String>, http_status: u16) -> Self {
        Self {
            destination_id: destination_id.into(),
            status: DeliveryStatus::Delivered { http_status },
            completed_at: Utc::now(),
        }
    }

    fn failed(destination_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            destination_id: destination_id.into(),
            status: DeliveryStatus::Failed {
                error: error.into(),
            },
            completed_at: Utc::now(),
        }
    }

    /// Returns true if the destination acknowledged the delivery.
    pub fn is_success(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered { .. })
    }
}

/// Dispatcher configuration.
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Per-attempt timeout. Stalled endpoints must not pin background tasks.
    pub timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

impl DispatcherConfig {
    /// Creates a new configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Delivers events to an account's subscribed destinations.
///
/// Every qualifying destination gets exactly one concurrent attempt with the
/// identical envelope bytes. Attempts are isolated: one destination failing,
/// stalling, or misbehaving never affects another, and no outcome ever
/// propagates back to the business operation that triggered the event.
#[derive(Clone)]
pub struct WebhookDispatcher {
    registry: Arc<dyn DestinationRegistry>,
    config: DispatcherConfig,
    client: reqwest::Client,
}

impl WebhookDispatcher {
    /// Creates a dispatcher with the default configuration.
    pub fn new(registry: Arc<dyn DestinationRegistry>) -> Self {
        Self::with_config(registry, DispatcherConfig::default())
    }

    /// Creates a dispatcher with a custom configuration.
    pub fn with_config(registry: Arc<dyn DestinationRegistry>, config: DispatcherConfig) -> Self {
        Self {
            registry,
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Delivers an event to every active destination subscribed to it and
    /// collects all outcomes.
    ///
    /// Delivery is best-effort: a registry failure is logged and yields zero
    /// outcomes rather than an error, since the triggering operation has
    /// already committed.
    pub async fn dispatch(
        &self,
        account_id: &str,
        event_name: &str,
        data: Value,
    ) -> Vec<DeliveryOutcome> {
        let destinations = match self.registry.list_active_destinations(account_id).await {
            Ok(destinations) => destinations,
            Err(e) => {
                tracing::warn!(account_id, event_name, "destination lookup failed: {}", e);
                return Vec::new();
            }
        };

        let targets: Vec<Destination> = destinations
            .into_iter()
            .filter(|d| d.should_receive(event_name))
            .collect();

        if targets.is_empty() {
            return Vec::new();
        }

        let envelope = Envelope::new(event_name, data);
        // Serialize exactly once; every destination signs and receives these bytes.
        let body = match envelope.to_bytes() {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(account_id, event_name, "envelope serialization failed: {}", e);
                return Vec::new();
            }
        };

        let mut handles = Vec::with_capacity(targets.len());
        for destination in targets {
            let client = self.client.clone();
            let body = body.clone();
            let timeout = self.config.timeout;
            let destination_id = destination.id.clone();

            let handle =
                tokio::spawn(async move { deliver_once(client, destination, body, timeout).await });
            handles.push((destination_id, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (destination_id, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => outcomes.push(DeliveryOutcome::failed(
                    destination_id,
                    format!("delivery task aborted: {e}"),
                )),
            }
        }

        outcomes
    }

    /// Dispatches in a detached task the caller never joins.
    ///
    /// The triggering request returns immediately; outcomes are reported to
    /// the tracing sink instead of the caller.
    pub fn dispatch_detached(&self, account_id: &str, event_name: &str, data: Value) {
        let dispatcher = self.clone();
        let account_id = account_id.to_string();
        let event_name = event_name.to_string();

        tokio::spawn(async move {
            let outcomes = dispatcher.dispatch(&account_id, &event_name, data).await;
            for outcome in &outcomes {
                match &outcome.status {
                    DeliveryStatus::Delivered { http_status } => {
                        tracing::debug!(
                            %account_id,
                            %event_name,
                            destination_id = %outcome.destination_id,
                            http_status,
                            "webhook delivered"
                        );
                    }
                    DeliveryStatus::Failed { error } => {
                        tracing::warn!(
                            %account_id,
                            %event_name,
                            destination_id = %outcome.destination_id,
                            "webhook delivery failed: {}",
                            error
                        );
                    }
                }
            }
        });
    }

    /// The configuration in use.
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }
}

/// Makes the single delivery attempt for one destination.
async fn deliver_once(
    client: reqwest::Client,
    destination: Destination,
    body: Vec<u8>,
    timeout: Duration,
) -> DeliveryOutcome {
    let mut request = client
        .post(&destination.url)
        .header("Content-Type", "application/json")
        .timeout(timeout);

    // No configured secret means intentional unsigned delivery.
    if let Some(secret) = &destination.secret {
        let signature = WebhookSigner::new(secret).sign(&body);
        request = request.header("X-Signature", signature);
    }

    match request.body(body).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if (200..300).contains(&status) {
                DeliveryOutcome::delivered(destination.id, status)
            } else {
                DeliveryOutcome::failed(destination.id, format!("HTTP {status}"))
            }
        }
        Err(e) => DeliveryOutcome::failed(destination.id, e.to_string()),
    }
}
