//! Core data types for Leadgate.
//!
//! This module defines the canonical `Lead` struct plus the input and
//! subscription-state shapes the admission and billing layers consume.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LeadError, LeadResult};

/// A captured lead, as persisted by a `LeadStore`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    /// Unique identifier for the lead (typically a UUID)
    pub id: String,

    /// The account that owns this lead
    pub account_id: String,

    /// The form this lead was submitted through
    pub form_id: String,

    /// Submitted email address
    pub email: String,

    /// Optional submitted name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional submitted phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional traffic source (e.g. the referring page)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Arbitrary extra fields captured with the submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Timestamp when the lead was captured
    pub created_at: DateTime<Utc>,
}

impl Lead {
    /// Creates a lead from submitted fields, assigning a fresh id and
    /// capture timestamp.
    pub fn from_submission(account_id: impl Into<String>, fields: NewLead) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            form_id: fields.form_id,
            email: fields.email,
            name: fields.name,
            phone: fields.phone,
            source: fields.source,
            metadata: fields.metadata,
            created_at: Utc::now(),
        }
    }

    /// Returns the subset of fields published to webhook destinations
    /// when this lead is created.
    pub fn summary(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "email": self.email,
            "name": self.name,
            "phone": self.phone,
            "formId": self.form_id,
            "createdAt": self.created_at.to_rfc3339(),
        })
    }
}

/// Fields accepted from a public form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLead {
    /// The form being submitted
    pub form_id: String,

    /// Submitted email address (required)
    pub email: String,

    /// Optional submitted name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional submitted phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Optional traffic source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Arbitrary extra fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl NewLead {
    /// Creates a submission with the required fields.
    pub fn new(form_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            email: email.into(),
            ..Default::default()
        }
    }

    /// Sets the submitted name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the submitted phone number.
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the traffic source.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches extra metadata.
    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Validates the required fields of a public submission.
    pub fn validate(&self) -> LeadResult<()> {
        if self.form_id.is_empty() {
            return Err(LeadError::MissingField {
                field: "form_id".into(),
            });
        }
        if self.email.is_empty() {
            return Err(LeadError::MissingField {
                field: "email".into(),
            });
        }
        if !self.email.contains('@') {
            return Err(LeadError::InvalidEmail);
        }
        Ok(())
    }
}

/// An account's persisted subscription fields, as written by the billing
/// provider's webhook handler.
///
/// Entitlements are always re-derived from this state at evaluation time;
/// nothing in Leadgate caches the resulting tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscriptionState {
    /// The billing provider's price identifier, if the account ever subscribed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,

    /// End of the current paid period, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_period_end: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    /// Creates an active subscription state for the given price.
    pub fn active(price_id: impl Into<String>, period_end: DateTime<Utc>) -> Self {
        Self {
            price_id: Some(price_id.into()),
            current_period_end: Some(period_end),
        }
    }

    /// Returns true if the paid period extends strictly past `now`.
    pub fn period_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.current_period_end.is_some_and(|end| end > now)
    }
}
