//! The lead capture service.

use std::sync::Arc;

use leadgate_billing::AdmissionGate;
use leadgate_core::{LeadResult, LeadStore, NewLead};
use leadgate_webhooks::WebhookDispatcher;

use crate::submission::{RejectReason, Submission};

/// Event name published when a lead is persisted.
pub const LEAD_CREATED_EVENT: &str = "lead.created";

/// Handles public form submissions end to end.
///
/// The service gates every write behind the account's plan, suppresses
/// duplicate emails per form, and fires the `lead.created` webhook event in
/// a detached task so the HTTP response never waits on (or learns about)
/// delivery.
#[derive(Clone)]
pub struct LeadCaptureService {
    gate: AdmissionGate,
    leads: Arc<dyn LeadStore>,
    dispatcher: WebhookDispatcher,
}

impl LeadCaptureService {
    /// Creates the service from its collaborators.
    pub fn new(gate: AdmissionGate, leads: Arc<dyn LeadStore>, dispatcher: WebhookDispatcher) -> Self {
        Self {
            gate,
            leads,
            dispatcher,
        }
    }

    /// Submits a lead for the account.
    ///
    /// Quota denial is returned as a rejected `Submission`, never a generic
    /// failure. Store outages surface as `Err`: admission fails closed and
    /// nothing is written.
    pub async fn submit_lead(&self, account_id: &str, fields: NewLead) -> LeadResult<Submission> {
        fields.validate()?;

        if !self.gate.can_admit_lead(account_id).await? {
            tracing::info!(account_id, "lead rejected: quota exceeded");
            return Ok(Submission::rejected(RejectReason::QuotaExceeded));
        }

        // A resubmitted email keeps the original lead and fires no event.
        if self
            .leads
            .find_by_email(&fields.form_id, &fields.email)
            .await?
            .is_some()
        {
            return Ok(Submission::duplicate());
        }

        let lead = self.leads.create_lead(account_id, fields).await?;

        self.dispatcher
            .dispatch_detached(account_id, LEAD_CREATED_EVENT, lead.summary());

        Ok(Submission::accepted(lead))
    }

    /// The admission gate in use.
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }
}
