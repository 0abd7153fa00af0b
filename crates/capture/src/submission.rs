//! Submission results returned to the public form endpoint.

use serde::{Deserialize, Serialize};

use leadgate_core::Lead;

/// Why a submission was not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The account's plan admits no more leads; the owner must upgrade.
    QuotaExceeded,
}

/// Outcome of a public lead submission.
///
/// Quota denial is a normal response shape here, not an error: the submitter
/// sees `accepted: false` with a distinguishable reason while hard failures
/// (store outages) surface as `LeadError`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Whether the submission was accepted.
    pub accepted: bool,

    /// Present only when the submission was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectReason>,

    /// True when an identical email already existed for the form; the
    /// original lead is kept and no event fires.
    #[serde(default)]
    pub duplicate: bool,

    /// The persisted lead, when one was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead: Option<Lead>,
}

impl Submission {
    /// An accepted submission that persisted a new lead.
    pub fn accepted(lead: Lead) -> Self {
        Self {
            accepted: true,
            reason: None,
            duplicate: false,
            lead: Some(lead),
        }
    }

    /// An accepted submission that matched an existing lead.
    pub fn duplicate() -> Self {
        Self {
            accepted: true,
            reason: None,
            duplicate: true,
            lead: None,
        }
    }

    /// A rejected submission.
    pub fn rejected(reason: RejectReason) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
            duplicate: false,
            lead: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reason_wire_format() {
        let submission = Submission::rejected(RejectReason::QuotaExceeded);
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["accepted"], false);
        assert_eq!(json["reason"], "quota_exceeded");
    }

    #[test]
    fn test_accepted_omits_reason() {
        let json = serde_json::to_value(Submission::duplicate()).unwrap();
        assert_eq!(json["accepted"], true);
        assert_eq!(json["duplicate"], true);
        assert!(json.get("reason").is_none());
    }
}
