//! # Leadgate Capture
//!
//! The public lead-submission path: validate the submitted fields, consult
//! the admission gate, persist the lead, and notify the account's webhook
//! destinations without blocking the response.
//!
//! ## Example
//!
//! ```rust,ignore
//! use leadgate_capture::LeadCaptureService;
//!
//! let service = LeadCaptureService::new(gate, leads, dispatcher);
//! let submission = service.submit_lead("acct_1", fields).await?;
//! if !submission.accepted {
//!     // reason carries "quota_exceeded"
//! }
//! ```

mod service;
mod submission;

pub use service::{LEAD_CREATED_EVENT, LeadCaptureService};
pub use submission::{RejectReason, Submission};
