//! Bulk-print dispatch of case evidence to the DWP.
//!
//! A case event passes the subscription rule, the orchestrator decides whether the
//! case is posted and tries to print it, and the recorder writes exactly one case
//! event describing what happened.

pub mod constants;
pub mod domain;
pub(crate) mod eligibility;
pub mod gateway;
pub(crate) mod orchestrator;
pub mod outcome;
pub mod recorder;
pub mod router;
pub mod selector;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Appeal, CaseEvent, CaseId, CaseSnapshot, CorrelationId, Credentials, DocumentDetails,
    DocumentLink, DocumentTemplate, EventKind, EvidenceDocument, PrintBundle, PrintItem,
    PrintMetadata,
};
pub use eligibility::{handles_event, resend_bypasses_translation, EligibilityGate};
pub use gateway::{
    CaseChanges, CaseRecordStore, CaseUpdate, CaseUpdateEvent, Collaborator, ContentStore,
    DocumentGenerator, GatewayError, Gateways, IdentityProvider, PrintProvider, TemplateResolver,
};
pub use orchestrator::PrintOrchestrator;
pub use outcome::{DispatchFailure, DispatchOutcome, FailureReason};
pub use recorder::{OutcomeRecorder, RecordError};
pub use router::dispatch_router;
pub use service::{BulkPrintDispatchService, DispatchReport, DispatchServiceError};
