use serde::{Deserialize, Serialize};

use super::constants::INTERNAL_ERROR_DESCRIPTION;
use super::domain::{CaseId, CorrelationId};
use super::gateway::{Collaborator, GatewayError};

/// Result of one pipeline run; drives exactly one case update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Dispatched {
        correlation_id: CorrelationId,
        description: String,
    },
    NotEligible {
        description: String,
    },
    Failed {
        reason: FailureReason,
        description: String,
    },
}

impl DispatchOutcome {
    pub fn description(&self) -> &str {
        match self {
            DispatchOutcome::Dispatched { description, .. }
            | DispatchOutcome::NotEligible { description }
            | DispatchOutcome::Failed { description, .. } => description,
        }
    }

    /// Dispatched and not-eligible both move the case on to "sent to DWP".
    pub fn is_sent(&self) -> bool {
        !matches!(self, DispatchOutcome::Failed { .. })
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        match self {
            DispatchOutcome::Failed { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "collaborator", rename_all = "snake_case")]
pub enum FailureReason {
    TemplateMissing,
    PrerequisiteDocumentMissing,
    UpstreamUnavailable(Collaborator),
    SubmissionRejected,
    InternalDispatchError,
}

/// Failures raised inside the orchestrator before they are folded into an outcome.
///
/// The `Display` text is the audit comment written to the case.
#[derive(Debug, thiserror::Error)]
pub enum DispatchFailure {
    #[error("Failed to send to bulk print for case {case_id} because no template was found")]
    TemplateMissing { case_id: CaseId },
    #[error("Unable to send to bulk print for case {case_id} as no dl6/dl16 document was found")]
    PrerequisiteDocumentMissing { case_id: CaseId },
    #[error("Unable to contact {collaborator}, bulk print was not sent")]
    UpstreamUnavailable {
        collaborator: Collaborator,
        #[source]
        source: GatewayError,
    },
    #[error("Failed to send to bulk print for case {case_id}. No print id returned")]
    SubmissionRejected { case_id: CaseId },
    #[error("{}", INTERNAL_ERROR_DESCRIPTION)]
    Internal {
        collaborator: Collaborator,
        #[source]
        source: GatewayError,
    },
}

impl DispatchFailure {
    /// Classify a collaborator error: transport trouble is an outage, anything else is internal.
    pub fn from_gateway(collaborator: Collaborator, source: GatewayError) -> Self {
        if source.is_transport() {
            DispatchFailure::UpstreamUnavailable {
                collaborator,
                source,
            }
        } else {
            DispatchFailure::Internal {
                collaborator,
                source,
            }
        }
    }

    /// Any error from this collaborator counts as an outage.
    pub fn unavailable(collaborator: Collaborator) -> impl FnOnce(GatewayError) -> Self {
        move |source| DispatchFailure::UpstreamUnavailable {
            collaborator,
            source,
        }
    }

    pub fn reason(&self) -> FailureReason {
        match self {
            DispatchFailure::TemplateMissing { .. } => FailureReason::TemplateMissing,
            DispatchFailure::PrerequisiteDocumentMissing { .. } => {
                FailureReason::PrerequisiteDocumentMissing
            }
            DispatchFailure::UpstreamUnavailable { collaborator, .. } => {
                FailureReason::UpstreamUnavailable(*collaborator)
            }
            DispatchFailure::SubmissionRejected { .. } => FailureReason::SubmissionRejected,
            DispatchFailure::Internal { .. } => FailureReason::InternalDispatchError,
        }
    }

    pub fn into_outcome(self) -> DispatchOutcome {
        DispatchOutcome::Failed {
            reason: self.reason(),
            description: self.to_string(),
        }
    }
}

/// Audit comment for a successful dispatch, listing the bundle in print order.
pub fn dispatched_description(correlation_id: &CorrelationId, names: &[&str]) -> String {
    format!(
        "Case has been sent to the DWP via Bulk Print with bulk print id: {} and with documents: {}",
        correlation_id,
        names.join(", ")
    )
}
