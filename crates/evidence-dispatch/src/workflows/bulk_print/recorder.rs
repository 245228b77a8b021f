use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::constants::{
    DWP_STATE_UNREGISTERED, HMCTS_DWP_STATE_FAILED, HMCTS_DWP_STATE_SENT, READY_TO_LIST,
    SENT_TO_DWP_ERROR_TITLE, SENT_TO_DWP_TITLE,
};
use super::domain::{CaseEvent, CaseId};
use super::gateway::{
    CaseChanges, CaseRecordStore, CaseUpdate, CaseUpdateEvent, Collaborator, GatewayError,
    IdentityProvider,
};
use super::outcome::DispatchOutcome;

/// Writes a dispatch outcome back to the case record with a single event.
pub struct OutcomeRecorder {
    identity: Arc<dyn IdentityProvider>,
    cases: Arc<dyn CaseRecordStore>,
}

impl OutcomeRecorder {
    pub fn new(identity: Arc<dyn IdentityProvider>, cases: Arc<dyn CaseRecordStore>) -> Self {
        Self { identity, cases }
    }

    /// Apply the outcome. Not retried here; a failed write leaves the event for redelivery.
    pub fn record(
        &self,
        event: &CaseEvent,
        outcome: &DispatchOutcome,
        today: NaiveDate,
    ) -> Result<CaseUpdate, RecordError> {
        let update = case_update(event, outcome, today);

        let credentials = self
            .identity
            .credentials()
            .map_err(|source| RecordError::new(&update, Collaborator::IdentityProvider, source))?;

        self.cases
            .apply_event(&update, &credentials)
            .map_err(|source| RecordError::new(&update, Collaborator::CaseStore, source))?;

        if outcome.is_sent() {
            info!(case_id = %update.case_id, "case state is now sent to DWP");
        } else {
            warn!(
                case_id = %update.case_id,
                reason = ?outcome.failure_reason(),
                "case flagged as failed sending to DWP"
            );
        }
        Ok(update)
    }
}

/// Build the case event for an outcome.
///
/// Sent outcomes stamp the send date and mark the case sent; ready-to-list cases
/// are additionally set to unregistered. Failures only flag the failed state.
pub fn case_update(event: &CaseEvent, outcome: &DispatchOutcome, today: NaiveDate) -> CaseUpdate {
    let description = outcome.description().to_string();

    if outcome.is_sent() {
        let dwp_state = (event.case.created_in_gaps_from.as_deref() == Some(READY_TO_LIST))
            .then(|| DWP_STATE_UNREGISTERED.to_string());

        CaseUpdate {
            case_id: event.case_id.clone(),
            event: CaseUpdateEvent::SentToDwp,
            summary: SENT_TO_DWP_TITLE.to_string(),
            description,
            changes: CaseChanges {
                hmcts_dwp_state: HMCTS_DWP_STATE_SENT.to_string(),
                date_sent_to_dwp: Some(today),
                dwp_state,
            },
        }
    } else {
        CaseUpdate {
            case_id: event.case_id.clone(),
            event: CaseUpdateEvent::SentToDwpError,
            summary: SENT_TO_DWP_ERROR_TITLE.to_string(),
            description,
            changes: CaseChanges {
                hmcts_dwp_state: HMCTS_DWP_STATE_FAILED.to_string(),
                date_sent_to_dwp: None,
                dwp_state: None,
            },
        }
    }
}

/// The outcome could not be written to the case.
#[derive(Debug, thiserror::Error)]
#[error("unable to record dispatch outcome for case {case_id} via {collaborator}: {source}")]
pub struct RecordError {
    pub case_id: CaseId,
    pub collaborator: Collaborator,
    #[source]
    pub source: GatewayError,
}

impl RecordError {
    fn new(update: &CaseUpdate, collaborator: Collaborator, source: GatewayError) -> Self {
        Self {
            case_id: update.case_id.clone(),
            collaborator,
            source,
        }
    }
}
