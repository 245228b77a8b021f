use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::domain::{CaseEvent, CaseId, EventKind};
use super::eligibility::{handles_event, EligibilityGate};
use super::gateway::{CaseUpdate, Gateways};
use super::orchestrator::PrintOrchestrator;
use super::outcome::DispatchOutcome;
use super::recorder::{OutcomeRecorder, RecordError};

/// Service composing the subscription rule, print orchestrator, and outcome recorder.
pub struct BulkPrintDispatchService {
    orchestrator: PrintOrchestrator,
    recorder: OutcomeRecorder,
}

impl BulkPrintDispatchService {
    pub fn new(gate: EligibilityGate, gateways: Gateways) -> Self {
        let recorder = OutcomeRecorder::new(gateways.identity.clone(), gateways.cases.clone());
        Self {
            orchestrator: PrintOrchestrator::new(gate, gateways),
            recorder,
        }
    }

    pub fn handle(&self, event: &CaseEvent) -> Result<DispatchReport, DispatchServiceError> {
        self.handle_on(event, Local::now().date_naive())
    }

    /// Handle an event, stamping sent cases with `today`.
    pub fn handle_on(
        &self,
        event: &CaseEvent,
        today: NaiveDate,
    ) -> Result<DispatchReport, DispatchServiceError> {
        if !handles_event(event) {
            debug!(case_id = %event.case_id, kind = ?event.kind, "event not handled by bulk print");
            return Err(DispatchServiceError::UnsupportedEvent {
                kind: event.kind,
                translation_work_outstanding: event.translation_work_outstanding,
            });
        }

        let outcome = self.orchestrator.run(event);
        let update = self.recorder.record(event, &outcome, today)?;

        Ok(DispatchReport {
            case_id: event.case_id.clone(),
            outcome,
            update,
        })
    }
}

/// What happened to one handled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub case_id: CaseId,
    pub outcome: DispatchOutcome,
    pub update: CaseUpdate,
}

/// Error raised by the dispatch service.
#[derive(Debug, thiserror::Error)]
pub enum DispatchServiceError {
    #[error("cannot handle {kind:?} event (translation work outstanding: {translation_work_outstanding})")]
    UnsupportedEvent {
        kind: EventKind,
        translation_work_outstanding: bool,
    },
    #[error(transparent)]
    Record(#[from] RecordError),
}
