use std::sync::Arc;

use super::common::*;
use crate::workflows::bulk_print::domain::{CorrelationId, EventKind};
use crate::workflows::bulk_print::gateway::{CaseUpdateEvent, Collaborator, GatewayError};
use crate::workflows::bulk_print::recorder::{case_update, OutcomeRecorder};
use crate::workflows::bulk_print::{DispatchOutcome, FailureReason};

fn dispatched() -> DispatchOutcome {
    DispatchOutcome::Dispatched {
        correlation_id: CorrelationId("U1".to_string()),
        description: "Case has been sent to the DWP via Bulk Print with bulk print id: U1 and with documents: b.pdf, a.pdf".to_string(),
    }
}

fn failed() -> DispatchOutcome {
    DispatchOutcome::Failed {
        reason: FailureReason::UpstreamUnavailable(Collaborator::ContentStore),
        description: "Unable to contact content-store, bulk print was not sent".to_string(),
    }
}

#[test]
fn dispatched_outcome_marks_case_sent_today() {
    let update = case_update(&event(EventKind::ValidAppeal, eligible_case()), &dispatched(), today());

    assert_eq!(update.event, CaseUpdateEvent::SentToDwp);
    assert_eq!(update.summary, "Sent to DWP");
    assert_eq!(update.description, dispatched().description());
    assert_eq!(update.changes.hmcts_dwp_state, "sentToDwp");
    assert_eq!(update.changes.date_sent_to_dwp, Some(today()));
    assert_eq!(update.changes.dwp_state, None);
}

#[test]
fn ready_to_list_cases_are_unregistered_when_sent() {
    let mut case = eligible_case();
    case.created_in_gaps_from = Some("readyToList".to_string());
    let outcome = DispatchOutcome::NotEligible {
        description: "Case state is now sent to DWP".to_string(),
    };

    let update = case_update(&event(EventKind::ValidAppeal, case), &outcome, today());

    assert_eq!(update.event, CaseUpdateEvent::SentToDwp);
    assert_eq!(update.description, "Case state is now sent to DWP");
    assert_eq!(update.changes.date_sent_to_dwp, Some(today()));
    assert_eq!(update.changes.dwp_state.as_deref(), Some("unregistered"));
}

#[test]
fn failed_outcome_flags_error_and_leaves_send_date() {
    let update = case_update(&event(EventKind::ValidAppeal, eligible_case()), &failed(), today());

    assert_eq!(update.event, CaseUpdateEvent::SentToDwpError);
    assert_eq!(update.summary, "Send to DWP Error");
    assert_eq!(update.description, failed().description());
    assert_eq!(update.changes.hmcts_dwp_state, "failedSending");
    assert_eq!(update.changes.date_sent_to_dwp, None);
    assert_eq!(update.changes.dwp_state, None);
}

#[test]
fn record_applies_exactly_one_event() {
    let harness = Harness::default();
    let recorder = OutcomeRecorder::new(harness.identity.clone(), harness.cases.clone());

    let update = recorder
        .record(&event(EventKind::ValidAppeal, eligible_case()), &failed(), today())
        .expect("record succeeds");

    assert_eq!(harness.cases.updates(), vec![update]);
    assert_eq!(harness.cases.calls(), 1);
}

#[test]
fn case_store_failure_is_reported_without_retry() {
    let identity = Arc::new(FakeIdentity::default());
    let cases = Arc::new(MemoryCaseStore::failing(GatewayError::Timeout(
        "ccd".to_string(),
    )));
    let recorder = OutcomeRecorder::new(identity.clone(), cases.clone());

    let error = recorder
        .record(&event(EventKind::ValidAppeal, eligible_case()), &dispatched(), today())
        .expect_err("case store is down");

    assert_eq!(error.collaborator, Collaborator::CaseStore);
    assert_eq!(identity.calls(), 1);
    assert_eq!(cases.calls(), 1);
    assert!(cases.updates().is_empty());
}

#[test]
fn credential_failure_skips_the_case_store() {
    let identity = Arc::new(FakeIdentity::failing_always(GatewayError::Unavailable(
        "idam".to_string(),
    )));
    let cases = Arc::new(MemoryCaseStore::default());
    let recorder = OutcomeRecorder::new(identity, cases.clone());

    let error = recorder
        .record(&event(EventKind::ValidAppeal, eligible_case()), &dispatched(), today())
        .expect_err("identity is down");

    assert_eq!(error.collaborator, Collaborator::IdentityProvider);
    assert_eq!(cases.calls(), 0);
}
