use crate::infra::LocalCollaborators;
use chrono::{Local, NaiveDate};
use clap::Args;
use evidence_dispatch::config::AppConfig;
use evidence_dispatch::error::AppError;
use evidence_dispatch::telemetry;
use evidence_dispatch::workflows::bulk_print::{
    CaseEvent, CaseUpdateEvent, DispatchOutcome, DispatchReport, EligibilityGate,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DispatchArgs {
    /// Path to a case event JSON document
    #[arg(long)]
    pub(crate) event: PathBuf,
    /// Date stamped on cases marked as sent (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Accepted "received via" channel; repeat to accept several. Overrides DISPATCH_SUBMIT_TYPES
    #[arg(long = "submit-type")]
    pub(crate) submit_types: Vec<String>,
}

pub(crate) fn run_dispatch(args: DispatchArgs) -> Result<(), AppError> {
    let DispatchArgs {
        event,
        today,
        submit_types,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let raw = std::fs::read_to_string(&event)?;
    let event: CaseEvent = serde_json::from_str(&raw)?;

    let gate = if submit_types.is_empty() {
        config.dispatch.eligibility_gate()
    } else {
        EligibilityGate::new(submit_types)
    };
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let report = dispatch_event(&event, gate, today)?;
    println!("{}", render_report(&report));
    Ok(())
}

/// Run one event against local collaborators whose content store already holds
/// every document the event references.
pub(crate) fn dispatch_event(
    event: &CaseEvent,
    gate: EligibilityGate,
    today: NaiveDate,
) -> Result<DispatchReport, AppError> {
    let collaborators = LocalCollaborators::default();
    for url in event
        .case
        .documents
        .iter()
        .filter_map(|document| document.value.as_ref()?.link.as_ref()?.url.as_deref())
    {
        collaborators
            .content
            .insert(url, format!("stored content for {url}").into_bytes());
    }

    let service = collaborators.service(gate);
    Ok(service.handle_on(event, today)?)
}

pub(crate) fn render_report(report: &DispatchReport) -> String {
    let mut lines = vec![format!("Case {}", report.case_id)];

    let outcome = match &report.outcome {
        DispatchOutcome::Dispatched { correlation_id, .. } => {
            format!("dispatched (bulk print id {correlation_id})")
        }
        DispatchOutcome::NotEligible { .. } => "not eligible for bulk print".to_string(),
        DispatchOutcome::Failed { reason, .. } => format!("failed ({reason:?})"),
    };
    lines.push(format!("  Outcome     : {outcome}"));

    let event = match report.update.event {
        CaseUpdateEvent::SentToDwp => "sentToDwp",
        CaseUpdateEvent::SentToDwpError => "sentToDwpError",
    };
    lines.push(format!(
        "  Case event  : {event} \"{}\"",
        report.update.summary
    ));
    lines.push(format!("  Comment     : {}", report.update.description));
    lines.push(format!(
        "  DWP state   : {}",
        report.update.changes.hmcts_dwp_state
    ));
    if let Some(date) = report.update.changes.date_sent_to_dwp {
        lines.push(format!("  Sent on     : {date}"));
    }

    lines.join("\n")
}
