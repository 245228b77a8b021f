use tracing::{debug, error, info, warn};

use super::constants::{CONTENT_STORE_USER, NOT_ELIGIBLE_DESCRIPTION};
use super::domain::{CaseEvent, PrintBundle, PrintItem, PrintMetadata};
use super::eligibility::EligibilityGate;
use super::gateway::{Collaborator, Gateways};
use super::outcome::{dispatched_description, DispatchFailure, DispatchOutcome};
use super::selector::{self, SelectedDocument};

/// Runs one bulk-print attempt for an eligible case.
///
/// Stages, in order: resolve the covering-letter template, generate and attach the
/// letter, select and order printable documents (a dl6/dl16 must be among them),
/// download every document, submit the bundle. The first failing stage ends the
/// run; nothing is fetched once the selection is known to be unusable, and a
/// bundle is only submitted when every download succeeded.
pub struct PrintOrchestrator {
    gate: EligibilityGate,
    gateways: Gateways,
}

impl PrintOrchestrator {
    pub fn new(gate: EligibilityGate, gateways: Gateways) -> Self {
        Self { gate, gateways }
    }

    /// Always returns an outcome; failures are classified, never propagated.
    pub fn run(&self, event: &CaseEvent) -> DispatchOutcome {
        if !self.gate.is_eligible(Some(&event.case)) {
            info!(case_id = %event.case_id, "case not valid to send to bulk print");
            return DispatchOutcome::NotEligible {
                description: NOT_ELIGIBLE_DESCRIPTION.to_string(),
            };
        }

        info!(case_id = %event.case_id, "processing bulk print tasks");
        match self.bulk_print(event) {
            Ok(outcome) => outcome,
            Err(failure) => {
                match &failure {
                    DispatchFailure::Internal {
                        collaborator,
                        source,
                    } => error!(
                        case_id = %event.case_id,
                        %collaborator,
                        error = %source,
                        "unexpected error when bulk-printing case"
                    ),
                    classified => warn!(
                        case_id = %event.case_id,
                        reason = ?classified.reason(),
                        "error when bulk-printing case: {classified}"
                    ),
                }
                failure.into_outcome()
            }
        }
    }

    fn bulk_print(&self, event: &CaseEvent) -> Result<DispatchOutcome, DispatchFailure> {
        let template = self.gateways.templates.resolve(&event.case).ok_or_else(|| {
            DispatchFailure::TemplateMissing {
                case_id: event.case_id.clone(),
            }
        })?;

        let credentials = self
            .gateways
            .identity
            .credentials()
            .map_err(DispatchFailure::unavailable(Collaborator::IdentityProvider))?;

        debug!(case_id = %event.case_id, template = %template.name, "generating covering letter");
        let generated = self
            .gateways
            .generator
            .generate_and_attach(&template, event, &credentials)
            .map_err(|source| DispatchFailure::from_gateway(Collaborator::DocumentGenerator, source))?;

        let mut documents = event.case.documents.clone();
        documents.extend(generated);

        let selected = selector::select(&documents);
        if !selector::has_prerequisite(&selected) {
            return Err(DispatchFailure::PrerequisiteDocumentMissing {
                case_id: event.case_id.clone(),
            });
        }

        let bundle = self.fetch_bundle(&selected)?;
        let metadata = PrintMetadata::for_case(&event.case_id, &event.case);

        info!(case_id = %event.case_id, documents = bundle.items().len(), "sending to bulk print");
        let correlation_id = self
            .gateways
            .printer
            .submit(&bundle, &metadata)
            .map_err(|source| DispatchFailure::from_gateway(Collaborator::PrintProvider, source))?
            .ok_or_else(|| DispatchFailure::SubmissionRejected {
                case_id: event.case_id.clone(),
            })?;

        info!(case_id = %event.case_id, %correlation_id, "case sent to bulk print");
        Ok(DispatchOutcome::Dispatched {
            description: dispatched_description(&correlation_id, &bundle.names()),
            correlation_id,
        })
    }

    fn fetch_bundle(&self, selected: &[SelectedDocument]) -> Result<PrintBundle, DispatchFailure> {
        let items = selected
            .iter()
            .map(|document| {
                let content = self
                    .gateways
                    .content
                    .fetch(&document.url, CONTENT_STORE_USER)
                    .map_err(DispatchFailure::unavailable(Collaborator::ContentStore))?;
                Ok(PrintItem {
                    content,
                    name: document.file_name.clone(),
                })
            })
            .collect::<Result<Vec<_>, DispatchFailure>>()?;

        Ok(PrintBundle::new(items))
    }
}
