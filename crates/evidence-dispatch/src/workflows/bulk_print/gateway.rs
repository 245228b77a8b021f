use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    CaseEvent, CaseId, CaseSnapshot, CorrelationId, Credentials, DocumentTemplate, EvidenceDocument,
    PrintBundle, PrintMetadata,
};

/// Failure reported by any outbound collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("request rejected: {0}")]
    Rejected(String),
}

impl GatewayError {
    /// Transport-level failures, as opposed to the collaborator refusing the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Unavailable(_) | GatewayError::Timeout(_))
    }
}

/// External systems the dispatcher talks to, named the way operators see them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Collaborator {
    IdentityProvider,
    ContentStore,
    PrintProvider,
    DocumentGenerator,
    CaseStore,
}

impl Collaborator {
    pub fn label(self) -> &'static str {
        match self {
            Collaborator::IdentityProvider => "identity-provider",
            Collaborator::ContentStore => "content-store",
            Collaborator::PrintProvider => "print-provider",
            Collaborator::DocumentGenerator => "document-generator",
            Collaborator::CaseStore => "case-store",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Issues short-lived credentials for the case store and renderer.
pub trait IdentityProvider: Send + Sync {
    fn credentials(&self) -> Result<Credentials, GatewayError>;
}

/// Picks the covering-letter template for a case, if one applies.
pub trait TemplateResolver: Send + Sync {
    fn resolve(&self, case: &CaseSnapshot) -> Option<DocumentTemplate>;
}

/// Renders the covering letter and attaches it to the case.
pub trait DocumentGenerator: Send + Sync {
    /// Returns the attached document, or `None` when the case already had one.
    fn generate_and_attach(
        &self,
        template: &DocumentTemplate,
        event: &CaseEvent,
        credentials: &Credentials,
    ) -> Result<Option<EvidenceDocument>, GatewayError>;
}

/// Binary content storage for case documents.
pub trait ContentStore: Send + Sync {
    fn fetch(&self, url: &str, acting_user: &str) -> Result<Vec<u8>, GatewayError>;
}

/// Bulk print provider.
pub trait PrintProvider: Send + Sync {
    /// `Ok(None)` means the provider answered but did not accept the bundle.
    fn submit(
        &self,
        bundle: &PrintBundle,
        metadata: &PrintMetadata,
    ) -> Result<Option<CorrelationId>, GatewayError>;
}

/// Case record store; each update is applied atomically or not at all.
pub trait CaseRecordStore: Send + Sync {
    fn apply_event(
        &self,
        update: &CaseUpdate,
        credentials: &Credentials,
    ) -> Result<(), GatewayError>;
}

/// The full set of collaborators one dispatch run may call.
#[derive(Clone)]
pub struct Gateways {
    pub identity: Arc<dyn IdentityProvider>,
    pub templates: Arc<dyn TemplateResolver>,
    pub generator: Arc<dyn DocumentGenerator>,
    pub content: Arc<dyn ContentStore>,
    pub printer: Arc<dyn PrintProvider>,
    pub cases: Arc<dyn CaseRecordStore>,
}

/// Case-record events the recorder raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseUpdateEvent {
    SentToDwp,
    SentToDwpError,
}

/// Field changes proposed alongside the case event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseChanges {
    pub hmcts_dwp_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_sent_to_dwp: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dwp_state: Option<String>,
}

/// The single state transition proposed for a case per handled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseUpdate {
    pub case_id: CaseId,
    pub event: CaseUpdateEvent,
    pub summary: String,
    pub description: String,
    pub changes: CaseChanges,
}
