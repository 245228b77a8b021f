use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for case records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub String);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case-state transitions the dispatcher listens to (plus a catch-all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    ValidAppealCreated,
    DraftToValidAppealCreated,
    ValidAppeal,
    InterlocValidAppeal,
    AppealToProceed,
    SendToDwp,
    ResendToDwp,
    #[serde(other)]
    Other,
}

/// Inbound notification: one case transition and the case as it stood at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEvent {
    pub case_id: CaseId,
    pub kind: EventKind,
    pub case: CaseSnapshot,
    #[serde(default)]
    pub translation_work_outstanding: bool,
}

/// Read-only view of the case record fields the pipeline consults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    #[serde(default)]
    pub documents: Vec<EvidenceDocument>,
    #[serde(default)]
    pub appeal: Option<Appeal>,
    #[serde(default)]
    pub created_in_gaps_from: Option<String>,
    #[serde(default)]
    pub dwp_state: Option<String>,
    #[serde(default)]
    pub hmcts_dwp_state: Option<String>,
    #[serde(default)]
    pub date_sent_to_dwp: Option<NaiveDate>,
    #[serde(default)]
    pub case_created: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appeal {
    #[serde(default)]
    pub received_via: Option<String>,
    #[serde(default)]
    pub appellant_name: Option<String>,
    #[serde(default)]
    pub benefit_code: Option<String>,
}

/// Stored case document. Every layer is optional on the wire; the selector decides
/// whether enough is present to print it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceDocument {
    #[serde(default)]
    pub value: Option<DocumentDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDetails {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub link: Option<DocumentLink>,
}

/// Pointer into the content store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    #[serde(default)]
    pub url: Option<String>,
}

impl EvidenceDocument {
    /// Convenience constructor for a fully populated document.
    pub fn new(file_name: &str, document_type: &str, url: &str) -> Self {
        Self {
            value: Some(DocumentDetails {
                file_name: Some(file_name.to_string()),
                document_type: Some(document_type.to_string()),
                link: Some(DocumentLink {
                    url: Some(url.to_string()),
                }),
            }),
        }
    }
}

/// Document template the renderer should use for the covering letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentTemplate {
    pub name: String,
    /// Type tag the generated document is stored under, e.g. "dl6".
    pub document_type: String,
}

/// Short-lived credentials handed to collaborators.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub service_token: String,
    pub user_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("service_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Identifier returned by the print provider for an accepted bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorrelationId(pub String);

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One printable item: downloaded content plus the name shown on the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintItem {
    pub content: Vec<u8>,
    pub name: String,
}

/// Ordered set of documents handed to the print provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintBundle {
    items: Vec<PrintItem>,
}

impl PrintBundle {
    pub fn new(items: Vec<PrintItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[PrintItem] {
        &self.items
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }
}

/// Case details the print provider needs to address the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintMetadata {
    pub case_id: CaseId,
    pub appellant_name: Option<String>,
    pub benefit_code: Option<String>,
}

impl PrintMetadata {
    pub fn for_case(case_id: &CaseId, case: &CaseSnapshot) -> Self {
        let appeal = case.appeal.as_ref();
        Self {
            case_id: case_id.clone(),
            appellant_name: appeal.and_then(|appeal| appeal.appellant_name.clone()),
            benefit_code: appeal.and_then(|appeal| appeal.benefit_code.clone()),
        }
    }
}
