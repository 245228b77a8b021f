use super::constants::{DL16, DL6, PRINTABLE_EXTENSION, SSCS1};
use super::domain::EvidenceDocument;

/// A document that passed the printable filter, with every field resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    pub file_name: String,
    pub document_type: String,
    pub url: String,
}

impl SelectedDocument {
    fn from_document(document: &EvidenceDocument) -> Option<Self> {
        let details = document.value.as_ref()?;
        let file_name = details.file_name.as_deref()?;
        let document_type = details.document_type.as_deref()?;
        let url = details.link.as_ref()?.url.as_deref()?;

        if !file_name.to_lowercase().contains(PRINTABLE_EXTENSION) {
            return None;
        }

        Some(Self {
            file_name: file_name.to_string(),
            document_type: document_type.to_string(),
            url: url.to_string(),
        })
    }

    /// Covering letters (dl6/dl16) that must be present before anything is printed.
    pub fn is_prerequisite(&self) -> bool {
        self.document_type == DL6 || self.document_type == DL16
    }
}

/// Print order: covering letters, then the appeal form, then everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PrintGroup {
    CoveringLetter,
    AppealForm,
    Evidence,
}

impl PrintGroup {
    fn of(document: &SelectedDocument) -> Self {
        if document.is_prerequisite() {
            Self::CoveringLetter
        } else if document.document_type == SSCS1 {
            Self::AppealForm
        } else {
            Self::Evidence
        }
    }
}

/// Filter the case documents down to printable ones and order them for the bundle.
///
/// Documents missing a file name, type, or content link, or whose name does not
/// mention a PDF, are skipped. The order is a stable partition: each group keeps
/// the order the documents had on the case.
pub fn select(documents: &[EvidenceDocument]) -> Vec<SelectedDocument> {
    let mut covering = Vec::new();
    let mut appeal = Vec::new();
    let mut evidence = Vec::new();

    for selected in documents.iter().filter_map(SelectedDocument::from_document) {
        match PrintGroup::of(&selected) {
            PrintGroup::CoveringLetter => covering.push(selected),
            PrintGroup::AppealForm => appeal.push(selected),
            PrintGroup::Evidence => evidence.push(selected),
        }
    }

    covering.extend(appeal);
    covering.extend(evidence);
    covering
}

/// True when the selection carries at least one dl6/dl16 covering letter.
pub fn has_prerequisite(selected: &[SelectedDocument]) -> bool {
    selected.iter().any(SelectedDocument::is_prerequisite)
}
