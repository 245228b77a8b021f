use chrono::NaiveDate;
use evidence_dispatch::workflows::bulk_print::{
    BulkPrintDispatchService, CaseEvent, CaseId, CaseRecordStore, CaseSnapshot, CaseUpdate,
    ContentStore, CorrelationId, Credentials, DocumentGenerator, DocumentTemplate,
    EligibilityGate, EvidenceDocument, GatewayError, Gateways, IdentityProvider, PrintBundle,
    PrintMetadata, PrintProvider, TemplateResolver,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Hands out fixed service credentials.
#[derive(Debug, Clone)]
pub(crate) struct StaticIdentityProvider {
    credentials: Credentials,
}

impl Default for StaticIdentityProvider {
    fn default() -> Self {
        Self {
            credentials: Credentials {
                service_token: "local-service-token".to_string(),
                user_id: "evidence-dispatch".to_string(),
            },
        }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn credentials(&self) -> Result<Credentials, GatewayError> {
        Ok(self.credentials.clone())
    }
}

/// Always picks the dl6 covering letter.
pub(crate) struct Dl6TemplateResolver;

impl TemplateResolver for Dl6TemplateResolver {
    fn resolve(&self, _case: &CaseSnapshot) -> Option<DocumentTemplate> {
        Some(DocumentTemplate {
            name: "TB-SCS-GNO-ENG-00068.doc".to_string(),
            document_type: "dl6".to_string(),
        })
    }
}

/// Blob store keyed by document URL.
///
/// With the placeholder fallback enabled, URLs that were never stored resolve to
/// stand-in bytes, so cases carrying evidence held elsewhere can still be printed.
#[derive(Default, Clone)]
pub(crate) struct InMemoryContentStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    placeholder_fallback: bool,
}

impl InMemoryContentStore {
    pub(crate) fn with_placeholder_fallback() -> Self {
        Self {
            placeholder_fallback: true,
            ..Self::default()
        }
    }

    pub(crate) fn insert(&self, url: &str, content: Vec<u8>) {
        let mut guard = self.blobs.lock().expect("content mutex poisoned");
        guard.insert(url.to_string(), content);
    }
}

impl ContentStore for InMemoryContentStore {
    fn fetch(&self, url: &str, acting_user: &str) -> Result<Vec<u8>, GatewayError> {
        let guard = self.blobs.lock().expect("content mutex poisoned");
        match guard.get(url) {
            Some(content) => Ok(content.clone()),
            None if self.placeholder_fallback => {
                debug!(%url, %acting_user, "serving placeholder content for unknown document");
                Ok(format!("placeholder content for {url}").into_bytes())
            }
            None => Err(GatewayError::Rejected(format!("no document stored at {url}"))),
        }
    }
}

/// Stores placeholder content for the covering letter unless the case already has one.
#[derive(Clone)]
pub(crate) struct PlaceholderDocumentGenerator {
    content: InMemoryContentStore,
}

impl PlaceholderDocumentGenerator {
    pub(crate) fn new(content: InMemoryContentStore) -> Self {
        Self { content }
    }
}

impl DocumentGenerator for PlaceholderDocumentGenerator {
    fn generate_and_attach(
        &self,
        template: &DocumentTemplate,
        event: &CaseEvent,
        _credentials: &Credentials,
    ) -> Result<Option<EvidenceDocument>, GatewayError> {
        let already_attached = event.case.documents.iter().any(|document| {
            document
                .value
                .as_ref()
                .and_then(|details| details.document_type.as_deref())
                == Some(template.document_type.as_str())
        });
        if already_attached {
            return Ok(None);
        }

        let file_name = format!("{}-{}.pdf", template.document_type, event.case_id);
        let url = format!("memory://documents/{file_name}");
        self.content
            .insert(&url, format!("{} for case {}", template.name, event.case_id).into_bytes());

        Ok(Some(EvidenceDocument::new(
            &file_name,
            &template.document_type,
            &url,
        )))
    }
}

static PRINT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_correlation_id() -> CorrelationId {
    let id = PRINT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CorrelationId(format!("bp-{id:06}"))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPrintProvider {
    submitted: Arc<Mutex<Vec<(CorrelationId, Vec<String>)>>>,
}

impl InMemoryPrintProvider {
    #[cfg(test)]
    pub(crate) fn submitted(&self) -> Vec<(CorrelationId, Vec<String>)> {
        self.submitted.lock().expect("print mutex poisoned").clone()
    }
}

impl PrintProvider for InMemoryPrintProvider {
    fn submit(
        &self,
        bundle: &PrintBundle,
        metadata: &PrintMetadata,
    ) -> Result<Option<CorrelationId>, GatewayError> {
        let id = next_correlation_id();
        let names = bundle.names().into_iter().map(str::to_string).collect();
        info!(case_id = %metadata.case_id, correlation_id = %id, "bundle accepted for printing");
        let mut guard = self.submitted.lock().expect("print mutex poisoned");
        guard.push((id.clone(), names));
        Ok(Some(id))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseRecordStore {
    history: Arc<Mutex<HashMap<CaseId, Vec<CaseUpdate>>>>,
}

impl InMemoryCaseRecordStore {
    #[cfg(test)]
    pub(crate) fn history(&self, case_id: &CaseId) -> Vec<CaseUpdate> {
        let guard = self.history.lock().expect("case mutex poisoned");
        guard.get(case_id).cloned().unwrap_or_default()
    }
}

impl CaseRecordStore for InMemoryCaseRecordStore {
    fn apply_event(
        &self,
        update: &CaseUpdate,
        _credentials: &Credentials,
    ) -> Result<(), GatewayError> {
        let mut guard = self.history.lock().expect("case mutex poisoned");
        guard
            .entry(update.case_id.clone())
            .or_default()
            .push(update.clone());
        Ok(())
    }
}

/// In-process stand-ins for every collaborator, sharing one content store.
#[derive(Default, Clone)]
pub(crate) struct LocalCollaborators {
    pub(crate) content: InMemoryContentStore,
    pub(crate) printer: InMemoryPrintProvider,
    pub(crate) cases: InMemoryCaseRecordStore,
}

impl LocalCollaborators {
    /// Collaborators for the long-running server, where document content is not seeded.
    pub(crate) fn for_serving() -> Self {
        Self {
            content: InMemoryContentStore::with_placeholder_fallback(),
            ..Self::default()
        }
    }

    pub(crate) fn gateways(&self) -> Gateways {
        Gateways {
            identity: Arc::new(StaticIdentityProvider::default()),
            templates: Arc::new(Dl6TemplateResolver),
            generator: Arc::new(PlaceholderDocumentGenerator::new(self.content.clone())),
            content: Arc::new(self.content.clone()),
            printer: Arc::new(self.printer.clone()),
            cases: Arc::new(self.cases.clone()),
        }
    }

    pub(crate) fn service(&self, gate: EligibilityGate) -> BulkPrintDispatchService {
        BulkPrintDispatchService::new(gate, self.gateways())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
