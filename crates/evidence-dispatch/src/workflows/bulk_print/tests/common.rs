use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::bulk_print::domain::{
    Appeal, CaseEvent, CaseId, CaseSnapshot, CorrelationId, Credentials, DocumentTemplate,
    EventKind, EvidenceDocument, PrintBundle, PrintMetadata,
};
use crate::workflows::bulk_print::gateway::{
    CaseRecordStore, CaseUpdate, ContentStore, DocumentGenerator, GatewayError, Gateways,
    IdentityProvider, PrintProvider, TemplateResolver,
};
use crate::workflows::bulk_print::{BulkPrintDispatchService, EligibilityGate, PrintOrchestrator};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

pub(super) fn gate() -> EligibilityGate {
    EligibilityGate::new(vec!["paper".to_string()])
}

pub(super) fn eligible_case() -> CaseSnapshot {
    CaseSnapshot {
        documents: vec![
            EvidenceDocument::new("a.pdf", "sscs1", "http://dm-store/documents/a"),
            EvidenceDocument::new("b.pdf", "dl6", "http://dm-store/documents/b"),
        ],
        appeal: Some(Appeal {
            received_via: Some("Paper".to_string()),
            appellant_name: Some("Jo Bloggs".to_string()),
            benefit_code: Some("PIP".to_string()),
        }),
        created_in_gaps_from: Some("validAppeal".to_string()),
        dwp_state: None,
        hmcts_dwp_state: None,
        date_sent_to_dwp: None,
        case_created: NaiveDate::from_ymd_opt(2025, 9, 20),
    }
}

pub(super) fn event(kind: EventKind, case: CaseSnapshot) -> CaseEvent {
    CaseEvent {
        case_id: CaseId("1563382899630221".to_string()),
        kind,
        case,
        translation_work_outstanding: false,
    }
}

pub(super) fn template() -> DocumentTemplate {
    DocumentTemplate {
        name: "TB-SCS-GNO-ENG-00068.doc".to_string(),
        document_type: "dl6".to_string(),
    }
}

/// Identity provider that can fail a fixed number of leading calls.
#[derive(Default)]
pub(super) struct FakeIdentity {
    failures: Mutex<Vec<GatewayError>>,
    calls: Mutex<usize>,
}

impl FakeIdentity {
    pub(super) fn failing_once(error: GatewayError) -> Self {
        Self {
            failures: Mutex::new(vec![error]),
            calls: Mutex::new(0),
        }
    }

    pub(super) fn failing_always(error: GatewayError) -> Self {
        Self {
            failures: Mutex::new(vec![error; 8]),
            calls: Mutex::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("identity mutex poisoned")
    }
}

impl IdentityProvider for FakeIdentity {
    fn credentials(&self) -> Result<Credentials, GatewayError> {
        *self.calls.lock().expect("identity mutex poisoned") += 1;
        let mut failures = self.failures.lock().expect("identity mutex poisoned");
        if failures.is_empty() {
            Ok(Credentials {
                service_token: "s2s-token".to_string(),
                user_id: "sscs-system".to_string(),
            })
        } else {
            Err(failures.remove(0))
        }
    }
}

pub(super) struct FixedTemplates(pub(super) Option<DocumentTemplate>);

impl Default for FixedTemplates {
    fn default() -> Self {
        Self(Some(template()))
    }
}

impl TemplateResolver for FixedTemplates {
    fn resolve(&self, _case: &CaseSnapshot) -> Option<DocumentTemplate> {
        self.0.clone()
    }
}

#[derive(Default)]
pub(super) struct FakeGenerator {
    pub(super) attaches: Option<EvidenceDocument>,
    pub(super) error: Option<GatewayError>,
    calls: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub(super) fn attaching(document: EvidenceDocument) -> Self {
        Self {
            attaches: Some(document),
            ..Self::default()
        }
    }

    pub(super) fn failing(error: GatewayError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("generator mutex poisoned").clone()
    }
}

impl DocumentGenerator for FakeGenerator {
    fn generate_and_attach(
        &self,
        template: &DocumentTemplate,
        _event: &CaseEvent,
        _credentials: &Credentials,
    ) -> Result<Option<EvidenceDocument>, GatewayError> {
        self.calls
            .lock()
            .expect("generator mutex poisoned")
            .push(template.name.clone());
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.attaches.clone()),
        }
    }
}

/// Content store returning the URL bytes, optionally failing for one URL.
#[derive(Default)]
pub(super) struct FakeContentStore {
    pub(super) fail_on: Option<(String, GatewayError)>,
    fetched: Mutex<Vec<(String, String)>>,
}

impl FakeContentStore {
    pub(super) fn failing_on(url: &str, error: GatewayError) -> Self {
        Self {
            fail_on: Some((url.to_string(), error)),
            ..Self::default()
        }
    }

    pub(super) fn fetched(&self) -> Vec<(String, String)> {
        self.fetched.lock().expect("content mutex poisoned").clone()
    }
}

impl ContentStore for FakeContentStore {
    fn fetch(&self, url: &str, acting_user: &str) -> Result<Vec<u8>, GatewayError> {
        self.fetched
            .lock()
            .expect("content mutex poisoned")
            .push((url.to_string(), acting_user.to_string()));
        match &self.fail_on {
            Some((failing, error)) if failing == url => Err(error.clone()),
            _ => Ok(url.as_bytes().to_vec()),
        }
    }
}

pub(super) struct FakePrinter {
    response: Result<Option<CorrelationId>, GatewayError>,
    submissions: Mutex<Vec<(Vec<String>, PrintMetadata)>>,
}

impl FakePrinter {
    pub(super) fn returning(response: Result<Option<CorrelationId>, GatewayError>) -> Self {
        Self {
            response,
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn submissions(&self) -> Vec<(Vec<String>, PrintMetadata)> {
        self.submissions
            .lock()
            .expect("printer mutex poisoned")
            .clone()
    }
}

impl Default for FakePrinter {
    fn default() -> Self {
        Self::returning(Ok(Some(CorrelationId("U1".to_string()))))
    }
}

impl PrintProvider for FakePrinter {
    fn submit(
        &self,
        bundle: &PrintBundle,
        metadata: &PrintMetadata,
    ) -> Result<Option<CorrelationId>, GatewayError> {
        let names = bundle.names().into_iter().map(str::to_string).collect();
        self.submissions
            .lock()
            .expect("printer mutex poisoned")
            .push((names, metadata.clone()));
        self.response.clone()
    }
}

#[derive(Default)]
pub(super) struct MemoryCaseStore {
    pub(super) error: Option<GatewayError>,
    calls: Mutex<usize>,
    updates: Mutex<Vec<CaseUpdate>>,
}

impl MemoryCaseStore {
    pub(super) fn failing(error: GatewayError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub(super) fn updates(&self) -> Vec<CaseUpdate> {
        self.updates.lock().expect("case store mutex poisoned").clone()
    }

    pub(super) fn calls(&self) -> usize {
        *self.calls.lock().expect("case store mutex poisoned")
    }
}

impl CaseRecordStore for MemoryCaseStore {
    fn apply_event(
        &self,
        update: &CaseUpdate,
        _credentials: &Credentials,
    ) -> Result<(), GatewayError> {
        *self.calls.lock().expect("case store mutex poisoned") += 1;
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        self.updates
            .lock()
            .expect("case store mutex poisoned")
            .push(update.clone());
        Ok(())
    }
}

/// Every fake wired together; swap fields before calling `service()`.
#[derive(Default)]
pub(super) struct Harness {
    pub(super) identity: Arc<FakeIdentity>,
    pub(super) templates: Arc<FixedTemplates>,
    pub(super) generator: Arc<FakeGenerator>,
    pub(super) content: Arc<FakeContentStore>,
    pub(super) printer: Arc<FakePrinter>,
    pub(super) cases: Arc<MemoryCaseStore>,
}

impl Harness {
    pub(super) fn gateways(&self) -> Gateways {
        Gateways {
            identity: self.identity.clone(),
            templates: self.templates.clone(),
            generator: self.generator.clone(),
            content: self.content.clone(),
            printer: self.printer.clone(),
            cases: self.cases.clone(),
        }
    }

    pub(super) fn orchestrator(&self) -> PrintOrchestrator {
        PrintOrchestrator::new(gate(), self.gateways())
    }

    pub(super) fn service(&self) -> BulkPrintDispatchService {
        BulkPrintDispatchService::new(gate(), self.gateways())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
