use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::CaseEvent;
use super::service::{BulkPrintDispatchService, DispatchServiceError};

/// Router exposing the dispatch endpoint.
pub fn dispatch_router(service: Arc<BulkPrintDispatchService>) -> Router {
    Router::new()
        .route("/api/v1/bulk-print/dispatch", post(dispatch_handler))
        .with_state(service)
}

pub(crate) async fn dispatch_handler(
    State(service): State<Arc<BulkPrintDispatchService>>,
    axum::Json(event): axum::Json<CaseEvent>,
) -> Response {
    match service.handle(&event) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error @ DispatchServiceError::UnsupportedEvent { .. }) => {
            let payload = json!({
                "case_id": event.case_id,
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(DispatchServiceError::Record(error)) => {
            let payload = json!({
                "case_id": event.case_id,
                "collaborator": error.collaborator,
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
