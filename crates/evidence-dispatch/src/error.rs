use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::bulk_print::DispatchServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Event(serde_json::Error),
    Dispatch(DispatchServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Event(err) => write!(f, "invalid case event: {}", err),
            AppError::Dispatch(err) => write!(f, "dispatch error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Event(err) => Some(err),
            AppError::Dispatch(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Event(_) => StatusCode::BAD_REQUEST,
            AppError::Dispatch(DispatchServiceError::UnsupportedEvent { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Dispatch(DispatchServiceError::Record(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Event(value)
    }
}

impl From<DispatchServiceError> for AppError {
    fn from(value: DispatchServiceError) -> Self {
        Self::Dispatch(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::bulk_print::EventKind;

    #[test]
    fn unsupported_events_map_to_unprocessable() {
        let error = AppError::from(DispatchServiceError::UnsupportedEvent {
            kind: EventKind::Other,
            translation_work_outstanding: false,
        });
        assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn malformed_events_map_to_bad_request() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = AppError::from(parse_error);
        assert!(error.to_string().starts_with("invalid case event"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
