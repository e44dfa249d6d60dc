use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::crm::CrmImportError;
use crate::workflows::promotion::repository::RecordSourceError;
use crate::workflows::promotion::service::PromotionServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Failures surfaced by the binaries: startup, snapshot import and promotion runs.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(CrmImportError),
    Promotion(PromotionServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Promotion(PromotionServiceError::Source(RecordSourceError::NotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Promotion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Promotion(err) => write!(f, "promotion error: {}", err),
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
            AppError::Import(err) => Some(err),
            AppError::Promotion(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
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

impl From<CrmImportError> for AppError {
    fn from(value: CrmImportError) -> Self {
        Self::Import(value)
    }
}

impl From<PromotionServiceError> for AppError {
    fn from(value: PromotionServiceError) -> Self {
        Self::Promotion(value)
    }
}
