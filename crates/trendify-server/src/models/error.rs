//! Error DTOs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use trendify::{InvocationError, Violation};

use crate::application::{BillingError, GenerationError};

/// One violated output field
#[derive(Debug, Serialize, ToSchema)]
pub struct ViolationResponse {
    /// Field path such as `ideas[2].title`
    pub path: String,
    pub message: String,
}

impl From<&Violation> for ViolationResponse {
    fn from(v: &Violation) -> Self {
        Self {
            path: v.path.clone(),
            message: v.message.clone(),
        }
    }
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable error tag (e.g. `SchemaValidationError`, `NotFound`)
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ViolationResponse>,
}

/// Status code plus error body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, kind: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                kind: kind.to_string(),
                message: message.into(),
                violations: Vec::new(),
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequest", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "InternalError", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<InvocationError> for ApiError {
    fn from(err: InvocationError) -> Self {
        let status = match err {
            InvocationError::Template(_) => StatusCode::BAD_REQUEST,
            InvocationError::Network { .. }
            | InvocationError::Extraction(_)
            | InvocationError::SchemaValidation(_) => StatusCode::BAD_GATEWAY,
        };
        let mut api = Self::new(status, err.kind().as_str(), err.to_string());
        api.body.violations = err.violations().iter().map(Into::into).collect();
        api
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::UnknownFlow(_) => Self::not_found(err.to_string()),
            GenerationError::NoProvider => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "ProviderUnavailable", err.to_string())
            }
            GenerationError::MissingAttachment(_) => Self::bad_request(err.to_string()),
            GenerationError::Invocation(inner) => inner.into(),
            GenerationError::Repository(inner) => Self::internal(inner.to_string()),
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::NotConfigured(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "NotConfigured", err.to_string())
            }
            BillingError::Signature(_) => {
                Self::new(StatusCode::UNAUTHORIZED, "InvalidSignature", err.to_string())
            }
            BillingError::InvalidBody(_) => Self::bad_request(err.to_string()),
            BillingError::Repository(inner) => Self::internal(inner.to_string()),
        }
    }
}
