use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    NotFound,
    Validation,
    BadRequest,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::NotFound => "NotFound",
            HandlerErrorKind::Validation => "Validation",
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Serialize)]
pub struct HandlerError {
    pub error: HandlerErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl HandlerError {
    pub fn bad_request<T: Into<String>>(message: T, details: Option<String>) -> Self {
        HandlerError { error: HandlerErrorKind::BadRequest, message: message.into(), details }
    }

    pub fn status(&self) -> StatusCode {
        match self.error {
            HandlerErrorKind::NotFound => StatusCode::NOT_FOUND,
            HandlerErrorKind::Validation | HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = axum::Json(self);
        (status, body).into_response()
    }
}

/// Failures of the submission pipeline, one variant per outcome the client
/// can observe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Failed to submit quote request: {0}")]
    Persistence(String),

    #[error("Failed to fetch quotes: {0}")]
    Fetch(String),

    #[error("Not Found: {0}")]
    NotFound(String),
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => HandlerError {
                error: HandlerErrorKind::Validation,
                message,
                details: None,
            },
            ServiceError::NotFound(message) => HandlerError {
                error: HandlerErrorKind::NotFound,
                message,
                details: None,
            },
            ServiceError::Persistence(details) => HandlerError {
                error: HandlerErrorKind::Internal,
                message: "Failed to submit quote request".to_string(),
                details: Some(details),
            },
            ServiceError::Fetch(details) => HandlerError {
                error: HandlerErrorKind::Internal,
                message: "Failed to fetch quotes".to_string(),
                details: Some(details),
            },
        }
    }
}
