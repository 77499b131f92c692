use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

use crate::validators::FieldErrors;

pub type Result<T> = std::result::Result<T, ServiceError>;

/// User-facing message when no model key can be resolved
pub const CREDENTIAL_MISSING_MESSAGE: &str =
    "No Gemini API key is configured. Add your API key in settings and try again.";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Field-level input errors; no remote call was made
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: FieldErrors,
    },

    /// The moderation step declined the content
    #[error("{0}")]
    ContentRejected(String),

    /// No usable model credential in the request or the environment
    #[error("{}", CREDENTIAL_MISSING_MESSAGE)]
    CredentialMissing,

    /// A model call failed; the message is generic and the cause was logged
    #[error("{0}")]
    Upstream(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Validation { .. } => "VALIDATION_ERROR",
            ServiceError::ContentRejected(_) => "CONTENT_REJECTED",
            ServiceError::CredentialMissing => "CREDENTIAL_MISSING",
            ServiceError::Upstream(_) => "UPSTREAM_ERROR",
            ServiceError::BadRequest(_) => "INVALID_REQUEST",
            ServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Every field's messages, in field order, joined with ", "
impl From<FieldErrors> for ServiceError {
    fn from(field_errors: FieldErrors) -> Self {
        let message = field_errors
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        ServiceError::Validation {
            message,
            field_errors,
        }
    }
}

/// Uniform error body: `{ "error": "...", "code": "...", "fieldErrors": {...} }`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<FieldErrors>,
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            ServiceError::ContentRejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::CredentialMissing => StatusCode::UNAUTHORIZED,
            ServiceError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let field_errors = match self {
            ServiceError::Validation { field_errors, .. } => Some(field_errors.clone()),
            _ => None,
        };

        let message = match self {
            // Internal details stay in the logs
            ServiceError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "Something went wrong. Please try again.".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: message,
            code: self.code(),
            field_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::single_field_error;

    #[test]
    fn test_validation_message_joins_field_messages() {
        let mut errors = single_field_error("content", "Post cannot be empty.");
        errors
            .get_mut("content")
            .unwrap()
            .push("Something else.".to_string());

        let err = ServiceError::from(errors);
        assert_eq!(err.to_string(), "Post cannot be empty., Something else.");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ServiceError::ContentRejected("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ServiceError::CredentialMissing.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServiceError::Upstream("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let response = ServiceError::Internal("db password wrong".into()).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
