//! Submission errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Every way a content submission can fail
///
/// Each variant is terminal for the request. Nothing is written locally, so
/// there is never anything to roll back.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Required server configuration is missing or malformed
    #[error("{0}")]
    Configuration(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// The body was over the size limit or the connection broke mid-read
    #[error("Could not read request body")]
    UnreadableBody(String),

    #[error("Invalid JSON")]
    MalformedRequest,

    #[error("type must be 'blog' or 'event'")]
    InvalidType,

    #[error("title, date, author and body are required")]
    MissingField(Vec<&'static str>),

    #[error("Invalid date")]
    InvalidDate,

    #[error("Could not generate slug")]
    SlugDerivation,

    /// GitHub answered with a non-success status
    #[error("GitHub API {status}: {body}")]
    RemoteWrite { status: u16, body: String },

    /// The request to GitHub never produced a usable answer
    #[error("GitHub request failed: {0}")]
    RemoteRequest(String),
}

/// JSON error body: `{ "error": ..., "details": ... }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SubmitError {
    /// HTTP status code for this failure
    pub fn status(&self) -> StatusCode {
        match self {
            SubmitError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SubmitError::Unauthorized => StatusCode::UNAUTHORIZED,
            SubmitError::UnreadableBody(_)
            | SubmitError::MalformedRequest
            | SubmitError::InvalidType
            | SubmitError::MissingField(_)
            | SubmitError::InvalidDate
            | SubmitError::SlugDerivation => StatusCode::BAD_REQUEST,
            SubmitError::Configuration(_)
            | SubmitError::RemoteWrite { .. }
            | SubmitError::RemoteRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller sent something wrong (as opposed to a server fault)
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Body returned to the caller
    pub fn body(&self) -> ErrorBody {
        match self {
            SubmitError::MissingField(fields) => ErrorBody {
                error: self.to_string(),
                details: Some(format!("missing: {}", fields.join(", "))),
            },
            SubmitError::UnreadableBody(reason) => ErrorBody {
                error: self.to_string(),
                details: Some(reason.clone()),
            },
            SubmitError::RemoteWrite { .. } | SubmitError::RemoteRequest(_) => ErrorBody {
                error: "Failed to create content file".to_string(),
                details: Some(self.to_string()),
            },
            _ => ErrorBody {
                error: self.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

pub type SubmitResult<T> = std::result::Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(SubmitError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(SubmitError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(SubmitError::InvalidDate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            SubmitError::Configuration("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            SubmitError::RemoteWrite {
                status: 422,
                body: "exists".into()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_remote_write_body_carries_upstream() {
        let body = SubmitError::RemoteWrite {
            status: 422,
            body: "sha wasn't supplied".into(),
        }
        .body();
        assert_eq!(body.error, "Failed to create content file");
        assert_eq!(
            body.details.as_deref(),
            Some("GitHub API 422: sha wasn't supplied")
        );
    }

    #[test]
    fn test_missing_field_details() {
        let body = SubmitError::MissingField(vec!["date", "body"]).body();
        assert_eq!(body.error, "title, date, author and body are required");
        assert_eq!(body.details.as_deref(), Some("missing: date, body"));
    }

    #[test]
    fn test_unreadable_body_is_client_error() {
        let err = SubmitError::UnreadableBody("length limit exceeded".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.is_client_error());
        assert_eq!(err.body().details.as_deref(), Some("length limit exceeded"));
    }

    #[test]
    fn test_plain_errors_have_no_details() {
        let json = serde_json::to_string(&SubmitError::Unauthorized.body()).unwrap();
        assert_eq!(json, r#"{"error":"Unauthorized"}"#);
    }
}
