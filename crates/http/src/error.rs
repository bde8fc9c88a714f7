//! Error envelope for the bookshelf HTTP layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::{NoContext, Timestamp, Uuid};

/// Body of every error response, wrapped as `{"error": ErrorBody}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("timeout: {message}")]
    Timeout { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            details,
            code: "validation_error".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Upstream work (usually the database) ran out of time
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            code: "timeout".to_string(),
        }
    }

    fn into_parts(self) -> (StatusCode, String, String, Vec<serde_json::Value>) {
        match self {
            AppError::Validation {
                details,
                code,
                message,
            } => (StatusCode::UNPROCESSABLE_ENTITY, code, message, details),
            AppError::NotFound { message, code } => {
                (StatusCode::NOT_FOUND, code, message, Vec::new())
            }
            AppError::BadRequest { message, code } => {
                (StatusCode::BAD_REQUEST, code, message, Vec::new())
            }
            AppError::Timeout { message, code } => {
                (StatusCode::GATEWAY_TIMEOUT, code, message, Vec::new())
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error".to_string(),
                    e.to_string(),
                    Vec::new(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v7(Timestamp::now(NoContext));
        let timestamp = OffsetDateTime::now_utc().to_string();

        let (status, code, message, details) = self.into_parts();

        tracing::error!(
            trace_id = %trace_id,
            error_code = %code,
            status_code = %status.as_u16(),
            "request error"
        );

        // Release builds never echo internal causes back to clients.
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code,
                message,
                details,
                trace_id: trace_id.to_string(),
                timestamp,
            },
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let details = vec![serde_json::json!({"field": "limit", "error": "must be positive"})];
        let error = AppError::validation(details.clone(), "Validation failed");

        match error {
            AppError::Validation {
                details: d,
                code,
                message,
            } => {
                assert_eq!(d, details);
                assert_eq!(code, "validation_error");
                assert_eq!(message, "Validation failed");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::not_found("nope").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_request("bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::timeout("slow").into_response().status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("Database connection failed"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_response_format() {
        let details = vec![serde_json::json!({"field": "offset"})];
        let response = AppError::validation(details, "offset must be non-negative").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        let error = &body["error"];
        assert_eq!(error["code"], "validation_error");
        assert_eq!(error["message"], "offset must be non-negative");
        assert_eq!(error["details"][0]["field"], "offset");
        assert!(Uuid::parse_str(error["trace_id"].as_str().unwrap()).is_ok());
        assert!(!error["timestamp"].as_str().unwrap().is_empty());
    }
}
