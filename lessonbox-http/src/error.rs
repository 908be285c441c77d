//! Error handling for lessonbox-http
//!
//! Every error leaving a JSON handler becomes `{"error": "..."}` with a status
//! derived from the underlying error.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lessonbox_core::{
    evaluator::EvaluatorError, hint::HintError, lesson::LessonError, todo::TodoError,
};
use serde_json::json;
use std::cmp::PartialEq;
use thiserror::Error;

pub const TODO_NOT_FOUND: &str = "Todo not found";

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Lesson(#[from] LessonError),

    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error(transparent)]
    Hint(#[from] HintError),

    #[error(transparent)]
    Todo(#[from] TodoError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl PartialEq<StatusCode> for AppError {
    fn eq(&self, status_code: &StatusCode) -> bool {
        let (error_status, _) = self.status_and_message();
        &error_status == status_code
    }
}

impl AppError {
    /// Get the status code and error message for this error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::Lesson(err @ LessonError::NotFound(_)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Lesson(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Self::Evaluator(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Self::Hint(err @ HintError::NotConfigured(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            Self::Hint(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            Self::Todo(TodoError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, TODO_NOT_FOUND.to_string())
            }
            Self::Template(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", err),
            ),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!("{}", error_message);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        assert!(AppError::from(TodoError::NotFound(3)) == StatusCode::NOT_FOUND);
        assert!(AppError::from(LessonError::NotFound("x".into())) == StatusCode::NOT_FOUND);
        assert!(
            AppError::from(HintError::NotConfigured("OPENAI_API_KEY".into()))
                == StatusCode::SERVICE_UNAVAILABLE
        );
        assert!(AppError::from(HintError::Service("boom".into())) == StatusCode::BAD_GATEWAY);
        assert!(
            AppError::from(HintError::Timeout(Duration::from_secs(1))) == StatusCode::BAD_GATEWAY
        );
        assert!(AppError::BadRequest("Missing task".into()) == StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_todo_not_found_message() {
        let (_, message) = AppError::from(TodoError::NotFound(999)).status_and_message();
        assert_eq!(message, "Todo not found");
    }
}
