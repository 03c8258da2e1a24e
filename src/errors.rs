use crate::round::RoundError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tracing::{debug, error};

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    /// Persisting the document failed; the cause is logged, not returned.
    pub fn save_failed(err: impl std::error::Error) -> Self {
        error!("failed to save state: {err}");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Failed to save state".to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::save_failed(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("rejected request body: {}", rejection.body_text());
        Self::bad_request("Invalid request body")
    }
}

impl From<RoundError> for AppError {
    fn from(err: RoundError) -> Self {
        match err {
            RoundError::WrongSuggestionCount { .. } => Self::bad_request(err.to_string()),
            _ => Self::conflict(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
