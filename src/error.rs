/// Error types for gram-service
///
/// Every business-rule violation carries a stable machine-readable code.
/// Errors are converted to JSON HTTP responses for API clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for gram-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Referenced post is missing, or the caller may not act on it.
    /// Ownership failures deliberately map here so that existence is
    /// not leaked to non-owners.
    #[error("post not found")]
    PostNotFound,

    #[error("comment not found")]
    CommentNotFound,

    #[error("user not found")]
    UserNotFound,

    #[error("users cannot follow themselves")]
    SelfFollow,

    /// Request input failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing or invalid credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// File storage operation failed
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable error code exposed to clients
    pub fn code(&self) -> &'static str {
        match self {
            AppError::PostNotFound => "POST_NOT_FOUND",
            AppError::CommentNotFound => "COMMENT_NOT_FOUND",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::SelfFollow => "SELF_FOLLOW",
            AppError::Validation(_) => "VALIDATION_FAILED",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::PostNotFound | AppError::CommentNotFound | AppError::UserNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::SelfFollow | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Database(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Internal details stay in the logs, not in the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "code": self.code(),
            "error": message,
            "status": status.as_u16(),
        }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_to_404() {
        assert_eq!(AppError::PostNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::CommentNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Validation("content too long".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_FAILED");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::Internal("connection string leaked".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
