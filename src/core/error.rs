use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Wire shape for every error response: `{"error": "<message>"}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Duplicate resource (e.g. signup email). Responds 400, not 409, to keep
    /// the original wire contract.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Pool-acquisition failures are reported distinctly from statement failures:
/// "Database connection failed" vs "Database error".
fn is_connection_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
    )
}

/// True when the error is a unique-constraint violation. Signup relies on this
/// to turn the `users.email` constraint into the duplicate-account response.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

impl AppError {
    /// Status and client-facing message. Raw driver text never reaches the
    /// client; the detail is logged by `into_response`.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Database(e) if is_connection_error(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database connection failed".to_string(),
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        }
    }
}

/// DTO validation failures surface the first declared message as the
/// `{"error": ...}` body.
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::BadRequest(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }

        let (status, error) = self.status_and_message();
        (status, Json(ErrorBody { error })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_reports_connection_failure() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Database connection failed");
    }

    #[test]
    fn statement_failure_reports_generic_database_error() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Database error");
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AppError::Internal("disk write failed: /uploads/3_a.png".to_string());
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }

    #[test]
    fn client_errors_keep_their_messages() {
        let cases = [
            (
                AppError::NotFound("Report not found".into()),
                StatusCode::NOT_FOUND,
                "Report not found",
            ),
            (
                AppError::BadRequest("All fields are required".into()),
                StatusCode::BAD_REQUEST,
                "All fields are required",
            ),
            (
                AppError::Unauthorized("Unauthorized".into()),
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
            ),
            (
                AppError::Conflict("User already exists".into()),
                StatusCode::BAD_REQUEST,
                "User already exists",
            ),
        ];
        for (err, status, message) in cases {
            let (s, m) = err.status_and_message();
            assert_eq!(s, status);
            assert_eq!(m, message);
        }
    }
}
