use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account no longer exists")]
    AccountNotFound,

    #[error("Invalid external identity token")]
    InvalidExternalToken,

    #[error("External identity token carries no email claim")]
    MissingEmailClaim,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Old password is incorrect")]
    WrongPassword,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            AppError::AccountNotFound => (
                StatusCode::UNAUTHORIZED,
                "ACCOUNT_NOT_FOUND",
                "Account no longer exists".to_string(),
            ),
            AppError::InvalidExternalToken => (
                StatusCode::BAD_REQUEST,
                "INVALID_EXTERNAL_TOKEN",
                "Invalid external identity token".to_string(),
            ),
            AppError::MissingEmailClaim => (
                StatusCode::BAD_REQUEST,
                "MISSING_EMAIL_CLAIM",
                "External identity token carries no email claim".to_string(),
            ),
            AppError::DuplicateEmail => (
                StatusCode::CONFLICT,
                "DUPLICATE_EMAIL",
                "Email already registered".to_string(),
            ),
            AppError::WrongPassword => (
                StatusCode::BAD_REQUEST,
                "WRONG_PASSWORD",
                "Old password is incorrect".to_string(),
            ),
            AppError::NotFound(what) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", format!("{what} not found"))
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(AppError::Unauthenticated.parts().0, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.parts().0, StatusCode::FORBIDDEN);
        assert_eq!(AppError::AccountNotFound.parts().0, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::DuplicateEmail.parts().0, StatusCode::CONFLICT);
        assert_eq!(AppError::WrongPassword.parts().0, StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidExternalToken.parts().0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound("resume").parts().0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let err = AppError::Database(sqlx::Error::PoolClosed);
        let (_, _, message) = err.parts();
        assert_eq!(message, "A database error occurred");
    }
}
