//! Unified error handling with Sentry capture.
//!
//! Route handlers return [`Result`]; the [`AppError`] they bubble up decides
//! the status code and the message the client is allowed to see. Server-side
//! failures go to Sentry with their full detail; clients get a generic line.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;

/// Top-level error for the storefront's request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// A repository operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// An authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The checkout transaction failed and rolled back.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// The referenced resource does not exist (or belongs to someone else).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identity required but absent.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The client sent something unusable.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Anything else that should read as a 500.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The status code and client-visible message for this error.
    ///
    /// Storage and checkout failures collapse to a generic 500 line; their
    /// detail lives in logs and Sentry only.
    fn client_view(&self) -> (StatusCode, String) {
        match self {
            Self::Database(_) | Self::Checkout(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            ),
            Self::Auth(err) => auth_client_view(err),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        }
    }
}

fn auth_client_view(err: &AuthError) -> (StatusCode, String) {
    match err {
        AuthError::InvalidCredentials => {
            (StatusCode::UNAUTHORIZED, "Invalid credentials".to_owned())
        }
        AuthError::UserAlreadyExists => (
            StatusCode::CONFLICT,
            "An account with this email already exists".to_owned(),
        ),
        AuthError::WeakPassword(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        AuthError::InvalidEmail(_) => {
            (StatusCode::BAD_REQUEST, "Invalid email address".to_owned())
        }
        AuthError::Repository(_) | AuthError::PasswordHash => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication error".to_owned(),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.client_view();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, %event_id, "request failed");
        }

        (status, message).into_response()
    }
}

/// Handler result alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach the acting user to the Sentry scope.
///
/// Called after login so captured errors carry who hit them.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Detach the user from the Sentry scope on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Record a user action as a Sentry breadcrumb.
///
/// Breadcrumbs show the trail of actions leading up to a captured error.
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_owned()),
        message: Some(message.to_owned()),
        level: sentry::Level::Info,
        data: data
            .unwrap_or_default()
            .iter()
            .map(|(k, v)| ((*k).to_owned(), serde_json::Value::String((*v).to_owned())))
            .collect(),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn display_includes_detail() {
        let err = AppError::NotFound("product 123".to_owned());
        assert_eq!(err.to_string(), "Not found: product 123");
    }

    #[test]
    fn boundary_errors_map_to_client_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthorized("x".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::BadRequest("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn auth_errors_map_per_variant() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::WeakPassword("short".to_owned()))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_detail_never_reaches_the_client() {
        let err = AppError::Database(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        let (status, message) = err.client_view();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "Internal server error");
    }
}
