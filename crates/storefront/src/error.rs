//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>` and the response body is always a JSON object
//! with a single `error` field.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use doorbuster_core::DealValidationError;

use crate::db::RepositoryError;
use crate::notifications::TrackerError;
use crate::services::auth::AuthError;
use crate::shopify::ShopifyError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Shopify API operation failed.
    #[error("shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// A deal or notification payload failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] DealValidationError),

    /// Notification tracker failure.
    #[error("notification tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn is_server_error(&self) -> bool {
        match self {
            Self::Database(_) | Self::Tracker(_) | Self::Internal(_) => true,
            Self::Shopify(err) => !matches!(err, ShopifyError::UserError(_)),
            Self::Auth(err) => matches!(err, AuthError::Hash | AuthError::Repository(_)),
            _ => false,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Tracker(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Shopify(err) => match err {
                ShopifyError::UserError(_) => StatusCode::BAD_REQUEST,
                ShopifyError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::WeakPassword | AuthError::InvalidEmail => StatusCode::BAD_REQUEST,
                AuthError::Hash | AuthError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    /// The message shown to clients. Internal details stay server-side.
    fn client_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Tracker(_) | Self::Internal(_) => {
                "internal server error".to_owned()
            }
            Self::Shopify(err) => match err {
                ShopifyError::UserError(message) => message.clone(),
                ShopifyError::RateLimited(_) => "too many requests, try again shortly".to_owned(),
                _ => "external service error".to_owned(),
            },
            Self::Auth(err) => match err {
                AuthError::Hash | AuthError::Repository(_) => "internal server error".to_owned(),
                other => other.to_string(),
            },
            Self::Validation(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized(message) | Self::BadRequest(message) => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "request error"
            );
        }

        let body = Json(json!({ "error": self.client_message() }));
        (self.status(), body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_user_errors_surface_their_message() {
        let err = AppError::from(ShopifyError::UserError(
            "Quantity must be greater than zero".to_owned(),
        ));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Quantity must be greater than zero");
        assert!(!err.is_server_error());
    }

    #[test]
    fn database_errors_are_opaque_server_errors() {
        let err = AppError::Database(RepositoryError::DataCorruption("bad row".to_owned()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "internal server error");
        assert!(err.is_server_error());
    }

    #[test]
    fn duplicate_signup_is_a_conflict() {
        let err = AppError::Auth(AuthError::UserAlreadyExists);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert!(!err.is_server_error());
    }
}
