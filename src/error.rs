use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::flash;

/// AppError
///
/// The single error taxonomy for the application. Every failure is terminal
/// for its request and surfaces in exactly one of two shapes: a hard HTTP
/// status (`Forbidden`, `NotFound`, internal faults) or a one-shot notice
/// plus a redirect to `/login` for the recoverable account-flow errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// An account with the submitted email already exists. Raised by the
    /// pre-insert check and by the store's unique constraint itself, so a
    /// concurrent double-registration cannot slip through.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Login attempted with an email no account is registered under.
    #[error("no account with this email exists")]
    UserNotFound,

    /// Login attempted with a password that does not verify.
    #[error("password verification failed")]
    InvalidCredentials,

    /// A comment was submitted without an authenticated session.
    #[error("login required")]
    RequiresLogin,

    /// The request needs the admin role.
    #[error("forbidden")]
    Forbidden,

    /// A post id that does not exist in the store.
    #[error("not found")]
    NotFound,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    PasswordHash(#[from] pbkdf2::password_hash::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::EmailTaken => flash::redirect_with(
                "/login",
                "An account with this email already exists, please login.",
            ),
            AppError::UserNotFound => flash::redirect_with(
                "/login",
                "A user with this email address does not exist.",
            ),
            AppError::InvalidCredentials => flash::redirect_with("/login", "Invalid password."),
            AppError::RequiresLogin => {
                flash::redirect_with("/login", "You need to log in to comment.")
            }
            AppError::Forbidden => StatusCode::FORBIDDEN.into_response(),
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Database(e) => {
                // Internal detail stays in the logs, never in the response body.
                tracing::error!("database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            AppError::PasswordHash(e) => {
                tracing::error!("password hash error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
