//! Authentication error types.

use thiserror::Error;

use relace_core::EmailError;

use crate::db::RepositoryError;

/// Errors from registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The submitted email does not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The submitted password fails the policy.
    #[error("{0}")]
    WeakPassword(String),

    /// An account with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// Email/password pair does not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but is blocked.
    #[error("account blocked")]
    AccountBlocked,

    /// Password hashing or verification machinery failed.
    #[error("password hash error: {0}")]
    PasswordHash(String),

    /// Database failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}
