//! Authentication error taxonomy.

use thiserror::Error;

use crate::db::RepositoryError;

/// What went wrong during registration or login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] birchwood_core::EmailError),

    /// Wrong password, unknown email, or an unreadable stored hash -
    /// deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email already has an account.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The password failed the strength check.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// The user store failed underneath us.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Argon2 could not produce a hash.
    #[error("password hashing error")]
    PasswordHash,
}
