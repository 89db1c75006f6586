//! User domain types.

use chrono::{DateTime, Utc};

use birchwood_core::{Email, UserId};

/// A storefront account.
///
/// Deliberately hash-free: the password hash stays inside the auth service
/// and its own table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Account email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last changed.
    pub updated_at: DateTime<Utc>,
}
