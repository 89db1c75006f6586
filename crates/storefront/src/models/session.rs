//! Session-stored authentication state.

use serde::{Deserialize, Serialize};

use birchwood_core::{Email, UserId};

use crate::models::User;

/// The identity a session carries: just enough to act as the user and show
/// who is logged in, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}

/// Keys under which auth state is stored in the session.
pub mod session_keys {
    /// The logged-in [`CurrentUser`](super::CurrentUser).
    pub const CURRENT_USER: &str = "current_user";
}
