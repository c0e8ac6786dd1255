//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use newsdesk_core::AdminId;

use super::AdminAccount;

/// Session-stored admin identity.
///
/// Minimal data stored in the session to identify the logged-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Set on login. A session without it is treated as signed out.
    pub logged_in: bool,
    /// Admin's database ID.
    pub id: AdminId,
    /// Admin's login name.
    pub username: String,
}

impl From<&AdminAccount> for CurrentAdmin {
    fn from(account: &AdminAccount) -> Self {
        Self {
            logged_in: true,
            id: account.id,
            username: account.username.clone(),
        }
    }
}

/// Session keys for admin authentication data.
pub mod keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
