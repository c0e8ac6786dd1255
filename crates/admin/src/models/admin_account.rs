//! Admin account domain type.

use newsdesk_core::{AdminId, StoredCredential};

/// An admin account as read from the `admin` table.
///
/// `Debug` is safe to log: the credential redacts itself.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    /// Unique admin ID.
    pub id: AdminId,
    /// Login name.
    pub username: String,
    /// Stored password, classified as plaintext or hash.
    pub credential: StoredCredential,
}
