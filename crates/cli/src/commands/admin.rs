//! Admin account management commands.
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for the admin database

use newsdesk_admin::db::AdminAccountRepository;
use newsdesk_admin::services::hash_password;
use newsdesk_core::AdminId;

use super::{CliError, connect, read_password};

/// Create a new admin account with an argon2id-hashed password read from stdin.
///
/// # Returns
///
/// The ID of the created account.
pub async fn create(username: &str) -> Result<AdminId, CliError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(CliError::InvalidInput("username must not be empty".to_string()));
    }

    let password = read_password()?;
    let password_hash = hash_password(&password)?;

    let pool = connect().await?;
    let id = AdminAccountRepository::new(&pool)
        .create(username, &password_hash)
        .await?;

    tracing::info!("Admin account created. ID: {}, Username: {}", id, username);
    Ok(id)
}
