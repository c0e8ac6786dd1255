//! CLI command implementations.

pub mod admin;
pub mod credentials;
pub mod password;

use std::io::BufRead;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use newsdesk_admin::db::{self, RepositoryError};
use newsdesk_admin::services::AuthError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository operation failed.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Reading stdin failed.
    #[error("Failed to read stdin: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the admin database named by `ADMIN_DATABASE_URL` (or `DATABASE_URL`).
async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| CliError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to admin database...");
    Ok(db::create_pool(&SecretString::from(url)).await?)
}

/// Read a password from the first line of stdin.
fn read_password() -> Result<String, CliError> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();

    if password.is_empty() {
        return Err(CliError::InvalidInput(
            "expected a password on stdin".to_string(),
        ));
    }
    Ok(password)
}
