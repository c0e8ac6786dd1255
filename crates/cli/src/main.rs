//! Newsdesk CLI - admin account and credential tools.
//!
//! # Usage
//!
//! ```bash
//! # Print an argon2id hash for a password read from stdin
//! echo -n 's3cret' | newsdesk hash-password
//!
//! # Create an admin account (password read from stdin)
//! echo -n 's3cret' | newsdesk admin create -u editor
//!
//! # Report how many accounts still use legacy credentials
//! newsdesk credentials audit
//! ```
//!
//! # Commands
//!
//! - `hash-password` - Hash a password for out-of-band provisioning
//! - `admin create` - Create an admin account with a hashed password
//! - `credentials audit` - Read-only credential scheme report

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(author, version, about = "Newsdesk operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a password read from stdin with argon2id
    HashPassword,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Inspect stored credentials
    Credentials {
        #[command(subcommand)]
        action: CredentialsAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account (password read from stdin)
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,
    },
}

#[derive(Subcommand)]
enum CredentialsAction {
    /// Count accounts per credential scheme
    Audit,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsdesk_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::HashPassword => commands::password::hash_from_stdin()?,
        Commands::Admin { action } => match action {
            AdminAction::Create { username } => {
                commands::admin::create(&username).await?;
            }
        },
        Commands::Credentials { action } => match action {
            CredentialsAction::Audit => commands::credentials::audit().await?,
        },
    }
    Ok(())
}
