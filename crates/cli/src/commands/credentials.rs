//! Credential audit command.
//!
//! Reports how many accounts still hold legacy plaintext or bcrypt
//! credentials. Read-only.

use newsdesk_admin::db::AdminAccountRepository;
use newsdesk_admin::models::AdminAccount;
use newsdesk_core::{HashScheme, StoredCredential};

use super::{CliError, connect};

/// Account counts per credential scheme.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CredentialReport {
    pub plaintext: Vec<String>,
    pub bcrypt: usize,
    pub argon2: usize,
}

impl CredentialReport {
    /// Tally accounts by credential scheme.
    #[must_use]
    pub fn from_accounts(accounts: &[AdminAccount]) -> Self {
        let mut report = Self::default();
        for account in accounts {
            match account.credential {
                StoredCredential::Plaintext(_) => report.plaintext.push(account.username.clone()),
                StoredCredential::Hashed {
                    scheme: HashScheme::Bcrypt,
                    ..
                } => report.bcrypt += 1,
                StoredCredential::Hashed {
                    scheme: HashScheme::Argon2,
                    ..
                } => report.argon2 += 1,
            }
        }
        report
    }

    /// Whether the plaintext login path is still needed.
    #[must_use]
    pub fn has_legacy(&self) -> bool {
        !self.plaintext.is_empty()
    }
}

/// Print the credential report.
#[allow(clippy::print_stdout)]
pub async fn audit() -> Result<(), CliError> {
    let pool = connect().await?;
    let accounts = AdminAccountRepository::new(&pool).list_all().await?;
    let report = CredentialReport::from_accounts(&accounts);

    println!("accounts:  {}", accounts.len());
    println!("argon2:    {}", report.argon2);
    println!("bcrypt:    {}", report.bcrypt);
    println!("plaintext: {}", report.plaintext.len());
    for username in &report.plaintext {
        println!("  - {username}");
    }

    if report.has_legacy() {
        tracing::warn!(
            count = report.plaintext.len(),
            "Plaintext credentials remain; rehash them with `newsdesk hash-password`"
        );
    }
    Ok(())
}
