//! Admin authentication service.
//!
//! Accounts carry either a password hash (argon2 or the bcrypt hashes written
//! by the legacy panel) or a legacy plaintext password. The credential shape is
//! decided when the row is read; [`verify_credential`] only dispatches on it.

mod error;

pub use error::AuthError;

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use newsdesk_core::{HashScheme, StoredCredential};

use crate::db::AdminAccountRepository;
use crate::models::AdminAccount;

/// Credential checked when the username is unknown, so both failure paths
/// pay for one hash verification.
static UNKNOWN_ACCOUNT_CREDENTIAL: LazyLock<StoredCredential> = LazyLock::new(|| {
    StoredCredential::from_stored(
        hash_password("newsdesk-unknown-account").expect("Argon2 hashing with default parameters"),
    )
});

/// Admin authentication service.
pub struct AuthService<'a> {
    accounts: AdminAccountRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            accounts: AdminAccountRepository::new(pool),
        }
    }

    /// Login with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or the
    /// password is wrong.
    /// Returns `AuthError::Repository` if the account lookup fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminAccount, AuthError> {
        let account = self.accounts.get_by_username(username).await?;
        let account = authenticate(account, password, verify_credential)?;

        if account.credential.is_legacy() {
            tracing::warn!(admin_id = %account.id, "Admin signed in with a plaintext credential");
        }

        Ok(account)
    }
}

/// Run exactly one credential check whether or not the account exists.
fn authenticate<F>(
    account: Option<AdminAccount>,
    password: &str,
    verify: F,
) -> Result<AdminAccount, AuthError>
where
    F: Fn(&str, &StoredCredential) -> bool,
{
    match account {
        Some(account) if verify(password, &account.credential) => Ok(account),
        Some(_) => Err(AuthError::InvalidCredentials),
        None => {
            let _ = verify(password, &UNKNOWN_ACCOUNT_CREDENTIAL);
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Check a submitted password against a stored credential.
///
/// Hash parse or compare failures count as a mismatch.
#[must_use]
pub fn verify_credential(password: &str, credential: &StoredCredential) -> bool {
    match credential {
        StoredCredential::Plaintext(stored) => stored == password,
        StoredCredential::Hashed {
            scheme: HashScheme::Bcrypt,
            digest,
        } => bcrypt::verify(password, digest).unwrap_or(false),
        StoredCredential::Hashed {
            scheme: HashScheme::Argon2,
            digest,
        } => verify_argon2(password, digest),
    }
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_argon2(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
