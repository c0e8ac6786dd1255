//! Stored admin credential types.
//!
//! Admin accounts predate password hashing, so the `password` column holds
//! either a hash or the legacy plaintext value. The shape is decided once, when
//! the row is read, by [`StoredCredential::from_stored`]. Nothing else inspects
//! the raw column value.

use core::fmt;

/// Hash algorithm identified from a stored credential's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashScheme {
    /// `$2a$`, `$2b$` or `$2y$` bcrypt hashes written by the legacy panel.
    Bcrypt,
    /// `$argon2id$`, `$argon2i$` or `$argon2d$` PHC strings.
    Argon2,
}

impl HashScheme {
    const BCRYPT_PREFIXES: [&'static str; 3] = ["$2a$", "$2b$", "$2y$"];
    const ARGON2_PREFIXES: [&'static str; 3] = ["$argon2id$", "$argon2i$", "$argon2d$"];

    /// Identify the scheme of a stored value, if it looks like a hash.
    #[must_use]
    pub fn detect(stored: &str) -> Option<Self> {
        if Self::BCRYPT_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            Some(Self::Bcrypt)
        } else if Self::ARGON2_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            Some(Self::Argon2)
        } else {
            None
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bcrypt => write!(f, "bcrypt"),
            Self::Argon2 => write!(f, "argon2"),
        }
    }
}

/// A credential as read from the `admin` table.
///
/// `Debug` never prints the stored value.
#[derive(Clone, PartialEq, Eq)]
pub enum StoredCredential {
    /// Legacy unhashed password, compared by exact equality.
    Plaintext(String),
    /// Password hash in the given scheme.
    Hashed {
        scheme: HashScheme,
        digest: String,
    },
}

impl StoredCredential {
    /// Classify a raw `password` column value.
    #[must_use]
    pub fn from_stored(value: String) -> Self {
        match HashScheme::detect(&value) {
            Some(scheme) => Self::Hashed {
                scheme,
                digest: value,
            },
            None => Self::Plaintext(value),
        }
    }

    /// Returns `true` for legacy plaintext credentials.
    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::Plaintext(_))
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext(_) => f.write_str("Plaintext([REDACTED])"),
            Self::Hashed { scheme, .. } => f
                .debug_struct("Hashed")
                .field("scheme", scheme)
                .field("digest", &"[REDACTED]")
                .finish(),
        }
    }
}
