//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Username/password login against the `admin` table

pub mod auth;

pub use auth::{AuthError, AuthService, hash_password, verify_credential};
