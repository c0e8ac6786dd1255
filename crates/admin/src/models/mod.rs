//! Domain models for admin.

pub mod admin_account;
pub mod news;
pub mod session;

pub use admin_account::AdminAccount;
pub use news::NewsItem;
pub use session::{CurrentAdmin, keys as session_keys};
