//! Password hashing command.

use newsdesk_admin::services::hash_password;

use super::{CliError, read_password};

/// Hash the password on stdin and print the PHC string.
///
/// The output can be written to `admin.password` directly.
#[allow(clippy::print_stdout)]
pub fn hash_from_stdin() -> Result<(), CliError> {
    let password = read_password()?;
    let hash = hash_password(&password)?;
    println!("{hash}");
    Ok(())
}
