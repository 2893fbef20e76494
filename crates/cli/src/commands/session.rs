//! Sign-in commands.
//!
//! The CLI behaves like a single browser: its `currentUser` record lives in
//! the same storage as the directory.

use mt_dashboard::services::AuthService;
use mt_dashboard::storage::SqliteStorage;
use mt_dashboard::store::CurrentUserRepository;

use super::CliError;

/// Authenticate and record the session.
///
/// # Errors
///
/// Returns [`CliError::InvalidCredentials`] if the pair does not match.
pub async fn login(storage: &SqliteStorage, email: &str, password: &str) -> Result<(), CliError> {
    let session = AuthService::new(storage)
        .login(storage, email, password)
        .await?
        .ok_or(CliError::InvalidCredentials)?;

    tracing::info!("Signed in as {} ({})", session.email, session.role);
    Ok(())
}

/// Clear the session.
///
/// # Errors
///
/// Returns an error if the session cannot be removed.
pub async fn logout(storage: &SqliteStorage) -> Result<(), CliError> {
    CurrentUserRepository::new(storage).clear().await?;
    tracing::info!("Signed out");
    Ok(())
}

/// Print the signed-in user.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
#[allow(clippy::print_stdout)]
pub async fn whoami(storage: &SqliteStorage) -> Result<(), CliError> {
    match CurrentUserRepository::new(storage).get().await? {
        Some(session) => println!("{} ({})", session.email, session.role),
        None => println!("Not signed in"),
    }
    Ok(())
}
