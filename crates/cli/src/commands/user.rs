//! Directory management commands.
//!
//! These act as an operator with direct storage access: no sign-in is
//! required, but the Super Admin record is still protected by the store.

use mt_dashboard::storage::SqliteStorage;
use mt_dashboard::store::DirectoryRepository;
use mt_dashboard_core::{NewUser, Role, UserId, UserPatch, UserRecord};

use super::CliError;

#[allow(clippy::print_stdout)]
fn print_record(record: &UserRecord) {
    println!(
        "{:>4}  {:<24} {:<32} {:<12} {}",
        record.id, record.name, record.email, record.role, record.status
    );
}

/// Print every record.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub async fn list(storage: &SqliteStorage) -> Result<(), CliError> {
    let records = DirectoryRepository::new(storage).load().await?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:>4}  {:<24} {:<32} {:<12} Status",
            "ID", "Name", "Email", "Role"
        );
        if records.is_empty() {
            println!("(no users)");
        }
    }
    records.iter().for_each(print_record);
    Ok(())
}

/// Add a record.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or written.
pub async fn add(storage: &SqliteStorage, new_user: NewUser) -> Result<(), CliError> {
    let record = DirectoryRepository::new(storage).create(new_user).await?;
    tracing::info!("User created successfully! ID: {}, Email: {}", record.id, record.email);
    if record.password.is_none() {
        tracing::warn!("Note: User has no password and cannot sign in.");
    }
    Ok(())
}

/// Apply `patch` to record `id`.
///
/// # Errors
///
/// Returns [`CliError::EmptyPatch`] when nothing would change, or a store
/// error (e.g. unknown id).
pub async fn edit(storage: &SqliteStorage, id: i32, patch: &UserPatch) -> Result<(), CliError> {
    if patch.is_empty() {
        return Err(CliError::EmptyPatch);
    }
    let record = DirectoryRepository::new(storage)
        .update_fields(UserId::new(id), patch)
        .await?;
    print_record(&record);
    Ok(())
}

/// Set the role of record `id`.
///
/// # Errors
///
/// Returns a store error for an unknown id or a protected Super Admin.
pub async fn role(storage: &SqliteStorage, id: i32, role: Role) -> Result<(), CliError> {
    let record = DirectoryRepository::new(storage)
        .update_role(UserId::new(id), role)
        .await?;
    print_record(&record);
    Ok(())
}

/// Delete record `id`.
///
/// # Errors
///
/// Returns a store error for an unknown id or a protected Super Admin.
pub async fn delete(storage: &SqliteStorage, id: i32) -> Result<(), CliError> {
    let record = DirectoryRepository::new(storage)
        .delete(UserId::new(id))
        .await?;
    tracing::info!("Deleted user {} ({})", record.id, record.email);
    Ok(())
}
