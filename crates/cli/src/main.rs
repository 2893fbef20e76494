//! MT Dashboard CLI - migrations and directory management.
//!
//! # Usage
//!
//! ```bash
//! # Create the storage tables
//! mt-cli migrate
//!
//! # Manage the directory
//! mt-cli user list
//! mt-cli user add -n "Sokha Chan" -e sokha@example.com -p secret -r Admin
//! mt-cli user edit 2 --status Inactive
//! mt-cli user role 2 "Super Admin"
//! mt-cli user delete 3
//!
//! # Sign in as the CLI's own "browser"
//! mt-cli login -e admin@mt.com -p 1234
//! mt-cli whoami
//! mt-cli logout
//! ```
//!
//! All commands use `DASHBOARD_DATABASE_URL` (see the dashboard's
//! configuration).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mt_dashboard_core::{Email, Role, Status};

mod commands;

#[derive(Parser)]
#[command(name = "mt-cli")]
#[command(author, version, about = "MT Dashboard CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage directory records
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Sign in with an email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum UserAction {
    /// List all records
    List,
    /// Add a record
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: Email,

        /// Plaintext password; without one the record cannot sign in
        #[arg(short, long)]
        password: Option<String>,

        /// Role (`User`, `Admin`, `Super Admin`)
        #[arg(short, long, default_value = "User")]
        role: Role,

        /// Status (`Active`, `Inactive`)
        #[arg(short, long, default_value = "Active")]
        status: Status,
    },
    /// Change a record's name, email, password or status
    Edit {
        id: i32,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<Email>,

        #[arg(short, long)]
        password: Option<String>,

        #[arg(short, long)]
        status: Option<Status>,
    },
    /// Change a record's role
    Role { id: i32, role: Role },
    /// Delete a record
    Delete { id: i32 },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => {
            let storage = commands::connect().await?;
            match action {
                UserAction::List => commands::user::list(&storage).await?,
                UserAction::Add {
                    name,
                    email,
                    password,
                    role,
                    status,
                } => {
                    let new_user = mt_dashboard_core::NewUser {
                        name,
                        email,
                        password,
                        role,
                        status,
                        avatar: None,
                    };
                    commands::user::add(&storage, new_user).await?;
                }
                UserAction::Edit {
                    id,
                    name,
                    email,
                    password,
                    status,
                } => {
                    let patch = mt_dashboard_core::UserPatch {
                        name,
                        email,
                        password,
                        status,
                        avatar: None,
                    };
                    commands::user::edit(&storage, id, &patch).await?;
                }
                UserAction::Role { id, role } => commands::user::role(&storage, id, role).await?,
                UserAction::Delete { id } => commands::user::delete(&storage, id).await?,
            }
        }
        Commands::Login { email, password } => {
            let storage = commands::connect().await?;
            commands::session::login(&storage, &email, &password).await?;
        }
        Commands::Logout => {
            let storage = commands::connect().await?;
            commands::session::logout(&storage).await?;
        }
        Commands::Whoami => {
            let storage = commands::connect().await?;
            commands::session::whoami(&storage).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_typed_arguments() {
        let cli = Cli::try_parse_from([
            "mt-cli", "user", "add", "-n", "Sokha", "-e", "sokha@example.com", "-r", "super admin",
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        let Commands::User {
            action: UserAction::Add { role, status, .. },
        } = cli.command
        else {
            panic!("expected user add");
        };
        assert_eq!(role, Role::SuperAdmin);
        assert_eq!(status, Status::Active);
    }

    #[test]
    fn test_rejects_bad_email() {
        assert!(Cli::try_parse_from(["mt-cli", "user", "add", "-n", "X", "-e", "nope"]).is_err());
    }
}
