//! Patel Yarn House CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! pyh-cli migrate
//!
//! # Hash the admin password for ADMIN_PASSWORD_HASH
//! pyh-cli admin hash-password -p 'the-password'
//!
//! # Seed a small demo catalog
//! pyh-cli seed
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pyh-cli")]
#[command(author, version, about = "Patel Yarn House CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog with demo products
    Seed,
    /// Admin credential tools
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Print an argon2 hash suitable for ADMIN_PASSWORD_HASH
    HashPassword {
        /// The password to hash
        #[arg(short, long)]
        password: String,
    },
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
        Commands::Seed => commands::seed::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::HashPassword { password } => {
                commands::admin::hash_password(&password)?;
            }
        },
    }
    Ok(())
}
