//! Threads in the Matrix CLI - user table and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # List accounts in users.csv
//! threads-cli users list
//!
//! # Create an account (terms are taken as accepted)
//! threads-cli users add -u alice -p pw1 --phone 555-0100 --waist 28 --bust 34 --hip 36
//!
//! # Check images.csv and show the browse grid shape
//! threads-cli catalog check
//! ```
//!
//! Table paths default to `THREADS_USERS_CSV` / `THREADS_IMAGES_CSV` (or
//! `users.csv` / `images.csv`) and can be overridden with `--users` and
//! `--images`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "threads-cli")]
#[command(author, version, about = "Threads in the Matrix CLI tools")]
struct Cli {
    /// Path of the user table
    #[arg(long, global = true)]
    users: Option<PathBuf>,

    /// Path of the image catalog
    #[arg(long, global = true)]
    images: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts in the user table
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Inspect the image catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List every account in table order
    List,
    /// Append a new account
    Add {
        /// Username (duplicates are allowed)
        #[arg(short, long)]
        username: String,

        /// Plaintext password
        #[arg(short, long)]
        password: String,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Waist measurement
        #[arg(long, default_value_t = 0.0)]
        waist: f64,

        /// Bust measurement
        #[arg(long, default_value_t = 0.0)]
        bust: f64,

        /// Hip measurement
        #[arg(long, default_value_t = 0.0)]
        hip: f64,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Count displayable images and show the grid layout
    Check,
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
    let paths = commands::TablePaths::resolve(cli.users, cli.images)?;

    match cli.command {
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(&paths).await?,
            UsersAction::Add {
                username,
                password,
                phone,
                waist,
                bust,
                hip,
            } => {
                let input = threads_core::SignupInput {
                    username,
                    password,
                    phone,
                    waist,
                    bust,
                    hip,
                };
                commands::users::add(&paths, input).await?;
            }
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Check => {
                commands::catalog::check(&paths).await?;
            }
        },
    }
    Ok(())
}
