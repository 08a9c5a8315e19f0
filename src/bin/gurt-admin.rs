//! CLI administration tool for gurt-links.
//!
//! Works directly against the PostgreSQL store, without going through HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Shorten an address
//! cargo run --bin gurt-admin -- link create gurt://example.com/page
//!
//! # Shorten with a custom slug
//! cargo run --bin gurt-admin -- link create gurt://example.com/page --slug my-page
//!
//! # Inspect a link without counting an access
//! cargo run --bin gurt-admin -- link show my-page
//!
//! # View statistics
//! cargo run --bin gurt-admin -- stats
//!
//! # Check database connection
//! cargo run --bin gurt-admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use gurt_links::application::services::{LinkRegistry, ShortenInput};
use gurt_links::config::Config;
use gurt_links::domain::errors::{ResolveError, ShortenError};
use gurt_links::infrastructure::persistence::PgLinkRepository;
use gurt_links::utils::token::OsTokenSource;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing gurt-links.
#[derive(Parser)]
#[command(name = "gurt-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a gurt:// address
    Create {
        /// Target address (must start with gurt://)
        url: String,

        /// Custom token instead of a random one
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Show a link and its access count
    Show {
        /// Token of the link
        token: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands through the registry.
async fn handle_link_action(action: LinkAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));
    let registry = LinkRegistry::new(repository, Arc::new(OsTokenSource));

    match action {
        LinkAction::Create { url, slug } => {
            let input = ShortenInput {
                target_address: url,
                requested_slug: slug,
            };

            match registry.shorten(input).await {
                Ok(outcome) if outcome.created => {
                    println!("{}", "✨ Link created".green().bold());
                    println!("  Token: {}", outcome.view.token.bright_white().bold());
                }
                Ok(outcome) => {
                    println!("{}", "♻️  Address already shortened".yellow());
                    println!("  Token: {}", outcome.view.token.bright_white().bold());
                }
                Err(e @ ShortenError::Storage(_)) => return Err(e.into()),
                Err(e) => {
                    println!("{} {}", "❌".red(), e.to_string().red());
                    std::process::exit(1);
                }
            }
        }
        LinkAction::Show { token } => match registry.stats(&token).await {
            Ok(link) => {
                println!("{}", "🔗 Link".bright_blue().bold());
                println!();
                println!("  Token:    {}", link.token.bright_white().bold());
                println!("  Target:   {}", link.target_address);
                println!(
                    "  Accesses: {}",
                    link.access_count.to_string().bright_green().bold()
                );
                println!("  Created:  {}", link.created_at.format("%Y-%m-%d %H:%M:%S"));
                println!("  Updated:  {}", link.updated_at.format("%Y-%m-%d %H:%M:%S"));
                println!();
            }
            Err(ResolveError::NotFound { token }) => {
                println!("{} {}", "❌ No link for token".red(), token.bright_white());
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}

/// Prints link and access totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let accesses: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(access_count), 0)::BIGINT FROM links")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:    {}",
        links_count.to_string().bright_green().bold()
    );
    println!("  Accesses: {}", accesses.to_string().bright_green().bold());
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
