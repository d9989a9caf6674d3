//! CLI administration tool for the shorturl service.
//!
//! Reads and inspects the store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show server version and migration state
//! cargo run --bin admin -- db info
//!
//! # Record count and identifier high-water mark
//! cargo run --bin admin -- stats
//!
//! # Show the URL behind an identifier
//! cargo run --bin admin -- lookup 42
//!
//! # Show the identifier assigned to a URL
//! cargo run --bin admin -- find https://www.freecodecamp.org
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use shorturl::config::mask_connection_string;
use shorturl::domain::entities::parse_short_url_id;
use shorturl::domain::repositories::ShortUrlRepository;
use shorturl::infrastructure::persistence::PgShortUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing the shorturl store.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show record count and identifier range
    Stats,

    /// Show the original URL for a short identifier
    Lookup {
        /// Numeric short identifier
        short_url: String,
    },

    /// Show the short identifier assigned to a URL
    Find {
        /// Original URL, exactly as submitted
        url: String,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url).await.with_context(|| {
        format!(
            "Failed to connect to {}",
            mask_connection_string(&database_url)
        )
    })?;

    let repo = PgShortUrlRepository::new(Arc::new(pool));

    match cli.command {
        Commands::Stats => show_stats(&repo).await?,
        Commands::Lookup { short_url } => lookup(&repo, &short_url).await?,
        Commands::Find { url } => find(&repo, &url).await?,
        Commands::Db { action } => match action {
            DbAction::Check => db_check(&repo).await?,
            DbAction::Info => db_info(&repo).await?,
        },
    }

    Ok(())
}

async fn show_stats(repo: &PgShortUrlRepository) -> Result<()> {
    let count = repo.count().await?;
    let max = repo.find_max_short_url().await?;

    println!("{}", "Short URL statistics".bold().underline());
    println!("  {:<20} {}", "Records:", count.to_string().cyan());
    match max {
        Some(max) => {
            println!("  {:<20} {}", "Highest identifier:", max.to_string().cyan());
            println!(
                "  {:<20} {}",
                "Next identifier:",
                (max + 1).to_string().cyan()
            );
        }
        None => println!("  {:<20} {}", "Highest identifier:", "none".dimmed()),
    }

    Ok(())
}

async fn lookup(repo: &PgShortUrlRepository, raw: &str) -> Result<()> {
    let Ok(short_url) = parse_short_url_id(raw) else {
        println!("{} '{}' is not a valid identifier", "✗".red(), raw);
        return Ok(());
    };

    match repo.find_by_short_url(short_url).await? {
        Some(record) => {
            println!("{} {}", short_url.to_string().bold(), record.original_url.green());
            println!(
                "  created {}",
                record.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed()
            );
        }
        None => println!("{} No short URL {}", "✗".red(), short_url),
    }

    Ok(())
}

async fn find(repo: &PgShortUrlRepository, url: &str) -> Result<()> {
    match repo.find_by_original_url(url).await? {
        Some(record) => println!("{} → {}", url, record.short_url.to_string().green().bold()),
        None => println!("{} {} has not been shortened", "✗".red(), url),
    }

    Ok(())
}

async fn db_check(repo: &PgShortUrlRepository) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(repo.pool())
        .await
        .context("Database query failed")?;

    println!("{} Database connection OK", "✓".green());

    Ok(())
}

async fn db_info(repo: &PgShortUrlRepository) -> Result<()> {
    let version: String = sqlx::query_scalar("SELECT version()")
        .fetch_one(repo.pool())
        .await
        .context("Failed to read server version")?;

    let migrations = repo
        .applied_migrations()
        .await
        .context("Failed to read migration state")?;

    println!("{}", "Database info".bold().underline());
    println!("  {:<12} {}", "Server:", version);
    println!("  {:<12} {}", "Migrations:", migrations);

    Ok(())
}
