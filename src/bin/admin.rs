//! CLI administration tool for page-analyzer.
//!
//! Registers and checks Urls and inspects the database without going through
//! the web interface.
//!
//! # Usage
//!
//! ```bash
//! # Register a Url
//! cargo run --bin admin -- urls add https://example.com
//!
//! # List Urls with their latest check
//! cargo run --bin admin -- urls list
//!
//! # Run a check
//! cargo run --bin admin -- check 1
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Reads the same configuration as the server (see [`page_analyzer::config`]):
//! the database settings and `SECRET_KEY` are required, pool, statement
//! timeout and fetch settings are optional.

use page_analyzer::application::services::{CheckService, Registration, UrlService};
use page_analyzer::config::{self, Config};
use page_analyzer::error::AppError;
use page_analyzer::infrastructure::http::ReqwestPageFetcher;
use page_analyzer::infrastructure::persistence::{Database, PgUrlRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing page-analyzer.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage registered Urls
    Urls {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Run a check for a Url
    Check {
        /// Url id
        id: i64,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Url management subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// List Urls with their latest check
    List,

    /// Register a Url
    Add {
        /// Url to register; reduced to its origin
        url: String,
    },
}

/// Database operation subcommands.
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

    let config = config::load_from_env()?;

    let database = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    let pool = database.pool().clone();
    let repository = Arc::new(PgUrlRepository::new(database));

    match cli.command {
        Commands::Urls { action } => handle_url_action(action, repository).await?,
        Commands::Check { id } => run_check(id, repository, &config).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches Url management commands.
async fn handle_url_action(action: UrlAction, repository: Arc<PgUrlRepository>) -> Result<()> {
    let service = UrlService::new(repository);

    match action {
        UrlAction::List => list_urls(&service).await?,
        UrlAction::Add { url } => add_url(&service, &url).await?,
    }

    Ok(())
}

/// Lists Urls with the date and status of their latest check.
///
/// # Output Format
///
/// ```text
/// 📋 Urls
///
///   ID  Name                                     Last check   Status
///   ───────────────────────────────────────────────────────────────────────────
///   2   https://example.org                      -            -
///   1   https://example.com                      2024-01-16   200
/// ```
async fn list_urls(service: &UrlService<PgUrlRepository>) -> Result<()> {
    println!("{}", "📋 Urls".bright_blue().bold());
    println!();

    let urls = service
        .list_urls()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list urls: {}", e))?;

    if urls.is_empty() {
        println!("{}", "  No urls found".yellow());
        println!();
        println!(
            "  Add one with: {} admin urls add <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<40} {:<12} {:<6}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Last check".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for url in &urls {
        let checked_at = url
            .last_check_at
            .map(|at| at.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = match url.last_status_code {
            Some(code) if (200..300).contains(&code) => code.to_string().green(),
            Some(code) => code.to_string().red(),
            None => "-".bright_black(),
        };

        println!(
            "  {:<3} {:<40} {:<12} {}",
            url.id.to_string().bright_black(),
            url.name.cyan(),
            checked_at.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", urls.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Registers a Url, reporting whether it was already known.
async fn add_url(service: &UrlService<PgUrlRepository>, input: &str) -> Result<()> {
    println!("{}", "➕ Add Url".bright_blue().bold());
    println!();

    match service.register(input).await {
        Ok(Registration::Created(id)) => {
            println!(
                "{} (id {})",
                "✅ Page successfully added".green().bold(),
                id.to_string().bright_white()
            );
        }
        Ok(Registration::AlreadyExists(id)) => {
            println!(
                "{} (id {})",
                "ℹ️  Page already exists".yellow(),
                id.to_string().bright_white()
            );
        }
        Err(AppError::Validation { message }) => {
            println!("{} {}", "❌".red(), message.red());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to add url: {}", e)),
    }
    println!();

    Ok(())
}

/// Fetches the page of a Url and records a check.
async fn run_check(id: i64, repository: Arc<PgUrlRepository>, config: &Config) -> Result<()> {
    println!("{}", "🔍 Checking page...".bright_blue());

    let fetcher = Arc::new(ReqwestPageFetcher::from_config(config)?);
    let service = CheckService::new(repository, fetcher);

    match service.run_check(id).await {
        Ok(check_id) => {
            println!(
                "{} (check {})",
                "✅ Page successfully checked".green().bold(),
                check_id.to_string().bright_white()
            );
        }
        Err(AppError::Fetch(e)) => {
            println!("{}", "⚠️  An error occurred during the check".yellow());
            println!("  {}", e.to_string().bright_black());
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("❌ Url {id} not found").red());
        }
        Err(e) => return Err(anyhow::anyhow!("Check failed: {}", e)),
    }

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of Urls
/// - Total number of checks
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let checks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_checks")
        .fetch_one(pool)
        .await?;

    println!(
        "  Urls:   {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Checks: {}",
        checks_count.to_string().bright_green().bold()
    );
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
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
