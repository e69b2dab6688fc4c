//! CLI administration tool for subscriber-admin.
//!
//! Manages admin login tokens and prints signup statistics without going
//! through the web UI.
//!
//! # Usage
//!
//! ```bash
//! # Create a new admin token
//! cargo run --bin admin -- token create
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Newsletter team"
//!
//! # Signups per day over the last 30 days
//! cargo run --bin admin -- stats --days 30
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server

use subscriber_admin::application::services::auth_service::{
    generate_token, hash_token_with, validate_token_format,
};
use subscriber_admin::config::{Config, mask_connection_string};
use subscriber_admin::domain::repositories::{
    SubscriberFilter, SubscriberRepository, TokenLookup, TokenRepository,
};
use subscriber_admin::infrastructure::persistence::{PgSubscriberRepository, PgTokenRepository};

use anyhow::{Context, Result};
use chrono::{Days, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing subscriber-admin.
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
    /// Manage admin login tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show subscriber signup statistics
    Stats {
        /// Number of most recent UTC days to break down
        #[arg(short, long, default_value_t = 14, value_parser = clap::value_parser!(u64).range(1..))]
        days: u64,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new admin token
    Create {
        /// Token name (e.g., "Newsletter team")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
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

    let database_url = Config::load_database_url()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::Token { action } => handle_token_action(action, pool).await?,
        Commands::Stats { days } => handle_stats(pool, days).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = PgTokenRepository::new(pool);

    match action {
        TokenAction::Create { name, token, yes } => create_token(&repo, name, token, yes).await?,
        TokenAction::List => list_tokens(&repo).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(&repo, &name_or_id).await?,
    }

    Ok(())
}

/// Creates a new admin token with interactive prompts.
///
/// Only the HMAC-SHA256 digest keyed by `TOKEN_SIGNING_SECRET` is stored;
/// the raw token is shown once.
async fn create_token(
    repo: &PgTokenRepository,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    if secret.is_empty() {
        anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
    }

    println!("{}", "🔑 Create Admin Token".bright_blue().bold());
    println!();

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Newsletter team")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            validate_token_format(&t).map_err(|e| anyhow::anyhow!("{}", e))?;
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            println!("{}", "✨ Generated new token".green());
            generate_token()
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token_with(&secret, &token_value);

    repo.insert(&token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!(
        "  Sign in at {} with this token.",
        "http://localhost:3000/admin/login".bright_cyan()
    );
    println!();

    Ok(())
}

/// Lists all admin tokens with status indicators.
///
/// ```text
/// 📋 Admin Tokens
///
///   ID  Name                           Created              Last used            Status
///   1   Newsletter team                2024-01-15 10:30     2024-01-20 08:12     ACTIVE
/// ```
async fn list_tokens(repo: &PgTokenRepository) -> Result<()> {
    println!("{}", "📋 Admin Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<30} {:<20} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(96).bright_black());

    for token in &tokens {
        let status = if token.is_revoked() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<3} {:<30} {:<20} {:<20} {}",
            token.id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt (default: No).
async fn revoke_token(repo: &PgTokenRepository, name_or_id: &str) -> Result<()> {
    println!("{}", "🔒 Revoke Admin Token".bright_blue().bold());
    println!();

    let token = repo
        .find(TokenLookup::parse(name_or_id))
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Token not found")?;

    if token.is_revoked() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    let revoked = repo
        .revoke(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    if revoked {
        println!("{}", "✅ Token revoked successfully!".green().bold());
    } else {
        println!("{}", "⚠️  Token was revoked concurrently".yellow());
    }
    println!();

    Ok(())
}

/// Displays the subscriber total and signups per UTC day for the last
/// `days` days, newest first.
async fn handle_stats(pool: Arc<PgPool>, days: u64) -> Result<()> {
    println!("{}", "📊 Subscriber Statistics".bright_blue().bold());
    println!();

    let repo = PgSubscriberRepository::new(pool);

    let total = repo
        .count(SubscriberFilter::all())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count subscribers: {}", e))?;

    let today = Utc::now().date_naive();
    let since = today
        .checked_sub_days(Days::new(days.saturating_sub(1)))
        .unwrap_or(today);
    let filter = SubscriberFilter {
        from: Some(since.and_time(chrono::NaiveTime::MIN).and_utc()),
        to: None,
    };

    let counts = repo
        .daily_counts(filter)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to aggregate signups: {}", e))?;

    println!(
        "  Subscribers:   {}",
        total.to_string().bright_green().bold()
    );
    println!(
        "  Last {} days: {}",
        days,
        counts
            .iter()
            .map(|c| c.count)
            .sum::<i64>()
            .to_string()
            .bright_green()
            .bold()
    );
    println!();

    if counts.is_empty() {
        println!("{}", "  No signups in this period".yellow());
    }

    for day in &counts {
        println!(
            "  {}  {:>6}",
            day.date.format("%Y-%m-%d").to_string().bright_black(),
            day.count.to_string().cyan()
        );
    }
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
            let migrations: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success")
                    .fetch_one(pool)
                    .await
                    .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
