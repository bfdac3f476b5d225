//! CLI administration tool for travel-planner.
//!
//! Accounts and API tokens are not exposed over HTTP; they are managed
//! here, together with the operator-only category deletion.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! cargo run --bin admin -- user create --email ann@example.com --name Ann
//!
//! # Issue a token for it
//! cargo run --bin admin -- token create --email ann@example.com --name laptop
//!
//! # List and revoke tokens
//! cargo run --bin admin -- token list
//! cargo run --bin admin -- token revoke laptop
//!
//! # Remove a category from every place
//! cargo run --bin admin -- category delete Museums
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (see [`travel_planner::config`])
//! - `TOKEN_SIGNING_SECRET`: must match the server's value for `token create`

use travel_planner::application::services::{AuthService, CategoryService, UserService};
use travel_planner::config::DatabaseConfig;
use travel_planner::domain::entities::NewUser;
use travel_planner::domain::repositories::TokenRepository;
use travel_planner::infrastructure::persistence::{
    PgCategoryRepository, PgTokenRepository, PgUserRepository,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing travel-planner.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage shared categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// Mark the account as staff
        #[arg(long)]
        staff: bool,
    },

    /// List accounts
    List,
}

#[derive(Subcommand)]
enum TokenAction {
    /// Issue a new API token for an account
    Create {
        /// Email of the owning account
        #[arg(short, long)]
        email: String,

        /// Token name (e.g., "laptop", "phone")
        #[arg(short, long)]
        name: Option<String>,

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

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories
    List,

    /// Delete a category and detach it from every place
    Delete { name: String },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let pool = Arc::new(DatabaseConfig::from_env()?.connect().await?);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Token { action } => handle_token_action(action, pool).await?,
        Commands::Category { action } => handle_category_action(action, pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &Arc<PgPool>) -> UserService<PgUserRepository> {
    UserService::new(Arc::new(PgUserRepository::new(pool.clone())))
}

async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let service = user_service(&pool);

    match action {
        UserAction::Create { email, name, staff } => {
            println!("{}", "👤 Create Account".bright_blue().bold());
            println!();

            let email = match email {
                Some(e) => e,
                None => Input::new().with_prompt("Email").interact_text()?,
            };
            let name = match name {
                Some(n) => n,
                None => Input::new()
                    .with_prompt("Display name")
                    .allow_empty(true)
                    .interact_text()?,
            };

            let user = service
                .create(NewUser::new(&email, name, staff))
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create account: {}", describe(&e)))?;

            println!(
                "{} {} (id {})",
                "✅ Account created:".green().bold(),
                user.email.cyan(),
                user.id
            );
        }
        UserAction::List => {
            println!("{}", "👥 Accounts".bright_blue().bold());
            println!();

            let users = service
                .list()
                .await
                .context("Failed to list accounts")?;

            if users.is_empty() {
                println!("{}", "  No accounts found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<35} {:<20} {:<8}",
                "ID".bright_white().bold(),
                "Email".bright_white().bold(),
                "Name".bright_white().bold(),
                "Flags".bright_white().bold()
            );
            println!("  {}", "─".repeat(72).bright_black());

            for user in &users {
                let mut flags = Vec::new();
                if user.is_staff {
                    flags.push("staff".yellow());
                }
                if !user.is_active {
                    flags.push("inactive".red());
                }
                let flags = flags
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");

                println!(
                    "  {:<5} {:<35} {:<20} {}",
                    user.id.to_string().bright_black(),
                    user.email.cyan(),
                    user.name,
                    flags
                );
            }

            println!();
            println!("  Total: {}", users.len().to_string().bright_white().bold());
        }
    }

    Ok(())
}

async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(pool.clone()));

    match action {
        TokenAction::Create { email, name, yes } => {
            create_token(&pool, repo, email, name, yes).await?;
        }
        TokenAction::List => list_tokens(repo).await?,
        TokenAction::Revoke { name_or_id } => revoke_token(repo, name_or_id).await?,
    }

    Ok(())
}

/// Issues a token for an existing account.
///
/// Only the HMAC of the token is stored; the raw value is printed once.
async fn create_token(
    pool: &Arc<PgPool>,
    repo: Arc<PgTokenRepository>,
    email: String,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let secret = std::env::var("TOKEN_SIGNING_SECRET")
        .context("TOKEN_SIGNING_SECRET must be set to issue tokens")?;
    if secret.is_empty() {
        anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
    }

    let user = user_service(pool)
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("{}", describe(&e)))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("default")
            .interact_text()?,
    };

    println!("  Account: {}", user.email.cyan());
    println!("  Name:    {}", token_name.cyan());
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

    let (_, raw) = AuthService::new(repo, secret)
        .issue_token(user.id, &token_name)
        .await
        .context("Failed to create token")?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("  Token: {}", raw.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/places",
        raw.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .context("Failed to list tokens")?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<6} {:<25} {:<18} {:<18} {:<8}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<5} {:<6} {:<25} {:<18} {:<18} {}",
            token.id.to_string().bright_black(),
            token.user_id,
            token.name.cyan(),
            token.created_at.format("%Y-%m-%d %H:%M").to_string(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", tokens.len().to_string().bright_white().bold());

    Ok(())
}

/// Revokes a token by ID (numeric input) or exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .list_tokens()
            .await
            .context("Database error")?
            .into_iter()
            .find(|t| t.id == id),
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .context("Database error")?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
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

    repo.revoke_token(token.id)
        .await
        .context("Failed to revoke token")?;

    println!("{}", "✅ Token revoked successfully!".green().bold());

    Ok(())
}

async fn handle_category_action(action: CategoryAction, pool: Arc<PgPool>) -> Result<()> {
    let service = CategoryService::new(Arc::new(PgCategoryRepository::new(pool)));

    match action {
        CategoryAction::List => {
            println!("{}", "🏷  Categories".bright_blue().bold());
            println!();

            let categories = service
                .list()
                .await
                .context("Failed to list categories")?;

            for category in &categories {
                println!(
                    "  {:<5} {}",
                    category.id.to_string().bright_black(),
                    category.name.cyan()
                );
            }
            println!();
            println!(
                "  Total: {}",
                categories.len().to_string().bright_white().bold()
            );
        }
        CategoryAction::Delete { name } => {
            let confirmed = Confirm::new()
                .with_prompt(format!("Delete category '{name}' from every place?"))
                .default(false)
                .interact()?;

            if !confirmed {
                println!("{}", "❌ Cancelled".red());
                return Ok(());
            }

            let category = service
                .delete_by_name(&name)
                .await
                .map_err(|e| anyhow::anyhow!("{}", describe(&e)))?;

            println!(
                "{} {} (id {})",
                "✅ Category deleted:".green().bold(),
                category.name.cyan(),
                category.id
            );
        }
    }

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
    }

    Ok(())
}

/// Renders an application error with its field details for the terminal.
fn describe(error: &travel_planner::AppError) -> String {
    let (_, info) = error.to_error_info();
    if info.details.as_object().is_some_and(|d| !d.is_empty()) {
        format!("{} {}", info.message, info.details)
    } else {
        info.message
    }
}
