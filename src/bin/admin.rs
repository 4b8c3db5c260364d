//! CLI administration tool for keyword-router.
//!
//! Manages configurations directly in PostgreSQL without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List configurations, newest first
//! cargo run --bin admin -- configs list
//!
//! # Create a configuration (prompts for missing values)
//! cargo run --bin admin -- configs create --keyword promo1 --campaign-type google
//!
//! # Delete a configuration
//! cargo run --bin admin -- configs delete 42
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components (required)
//! - `PUBLIC_BASE_URL` - used in printed resolution URLs

use keyword_router::application::services::{ConfigService, CreateConfig};
use keyword_router::config::{self, mask_connection_string};
use keyword_router::infrastructure::persistence::PgConfigRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing keyword-router.
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
    /// Manage keyword configurations
    Configs {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Configuration management subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// List all configurations
    List,

    /// Create a configuration
    Create {
        #[arg(short, long)]
        keyword: Option<String>,

        #[arg(long)]
        white_link: Option<String>,

        #[arg(long)]
        black_link: Option<String>,

        /// `facebook` or `google`
        #[arg(short, long)]
        campaign_type: Option<String>,
    },

    /// Delete a configuration by id
    Delete {
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
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

type Service = ConfigService<PgConfigRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::Config::from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL (or DB_USER/DB_PASSWORD/DB_NAME) must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Configs { action } => {
            let repo = PgConfigRepository::new(Arc::new(pool), config.store_timeout());
            let service = ConfigService::new(Arc::new(repo), config.public_base_url.clone());
            handle_config_action(action, &service).await?
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches configuration management commands.
async fn handle_config_action(action: ConfigAction, service: &Service) -> Result<()> {
    match action {
        ConfigAction::List => list_configs(service).await,
        ConfigAction::Create {
            keyword,
            white_link,
            black_link,
            campaign_type,
        } => {
            let input = CreateConfig {
                keyword: Some(prompt_or(keyword, "Keyword")?),
                white_link: Some(prompt_or(white_link, "White link")?),
                black_link: Some(prompt_or(black_link, "Black link")?),
                campaign_type: Some(match campaign_type {
                    Some(c) => c,
                    None => pick_campaign_type()?,
                }),
            };
            create_config(service, input).await
        }
        ConfigAction::Delete { id, yes } => delete_config(service, id, yes).await,
    }
}

fn prompt_or(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

fn pick_campaign_type() -> Result<String> {
    const TYPES: [&str; 2] = ["facebook", "google"];
    let idx = Select::new()
        .with_prompt("Campaign type")
        .items(&TYPES)
        .default(0)
        .interact()?;
    Ok(TYPES[idx].to_string())
}

/// Prints all configurations as an aligned table.
async fn list_configs(service: &Service) -> Result<()> {
    let configs = service
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list configurations: {}", e))?;

    if configs.is_empty() {
        println!("{}", "No configurations found".yellow());
        return Ok(());
    }

    println!(
        "{:<8} {:<24} {:<10} {:<20} {}",
        "ID".bold(),
        "KEYWORD".bold(),
        "TYPE".bold(),
        "CREATED".bold(),
        "BLACK LINK".bold()
    );

    for config in &configs {
        println!(
            "{:<8} {:<24} {:<10} {:<20} {}",
            config.id.bright_black(),
            config.keyword.cyan(),
            config.campaign_type.as_str(),
            config.created_at.format("%Y-%m-%d %H:%M:%S"),
            config.black_link
        );
    }

    println!();
    println!("  Total: {}", configs.len().to_string().bright_green().bold());

    Ok(())
}

/// Creates a configuration through the same validation as the HTTP API.
async fn create_config(service: &Service, input: CreateConfig) -> Result<()> {
    let created = service
        .create(input)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create configuration: {}", e))?;

    println!("{}", "Configuration created".green().bold());
    println!();
    println!("  ID:        {}", created.config.id.bright_black());
    println!("  Keyword:   {}", created.config.keyword.cyan());
    println!("  UTM:       {}", created.utm);
    println!("  Check URL: {}", created.check_url);
    println!("  Redirect:  {}", created.redirect_url);
    println!();

    Ok(())
}

/// Deletes a configuration after confirmation (default: No).
async fn delete_config(service: &Service, id: String, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete configuration {id}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(&id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete configuration: {}", e))?;

    println!("{}", "Configuration deleted".green().bold());
    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;
            let configs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_configs")
                .fetch_one(pool)
                .await
                .context("link_configs table missing; start the server once to migrate")?;

            println!("{}", "Database Information".bright_blue().bold());
            println!();
            println!("  PostgreSQL:     {}", version.bright_white());
            println!("  Configurations: {}", configs.to_string().bright_green());
            println!();
        }
    }

    Ok(())
}
