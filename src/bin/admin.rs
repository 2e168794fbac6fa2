//! CLI administration tool for tinylink.
//!
//! Creates and inspects links directly against the configured store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a link (prompts for the URL if omitted)
//! cargo run --bin admin -- link create --url https://example.com --redirect-type 302
//!
//! # Create a link that burns after three hits
//! cargo run --bin admin -- link create --url https://example.com --mode expcounter --times 3
//!
//! # Show a stored record
//! cargo run --bin admin -- link show aB3xY9
//!
//! # Check store connectivity
//! cargo run --bin admin -- store check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `STORE_BACKEND`, `DATABASE_URL` / `REDIS_URL`,
//! `TABLE_NAME`, `BASE_URL` and `NOT_FOUND_URL`.

use tinylink::application::services::{LinkService, LinkServiceOptions};
use tinylink::config::{self, Config};
use tinylink::domain::entities::{LinkMode, LinkRecord, LinkStatus, NewLink, RedirectType};
use tinylink::server::build_store;
use tinylink::utils::validators::{validate_date, validate_url};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use dialoguer::{Confirm, Input};

/// CLI tool for managing tinylink.
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
    /// Manage links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Store operations
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Create a new short link
    Create {
        /// Target URL
        #[arg(short, long)]
        url: Option<String>,

        /// HTTP status used for the redirect
        #[arg(short, long, value_enum, default_value_t = RedirectArg::Found)]
        redirect_type: RedirectArg,

        /// Expiration policy
        #[arg(short, long, value_enum, default_value_t = ModeArg::Eternal)]
        mode: ModeArg,

        /// Expiry date for `expdate` links, DD/MM/YYYY
        #[arg(short = 'd', long)]
        expired_date: Option<String>,

        /// Hit limit for `expcounter` links
        #[arg(short, long, default_value_t = 0)]
        times: u64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a stored link record
    Show {
        /// Short code
        code: String,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum StoreAction {
    /// Check store connectivity
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum RedirectArg {
    #[value(name = "301")]
    Permanent,
    #[value(name = "302")]
    Found,
}

impl From<RedirectArg> for RedirectType {
    fn from(arg: RedirectArg) -> Self {
        match arg {
            RedirectArg::Permanent => RedirectType::Permanent,
            RedirectArg::Found => RedirectType::Found,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Eternal,
    Expdate,
    Expcounter,
}

impl From<ModeArg> for LinkMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Eternal => LinkMode::Eternal,
            ModeArg::Expdate => LinkMode::ExpDate,
            ModeArg::Expcounter => LinkMode::ExpCounter,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let service = connect(&config).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &service, &config).await?,
        Commands::Store { action } => handle_store_action(action, &service, &config).await?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<LinkService> {
    let store = build_store(config)
        .await
        .with_context(|| format!("Failed to open {} store", config.store_backend))?;

    let options = LinkServiceOptions {
        code_max_attempts: config.code_max_attempts,
        store_timeout: config.store_timeout(),
    };

    Ok(LinkService::new(store, options))
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &LinkService, config: &Config) -> Result<()> {
    match action {
        LinkAction::Create {
            url,
            redirect_type,
            mode,
            expired_date,
            times,
            yes,
        } => {
            let new_link = prompt_new_link(url, redirect_type, mode, expired_date, times)?;
            create_link(service, config, new_link, yes).await?;
        }
        LinkAction::Show { code } => {
            show_link(service, &code).await?;
        }
    }

    Ok(())
}

/// Builds a [`NewLink`] from flags, prompting for the URL if it was omitted.
fn prompt_new_link(
    url: Option<String>,
    redirect_type: RedirectArg,
    mode: ModeArg,
    expired_date: Option<String>,
    times: u64,
) -> Result<NewLink> {
    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .validate_with(|input: &String| -> Result<(), &str> {
                if validate_url(input) {
                    Ok(())
                } else {
                    Err("Not a valid URL")
                }
            })
            .interact_text()?,
    };

    if let Some(ref date) = expired_date
        && !validate_date(date)
    {
        anyhow::bail!("Expiry date must be DD/MM/YYYY, got '{}'", date);
    }

    let mode = LinkMode::from(mode);
    if mode == LinkMode::ExpDate && expired_date.is_none() {
        anyhow::bail!("--expired-date is required with --mode expdate");
    }

    let mut new_link = NewLink::new(url, redirect_type.into())
        .with_mode(mode)
        .with_times_to_expire(times);
    if let Some(date) = expired_date {
        new_link = new_link.with_expired_date(date);
    }

    Ok(new_link)
}

/// Creates a link after showing its details.
///
/// # Flow
///
/// 1. Display the link settings
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Generate a free code and store the record
/// 4. Print the short URL
async fn create_link(
    service: &LinkService,
    config: &Config,
    new_link: NewLink,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    println!("{}", "Link details:".bright_white().bold());
    println!("  URL:      {}", new_link.original_url.cyan());
    println!("  Redirect: {}", new_link.redirect_type.as_u16());
    if let Some(mode) = new_link.mode {
        println!("  Mode:     {:?}", mode);
    }
    if let Some(ref date) = new_link.expired_date {
        println!("  Expires:  {}", date);
    }
    if new_link.mode == Some(LinkMode::ExpCounter) {
        println!("  Hits:     {}", new_link.times_to_expire.unwrap_or(0));
    }
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let record = service
        .create_link(new_link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    let short_url = format!("{}/{}", config.base_url.trim_end_matches('/'), record.code);

    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!("  {}", short_url.bright_yellow().bold());
    println!();

    Ok(())
}

/// Prints a stored record, including its lifecycle state.
async fn show_link(service: &LinkService, code: &str) -> Result<()> {
    let record = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("Store error: {}", e))?
        .context("Link not found")?;

    print_record(&record);
    Ok(())
}

fn print_record(record: &LinkRecord) {
    let status = match record.status {
        LinkStatus::Active => "ACTIVE".green(),
        LinkStatus::Burnt => "BURNT".red(),
    };

    println!("{}", "📋 Link".bright_blue().bold());
    println!();
    println!("  Code:     {}", record.code.cyan());
    println!("  URL:      {}", record.original_url);
    println!("  Redirect: {}", record.redirect_type.as_u16());
    println!("  Status:   {}", status);
    println!("  Mode:     {:?}", record.mode);
    if let Some(ref date) = record.expired_date {
        println!("  Expires:  {}", date);
    }
    if record.mode == LinkMode::ExpCounter {
        println!(
            "  Hits:     {} / {}",
            record.count.to_string().bright_white().bold(),
            record.times_to_expire
        );
    } else {
        println!("  Hits:     {}", record.count.to_string().bright_white().bold());
    }
    println!();
}

/// Dispatches store operation commands.
async fn handle_store_action(action: StoreAction, service: &LinkService, config: &Config) -> Result<()> {
    match action {
        StoreAction::Check => {
            println!("{}", "🔍 Checking store...".bright_blue());

            if service.health_check().await {
                println!(
                    "{} {} store is reachable",
                    "✅".green(),
                    config.store_backend.to_string().cyan()
                );
            } else {
                anyhow::bail!("{} store is unreachable", config.store_backend);
            }
        }
    }

    Ok(())
}
