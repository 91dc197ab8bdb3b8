//! SBD Billing admin CLI
//!
//! Inspects the tariff catalog and rates usage records offline, without
//! a running server.
//!
//! ```sh
//! # List registered plans (built-ins + configured extras)
//! sbd-admin plans
//!
//! # Show one plan's tier schedule
//! sbd-admin describe "SBD Tiered 1250 10K"
//!
//! # Rate a usage record
//! sbd-admin quote --plan "SBD Tiered 1250 10K" --bytes 100000
//!
//! # Validate a config file
//! sbd-admin check --config /etc/sbd-billing/config.toml
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sbd_billing::server::build_catalog;
use sbd_billing::{default_config_path, AppConfig, RatingService};

/// SBD billing admin tool: tariff catalog inspection and offline rating.
#[derive(Parser, Debug)]
#[command(
    name = "sbd-admin",
    version,
    about = "Admin CLI for the SBD billing service",
    long_about = "Inspect tariff plans and rate SBD usage records against the \
                  tiered overage schedule.\n\n\
                  Default config: ~/.config/sbd-billing/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "SBD_BILLING_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered tariff plans.
    Plans,

    /// Print one plan's tier schedule.
    Describe {
        /// Plan name, e.g. "SBD Tiered 1250 10K"
        name: String,
    },

    /// Rate a usage record against a plan.
    Quote {
        /// Plan name
        #[arg(long)]
        plan: String,
        /// Metered usage in bytes
        #[arg(long)]
        bytes: u64,
        /// Print the breakdown as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration file and exit.
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // ── Load configuration ─────────────────────────────────────
    // An explicit --config path must load; the default path may be
    // absent, in which case the built-in plans are all there is.
    let (config, config_path) = match &cli.config {
        Some(path) => (AppConfig::load(path)?, path.clone()),
        None => {
            let path = default_config_path();
            let config = AppConfig::load(&path).unwrap_or_default();
            (config, path)
        }
    };

    let rating = RatingService::new(build_catalog(&config)?);

    match cli.command {
        Command::Check => {
            println!("✅ Configuration is valid");
            println!("   Config file : {}", config_path.display());
            println!("   API address : {}", config.api_address());
            println!("   Log level   : {}", config.logging.level);
            println!("   Plans       : {}", rating.plan_count());
        }

        Command::Plans => {
            println!("{:<28} {:<8} INCLUDED", "NAME", "CODE");
            for plan in rating.list_plans() {
                println!("{:<28} {:<8} {} KB", plan.name(), plan.code(), plan.included_kb());
            }
        }

        Command::Describe { name } => {
            println!("{}", rating.describe_plan(&name)?);
        }

        Command::Quote { plan, bytes, json } => {
            let quote = rating.quote(&plan, bytes)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                let bd = &quote.breakdown;
                println!("Plan     : {} ({})", quote.plan_name, quote.plan_code);
                println!("Usage    : {} bytes ({} KB)", bd.usage_bytes, bd.usage_kb);
                println!("Included : {} KB", bd.included_kb);
                println!("Overage  : {} KB", bd.overage_kb);
                println!("Tier 1   : {} KB -> ${}", bd.tier1_kb, bd.tier1_charge);
                println!("Tier 2   : {} KB -> ${}", bd.tier2_kb, bd.tier2_charge);
                println!("Tier 3   : {} KB -> ${}", bd.tier3_kb, bd.tier3_charge);
                println!("Total    : {}", bd.format_total());
            }
        }
    }

    Ok(())
}
