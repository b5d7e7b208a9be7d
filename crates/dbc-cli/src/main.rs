// Offline inspector for dynamic bonding curve accounts
//
// Decodes pool config and virtual pool account dumps and evaluates the
// curve math against them. Fetching accounts is left to other tools.

mod commands;
mod config;
mod input;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::DbcCliConfig;

#[derive(Parser)]
#[command(name = "dbc")]
#[command(about = "Dynamic bonding curve account inspector", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to inspector configuration file
    #[arg(short, long, default_value = "dbc.toml")]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a pool config account
    Config(commands::account::AccountCmd),

    /// Decode a virtual pool account
    Pool(commands::account::AccountCmd),

    /// Show claimable and lifetime fees of a virtual pool
    FeeMetrics(commands::account::AccountCmd),

    /// Detect the account kind and decode it
    Inspect(commands::account::AccountCmd),

    /// Quote reserve implied by the curve at a sqrt price
    QuoteReserve(commands::curve::QuoteReserveCmd),

    /// Progress of a pool toward its migration threshold
    Progress(commands::curve::ProgressCmd),

    /// Convert between a raw sqrt price and a decimal-adjusted price
    Price(commands::curve::PriceCmd),

    /// Print the byte layout of an account kind
    Layout(commands::layout::LayoutCmd),

    /// Write a configuration file with default values
    InitConfig {
        /// Destination path
        #[arg(default_value = "dbc.toml")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .init();

    if let Commands::InitConfig { path } = &cli.command {
        DbcCliConfig::default().save(path)?;
        log::info!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    let config = DbcCliConfig::load_or_default(&cli.config)?;
    log::debug!("Program id: {}", config.program_id);

    match cli.command {
        Commands::Config(cmd) => commands::account::show_config(cmd, &config),
        Commands::Pool(cmd) => commands::account::show_pool(cmd, &config),
        Commands::FeeMetrics(cmd) => commands::account::fee_metrics(cmd, &config),
        Commands::Inspect(cmd) => commands::account::inspect(cmd, &config),
        Commands::QuoteReserve(cmd) => commands::curve::quote_reserve(cmd, &config),
        Commands::Progress(cmd) => commands::curve::progress(cmd, &config),
        Commands::Price(cmd) => commands::curve::price(cmd, &config),
        Commands::Layout(cmd) => commands::layout::execute(cmd, &config),
        Commands::InitConfig { .. } => Ok(()),
    }
}
