// Curve computation commands

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use dbc_core::math::{
    curve_progress, max_quote_reserve, price_to_sqrt_price, quote_reserve_for_price, sqrt_price_to_price,
};
use dbc_core::{PoolConfig, ScaledInteger, VirtualPool};
use serde::Serialize;

use super::utils::{decode_config, decode_pool, load_checked, load_pool_config, print_json};
use crate::config::DbcCliConfig;

#[derive(Args)]
pub struct QuoteReserveCmd {
    /// Pool config account file
    #[arg(long)]
    pub config: PathBuf,

    /// Target sqrt price as a raw Q64 integer (defaults to the end of the curve)
    #[arg(long)]
    pub sqrt_price: Option<String>,
}

#[derive(Args)]
pub struct ProgressCmd {
    /// Virtual pool account file
    #[arg(long)]
    pub pool: PathBuf,

    /// Pool config account file
    #[arg(long)]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct PriceCmd {
    /// Sqrt price as a raw Q64 integer
    #[arg(long, conflicts_with = "price")]
    pub sqrt_price: Option<u128>,

    /// Decimal-adjusted price to convert back to a raw Q64 sqrt price
    #[arg(long)]
    pub price: Option<f64>,

    /// Base token decimals
    #[arg(long, default_value = "6")]
    pub base_decimals: u8,

    /// Quote token decimals (defaults to the configured value)
    #[arg(long)]
    pub quote_decimals: Option<u8>,
}

#[derive(Serialize)]
struct QuoteReserveOutput {
    sqrt_price: String,
    quote_reserve: String,
}

#[derive(Serialize)]
struct ProgressOutput {
    #[serde(flatten)]
    progress: dbc_core::math::CurveProgress,
    sqrt_price: String,
    price: f64,
    is_curve_complete: bool,
}

/// Quote reserve the curve implies at a target sqrt price
pub fn quote_reserve(cmd: QuoteReserveCmd, config: &DbcCliConfig) -> Result<()> {
    let pool_config = load_pool_config(&cmd.config, config)?;

    let (sqrt_price, reserve) = match cmd.sqrt_price {
        Some(raw) => {
            let sqrt_price: ScaledInteger = raw
                .parse()
                .with_context(|| format!("Invalid sqrt price '{}'", raw))?;
            let reserve = quote_reserve_for_price(&sqrt_price, &pool_config)
                .context("Failed to compute quote reserve")?;
            (sqrt_price, reserve)
        }
        None => {
            let sqrt_price = ScaledInteger::from_u128(pool_config.max_sqrt_price());
            log::info!("No sqrt price given, using the end of the curve");
            let reserve = max_quote_reserve(&pool_config).context("Failed to compute quote reserve")?;
            (sqrt_price, reserve)
        }
    };

    log::debug!("Sqrt price {} is {:.6} as a decimal", sqrt_price, sqrt_price.to_f64());

    print_json(
        &QuoteReserveOutput {
            sqrt_price: sqrt_price.to_string(),
            quote_reserve: reserve.to_string(),
        },
        config,
    )
}

/// Bonding curve progress of a pool toward migration
pub fn progress(cmd: ProgressCmd, config: &DbcCliConfig) -> Result<()> {
    let pool_file = load_checked(&cmd.pool, config)?;
    let pool = decode_pool(&pool_file).with_context(|| format!("Invalid virtual pool file {}", cmd.pool.display()))?;

    let config_file = load_checked(&cmd.config, config)?;
    if let Some(address) = config_file.address {
        if address != pool.config {
            log::warn!("Pool references config {} but {} was supplied", pool.config, address);
        }
    }
    let pool_config = decode_config(&config_file, config)
        .with_context(|| format!("Invalid pool config file {}", cmd.config.display()))?;

    let output = progress_output(&pool, &pool_config, config)?;
    log::info!(
        "Progress {:.2}% of migration threshold {}",
        output.progress.ratio() * 100.0,
        output.progress.migration_quote_threshold
    );

    print_json(&output, config)
}

fn progress_output(pool: &VirtualPool, pool_config: &PoolConfig, config: &DbcCliConfig) -> Result<ProgressOutput> {
    let progress = curve_progress(pool, pool_config).context("Failed to compute curve progress")?;
    let price = sqrt_price_to_price(pool.sqrt_price, pool_config.token_decimal, config.quote_decimals);

    Ok(ProgressOutput {
        progress,
        sqrt_price: pool.sqrt_price.to_string(),
        price,
        is_curve_complete: pool.is_curve_complete(),
    })
}

/// Convert between a raw sqrt price and a decimal-adjusted price
pub fn price(cmd: PriceCmd, config: &DbcCliConfig) -> Result<()> {
    println!("{}", convert_price(&cmd, config)?);
    Ok(())
}

fn convert_price(cmd: &PriceCmd, config: &DbcCliConfig) -> Result<String> {
    let quote_decimals = cmd.quote_decimals.unwrap_or(config.quote_decimals);

    match (cmd.sqrt_price, cmd.price) {
        (Some(sqrt_price), _) => Ok(sqrt_price_to_price(sqrt_price, cmd.base_decimals, quote_decimals).to_string()),
        (None, Some(price)) => {
            if !price.is_finite() || price < 0.0 {
                bail!("Invalid price {}: expected a finite non-negative number", price);
            }
            Ok(price_to_sqrt_price(price, cmd.base_decimals, quote_decimals).to_string())
        }
        (None, None) => bail!("Either --sqrt-price or --price is required"),
    }
}
