// Account decoding commands

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use dbc_core::{AccountKind, PoolConfig, VirtualPool};
use serde::Serialize;

use super::utils::{decode_config, decode_pool, load_checked, load_pool_config, load_virtual_pool, print_json};
use crate::config::DbcCliConfig;

/// Decoded account of whichever kind the file held
#[derive(Serialize)]
#[serde(untagged)]
enum DecodedAccount {
    PoolConfig(Box<PoolConfig>),
    VirtualPool(Box<VirtualPool>),
}

#[derive(Serialize)]
struct Inspection {
    kind: &'static str,
    address: Option<String>,
    account: DecodedAccount,
}

#[derive(Args)]
pub struct AccountCmd {
    /// Account file: raw bytes, base64 text, or `solana account --output json`
    pub file: PathBuf,
}

/// Print a decoded pool config
pub fn show_config(cmd: AccountCmd, config: &DbcCliConfig) -> Result<()> {
    let pool_config = load_pool_config(&cmd.file, config)?;
    log::info!(
        "Pool config: quote mint {}, {} curve segments",
        pool_config.quote_mint,
        pool_config.populated_curve().len()
    );
    print_json(&pool_config, config)
}

/// Print a decoded virtual pool
pub fn show_pool(cmd: AccountCmd, config: &DbcCliConfig) -> Result<()> {
    let pool = load_virtual_pool(&cmd.file, config)?;
    log::info!(
        "Virtual pool: config {}, base mint {}, curve complete: {}",
        pool.config,
        pool.base_mint,
        pool.is_curve_complete()
    );
    print_json(&pool, config)
}

/// Print claimable and lifetime fees of a virtual pool
pub fn fee_metrics(cmd: AccountCmd, config: &DbcCliConfig) -> Result<()> {
    let pool = load_virtual_pool(&cmd.file, config)?;
    print_json(&pool.fee_metrics(), config)
}

/// Detect the account kind and print the decoded record
pub fn inspect(cmd: AccountCmd, config: &DbcCliConfig) -> Result<()> {
    let file = load_checked(&cmd.file, config)?;

    let kind = match AccountKind::from_discriminator(&file.data) {
        Some(kind) => kind,
        None => bail!(
            "{} does not hold a pool config or virtual pool account",
            cmd.file.display()
        ),
    };
    log::info!("Detected {} account ({} bytes)", kind.name(), file.data.len());

    // u128 fields exceed serde_json::Value's range, so serialize the record directly
    let account = match kind {
        AccountKind::PoolConfig => DecodedAccount::PoolConfig(Box::new(decode_config(&file, config)?)),
        AccountKind::VirtualPool => DecodedAccount::VirtualPool(Box::new(decode_pool(&file)?)),
    };

    print_json(
        &Inspection {
            kind: kind.name(),
            address: file.address.map(|address| address.to_string()),
            account,
        },
        config,
    )
}
