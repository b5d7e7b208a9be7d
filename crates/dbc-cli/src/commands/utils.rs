// Utility functions for CLI commands

use std::path::Path;

use anyhow::{Context, Result};
use dbc_core::{decode_pool_config, decode_virtual_pool, PoolConfig, VirtualPool};
use serde::Serialize;

use crate::config::DbcCliConfig;
use crate::input::{check_owner, load_account_file, AccountFile};

/// Print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T, config: &DbcCliConfig) -> Result<()> {
    let output = if config.pretty_json {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize output")?;

    println!("{}", output);
    Ok(())
}

/// Load an account file and check its owner
pub fn load_checked(path: &Path, config: &DbcCliConfig) -> Result<AccountFile> {
    let file = load_account_file(path)?;
    check_owner(&file, &config.program_id);
    Ok(file)
}

/// Decode a pool config, validating the curve when configured to
pub fn decode_config(file: &AccountFile, config: &DbcCliConfig) -> Result<PoolConfig> {
    let decoded = if config.validate_curve {
        decode_pool_config(&file.data)
    } else {
        PoolConfig::decode_unchecked(&file.data)
    };
    decoded.context("Failed to decode pool config")
}

pub fn decode_pool(file: &AccountFile) -> Result<VirtualPool> {
    decode_virtual_pool(&file.data).context("Failed to decode virtual pool")
}

/// Load and decode a pool config file
pub fn load_pool_config(path: &Path, config: &DbcCliConfig) -> Result<PoolConfig> {
    let file = load_checked(path, config)?;
    decode_config(&file, config).with_context(|| format!("Invalid pool config file {}", path.display()))
}

/// Load and decode a virtual pool file
pub fn load_virtual_pool(path: &Path, config: &DbcCliConfig) -> Result<VirtualPool> {
    let file = load_checked(path, config)?;
    decode_pool(&file).with_context(|| format!("Invalid virtual pool file {}", path.display()))
}
