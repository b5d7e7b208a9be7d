use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;

/// Mainnet dynamic bonding curve program
pub const DEFAULT_PROGRAM_ID: Pubkey = solana_program::pubkey!("dbcij3LWUppWqq96dh6gJWwBifmcGfLSB5D4DuSMaqN");

/// Inspector configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DbcCliConfig {
    /// Program expected to own every inspected account
    #[serde(with = "pubkey_serde")]
    pub program_id: Pubkey,

    /// Pretty-print JSON output
    pub pretty_json: bool,

    /// Reject pool configs whose curve bounds are out of order
    pub validate_curve: bool,

    /// Quote token decimals used for price display
    pub quote_decimals: u8,
}

impl DbcCliConfig {
    /// Load configuration from TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: DbcCliConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.program_id == Pubkey::default() {
            bail!("Invalid program_id: must not be the default (all-zero) key");
        }

        if self.quote_decimals > 18 {
            bail!(
                "Invalid quote_decimals: {} (expected at most 18)",
                self.quote_decimals
            );
        }

        Ok(())
    }
}

impl Default for DbcCliConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            pretty_json: true,
            validate_curve: true,
            quote_decimals: 9,
        }
    }
}

// Custom serde module for Pubkey
mod pubkey_serde {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&pubkey.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}
