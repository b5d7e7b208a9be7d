//! # Account State
//!
//! Decoders for the two account kinds the curve engine consumes.

pub mod layout;
pub mod pool_config;
pub mod virtual_pool;

pub use layout::{AccountRecord, FieldInfo, LayoutField, LayoutReader, LayoutTable, LayoutWriter};
pub use pool_config::*;
pub use virtual_pool::*;

use crate::constants::{DISCRIMINATOR_LEN, POOL_CONFIG_DISCRIMINATOR, VIRTUAL_POOL_DISCRIMINATOR};
use crate::errors::CoreResult;

/// Account kinds recognised by discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum AccountKind {
    PoolConfig,
    VirtualPool,
}

impl AccountKind {
    /// Determine account kind from the leading discriminator
    pub fn from_discriminator(data: &[u8]) -> Option<Self> {
        match data.get(..DISCRIMINATOR_LEN)? {
            tag if tag == POOL_CONFIG_DISCRIMINATOR => Some(Self::PoolConfig),
            tag if tag == VIRTUAL_POOL_DISCRIMINATOR => Some(Self::VirtualPool),
            _ => None,
        }
    }

    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            Self::PoolConfig => POOL_CONFIG_DISCRIMINATOR,
            Self::VirtualPool => VIRTUAL_POOL_DISCRIMINATOR,
        }
    }

    /// Full account length including the discriminator
    pub fn account_len(&self) -> usize {
        match self {
            Self::PoolConfig => PoolConfig::ACCOUNT_LEN,
            Self::VirtualPool => VirtualPool::ACCOUNT_LEN,
        }
    }

    /// Leaf fields of the account with absolute offsets
    pub fn layout(&self) -> Vec<FieldInfo> {
        match self {
            Self::PoolConfig => PoolConfig::layout(),
            Self::VirtualPool => VirtualPool::layout(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PoolConfig => "pool_config",
            Self::VirtualPool => "virtual_pool",
        }
    }
}

/// Ordered field table of an account kind
pub fn layout_of(kind: AccountKind) -> Vec<FieldInfo> {
    kind.layout()
}

/// Decode a pool config and check its curve ordering
pub fn decode_pool_config(data: &[u8]) -> CoreResult<PoolConfig> {
    let config = PoolConfig::decode(data)?;
    config.validate_curve()?;
    Ok(config)
}

/// Decode a virtual pool snapshot
pub fn decode_virtual_pool(data: &[u8]) -> CoreResult<VirtualPool> {
    VirtualPool::decode(data)
}

// Custom serde module for Pubkey
#[cfg(feature = "client")]
pub(crate) mod pubkey_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use solana_program::pubkey::Pubkey;
    use std::str::FromStr;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_from_discriminator() {
        let mut data = POOL_CONFIG_DISCRIMINATOR.to_vec();
        data.extend_from_slice(&[0u8; 16]);
        assert_eq!(AccountKind::from_discriminator(&data), Some(AccountKind::PoolConfig));

        assert_eq!(
            AccountKind::from_discriminator(&VIRTUAL_POOL_DISCRIMINATOR),
            Some(AccountKind::VirtualPool)
        );
        assert_eq!(AccountKind::from_discriminator(&[1, 2, 3, 4, 5, 6, 7, 8]), None);
        assert_eq!(AccountKind::from_discriminator(&[26, 108, 14]), None);
    }

    #[test]
    fn test_account_kind_metadata() {
        assert_eq!(AccountKind::PoolConfig.account_len(), 1048);
        assert_eq!(AccountKind::VirtualPool.account_len(), 424);
        assert_eq!(
            AccountKind::VirtualPool.discriminator(),
            VIRTUAL_POOL_DISCRIMINATOR
        );
        assert_eq!(layout_of(AccountKind::PoolConfig).len(), PoolConfig::layout().len());
    }
}
