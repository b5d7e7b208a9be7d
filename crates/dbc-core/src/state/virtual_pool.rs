//! # Virtual Pool Account
//!
//! Live state of a pool trading on its bonding curve.

use solana_program::pubkey::Pubkey;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

use crate::account_layout;
use crate::constants::VIRTUAL_POOL_DISCRIMINATOR;
use crate::math::ScaledInteger;
use crate::state::layout::AccountRecord;

account_layout! {
    /// Volatility state feeding the dynamic fee
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct VolatilityTracker {
        pub last_update_timestamp: u64,
        pub padding: [u8; 8],
        pub sqrt_price_reference: u128,
        pub volatility_accumulator: u128,
        pub volatility_reference: u128,
    }
}

account_layout! {
    /// Lifetime fee totals
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct PoolMetrics {
        pub total_protocol_base_fee: u64,
        pub total_protocol_quote_fee: u64,
        pub total_trading_base_fee: u64,
        pub total_trading_quote_fee: u64,
    }
}

account_layout! {
    /// Decoded virtual pool account
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct VirtualPool {
        pub volatility_tracker: VolatilityTracker,
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub config: Pubkey,
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub creator: Pubkey,
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub base_mint: Pubkey,
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub base_vault: Pubkey,
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub quote_vault: Pubkey,
        pub base_reserve: u64,
        pub quote_reserve: u64,
        pub protocol_base_fee: u64,
        pub protocol_quote_fee: u64,
        pub partner_base_fee: u64,
        pub partner_quote_fee: u64,
        /// Current sqrt price, Q64
        pub sqrt_price: u128,
        pub activation_point: u64,
        pub pool_type: u8,
        pub is_migrated: u8,
        pub is_partner_withdraw_surplus: u8,
        pub is_protocol_withdraw_surplus: u8,
        pub migration_progress: u8,
        pub is_withdraw_leftover: u8,
        pub is_creator_withdraw_surplus: u8,
        pub migration_fee_withdraw_status: u8,
        pub metrics: PoolMetrics,
        pub finish_curve_timestamp: u64,
        pub creator_base_fee: u64,
        pub creator_quote_fee: u64,
        pub padding_1: [u64; 7],
    }
}

impl AccountRecord for VirtualPool {
    const DISCRIMINATOR: [u8; 8] = VIRTUAL_POOL_DISCRIMINATOR;
}

/// Fees not yet claimed, per recipient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct CurrentFees {
    pub protocol_base_fee: u64,
    pub protocol_quote_fee: u64,
    pub partner_base_fee: u64,
    pub partner_quote_fee: u64,
    pub creator_base_fee: u64,
    pub creator_quote_fee: u64,
}

/// Fees collected over the pool's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TotalFees {
    pub total_trading_base_fee: u64,
    pub total_trading_quote_fee: u64,
}

/// Claimable and lifetime fee figures of a pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolFeeMetrics {
    pub current: CurrentFees,
    pub total: TotalFees,
}

impl VirtualPool {
    pub fn sqrt_price_scaled(&self) -> ScaledInteger {
        ScaledInteger::from_u128(self.sqrt_price)
    }

    pub fn is_migrated(&self) -> bool {
        self.is_migrated != 0
    }

    /// Whether trading on the curve has completed
    pub fn is_curve_complete(&self) -> bool {
        self.finish_curve_timestamp != 0
    }

    pub fn fee_metrics(&self) -> PoolFeeMetrics {
        PoolFeeMetrics {
            current: CurrentFees {
                protocol_base_fee: self.protocol_base_fee,
                protocol_quote_fee: self.protocol_quote_fee,
                partner_base_fee: self.partner_base_fee,
                partner_quote_fee: self.partner_quote_fee,
                creator_base_fee: self.creator_base_fee,
                creator_quote_fee: self.creator_quote_fee,
            },
            total: TotalFees {
                total_trading_base_fee: self.metrics.total_trading_base_fee,
                total_trading_quote_fee: self.metrics.total_trading_quote_fee,
            },
        }
    }
}
