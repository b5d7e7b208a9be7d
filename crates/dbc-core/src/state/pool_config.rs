//! # Pool Config Account
//!
//! Curve configuration shared by every pool launched from it: fee schedule,
//! migration thresholds, vesting, and the 20-point liquidity curve.

use solana_program::pubkey::Pubkey;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

use crate::account_layout;
use crate::constants::{MAX_CURVE_POINT, POOL_CONFIG_DISCRIMINATOR};
use crate::errors::{CoreResult, DbcCoreError};
use crate::math::ScaledInteger;
use crate::state::layout::AccountRecord;

account_layout! {
    /// Time-based base fee schedule
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct BaseFeeConfig {
        pub cliff_fee_numerator: u64,
        pub period_frequency: u64,
        pub reduction_factor: u64,
        pub number_of_period: u16,
        pub fee_scheduler_mode: u8,
        pub padding_0: [u8; 5],
    }
}

account_layout! {
    /// Volatility-driven fee parameters
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct DynamicFeeConfig {
        pub initialized: u8,
        pub padding: [u8; 7],
        pub max_volatility_accumulator: u32,
        pub variable_fee_control: u32,
        pub bin_step: u16,
        pub filter_period: u16,
        pub decay_period: u16,
        pub reduction_factor: u16,
        pub padding_2: [u8; 8],
        pub bin_step_u128: u128,
    }
}

account_layout! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct PoolFeesConfig {
        pub base_fee: BaseFeeConfig,
        pub dynamic_fee: DynamicFeeConfig,
        pub padding_0: [u64; 5],
        pub padding_1: [u8; 6],
        pub protocol_fee_percent: u8,
        pub referral_fee_percent: u8,
    }
}

account_layout! {
    /// One curve segment: liquidity in force up to `sqrt_price`
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct LiquidityDistributionConfig {
        /// Upper sqrt price bound of the segment, Q64
        pub sqrt_price: u128,
        /// Liquidity of the segment, Q64
        pub liquidity: u128,
    }
}

account_layout! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct LockedVestingConfig {
        pub amount_per_period: u64,
        pub cliff_duration_from_migration_time: u64,
        pub frequency: u64,
        pub number_of_period: u64,
        pub cliff_unlock_amount: u64,
        pub padding: u64,
    }
}

account_layout! {
    /// Decoded pool config account
    #[derive(Debug, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
    pub struct PoolConfig {
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub quote_mint: Pubkey,
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub fee_claimer: Pubkey,
        #[cfg_attr(feature = "client", serde(with = "crate::state::pubkey_serde"))]
        pub leftover_receiver: Pubkey,
        pub pool_fees: PoolFeesConfig,
        pub collect_fee_mode: u8,
        pub migration_option: u8,
        pub activation_type: u8,
        pub token_decimal: u8,
        pub version: u8,
        pub token_type: u8,
        pub quote_token_flag: u8,
        pub partner_locked_lp_percentage: u8,
        pub partner_lp_percentage: u8,
        pub creator_locked_lp_percentage: u8,
        pub creator_lp_percentage: u8,
        pub migration_fee_option: u8,
        pub fixed_token_supply_flag: u8,
        pub creator_trading_fee_percentage: u8,
        pub padding_0: [u8; 2],
        pub padding_1: [u8; 8],
        pub swap_base_amount: u64,
        pub migration_quote_threshold: u64,
        pub migration_base_threshold: u64,
        pub migration_sqrt_price: u128,
        pub locked_vesting_config: LockedVestingConfig,
        pub pre_migration_token_supply: u64,
        pub post_migration_token_supply: u64,
        pub padding_2: [u128; 2],
        pub sqrt_start_price: u128,
        pub curve: [LiquidityDistributionConfig; MAX_CURVE_POINT],
    }
}

impl AccountRecord for PoolConfig {
    const DISCRIMINATOR: [u8; 8] = POOL_CONFIG_DISCRIMINATOR;
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            quote_mint: Pubkey::default(),
            fee_claimer: Pubkey::default(),
            leftover_receiver: Pubkey::default(),
            pool_fees: PoolFeesConfig::default(),
            collect_fee_mode: 0,
            migration_option: 0,
            activation_type: 0,
            token_decimal: 0,
            version: 0,
            token_type: 0,
            quote_token_flag: 0,
            partner_locked_lp_percentage: 0,
            partner_lp_percentage: 0,
            creator_locked_lp_percentage: 0,
            creator_lp_percentage: 0,
            migration_fee_option: 0,
            fixed_token_supply_flag: 0,
            creator_trading_fee_percentage: 0,
            padding_0: [0; 2],
            padding_1: [0; 8],
            swap_base_amount: 0,
            migration_quote_threshold: 0,
            migration_base_threshold: 0,
            migration_sqrt_price: 0,
            locked_vesting_config: LockedVestingConfig::default(),
            pre_migration_token_supply: 0,
            post_migration_token_supply: 0,
            padding_2: [0; 2],
            sqrt_start_price: 0,
            curve: [LiquidityDistributionConfig::default(); MAX_CURVE_POINT],
        }
    }
}

impl LiquidityDistributionConfig {
    pub fn sqrt_price_scaled(&self) -> ScaledInteger {
        ScaledInteger::from_u128(self.sqrt_price)
    }

    pub fn liquidity_scaled(&self) -> ScaledInteger {
        ScaledInteger::from_u128(self.liquidity)
    }

    /// Unused trailing entries are all zero
    pub fn is_empty(&self) -> bool {
        self.sqrt_price == 0 && self.liquidity == 0
    }
}

impl PoolConfig {
    /// Decode without checking curve ordering
    pub fn decode_unchecked(data: &[u8]) -> CoreResult<Self> {
        <Self as AccountRecord>::decode(data)
    }

    pub fn sqrt_start_price_scaled(&self) -> ScaledInteger {
        ScaledInteger::from_u128(self.sqrt_start_price)
    }

    /// Segments up to the first zero upper bound
    pub fn populated_curve(&self) -> &[LiquidityDistributionConfig] {
        let end = self
            .curve
            .iter()
            .position(|point| point.sqrt_price == 0)
            .unwrap_or(MAX_CURVE_POINT);
        &self.curve[..end]
    }

    /// Upper bound of the last populated segment, or the start price for an
    /// empty curve
    pub fn max_sqrt_price(&self) -> u128 {
        self.populated_curve()
            .last()
            .map(|point| point.sqrt_price)
            .unwrap_or(self.sqrt_start_price)
    }

    /// Check `sqrt_start_price <= curve[0].sqrt_price <= curve[1].sqrt_price ...`
    /// over the populated prefix, and that every entry after it is empty.
    pub fn validate_curve(&self) -> CoreResult<()> {
        let mut previous = self.sqrt_start_price;
        let mut exhausted = false;

        for (index, point) in self.curve.iter().enumerate() {
            if exhausted {
                if !point.is_empty() {
                    return Err(DbcCoreError::curve_ordering(
                        index,
                        "populated segment after end of curve",
                    ));
                }
                continue;
            }

            if point.sqrt_price == 0 {
                if point.liquidity != 0 {
                    return Err(DbcCoreError::curve_ordering(
                        index,
                        "liquidity without an upper bound",
                    ));
                }
                exhausted = true;
                continue;
            }

            if point.sqrt_price < previous {
                return Err(DbcCoreError::curve_ordering(
                    index,
                    "upper bound below previous bound",
                ));
            }
            previous = point.sqrt_price;
        }

        Ok(())
    }
}
