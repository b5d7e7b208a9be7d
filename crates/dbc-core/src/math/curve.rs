//! # Curve Math
//!
//! Quote-token amounts implied by the piecewise liquidity curve of a pool
//! config.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

#[cfg(feature = "client")]
use serde::Serialize;

use crate::constants::{BPS_DENOMINATOR, MAX_CURVE_POINT, RESOLUTION};
use crate::errors::{CoreResult, DbcCoreError};
use crate::math::big_int::{div_rounding, Rounding};
use crate::math::safe_math::{add, mul, shl, shr, sub};
use crate::math::scaled::ScaledInteger;
use crate::state::{PoolConfig, VirtualPool};

/// Quote amount for moving through a price range at constant liquidity.
///
/// Formula: `Δquote = L * (√P_upper - √P_lower) / 2^(2 * RESOLUTION)`
///
/// Zero liquidity returns zero without looking at the bounds; otherwise
/// `upper < lower` is an `Underflow`.
pub fn get_delta_amount_quote_unsigned(
    lower_sqrt_price: &ScaledInteger,
    upper_sqrt_price: &ScaledInteger,
    liquidity: &ScaledInteger,
    rounding: Rounding,
) -> CoreResult<BigUint> {
    if liquidity.is_zero() {
        return Ok(BigUint::zero());
    }

    let delta_sqrt_price = sub(upper_sqrt_price.raw(), lower_sqrt_price.raw())?;
    let product = mul(liquidity.raw(), &delta_sqrt_price);

    match rounding {
        Rounding::Up => {
            let denominator = shl(&BigUint::one(), RESOLUTION * 2);
            div_rounding(&product, &denominator, Rounding::Up)
        }
        Rounding::Down => Ok(shr(&product, RESOLUTION * 2)),
    }
}

/// Total quote reserve the curve holds once the price reaches
/// `next_sqrt_price`.
///
/// Every one of the `MAX_CURVE_POINT` segments is visited. A segment adds
/// to the total only when the target lies above its lower bound, and is
/// capped at its own upper bound, so a target past the end of the curve
/// yields the same total as the last bound. Deltas round up. The first
/// arithmetic error aborts the whole sum.
pub fn quote_reserve_for_price(next_sqrt_price: &ScaledInteger, config: &PoolConfig) -> CoreResult<BigUint> {
    let mut total_amount = BigUint::zero();

    for i in 0..MAX_CURVE_POINT {
        let lower_sqrt_price = if i == 0 {
            config.sqrt_start_price_scaled()
        } else {
            config.curve[i - 1].sqrt_price_scaled()
        };

        if *next_sqrt_price > lower_sqrt_price {
            let curve_upper_sqrt_price = config.curve[i].sqrt_price_scaled();
            let upper_sqrt_price = if *next_sqrt_price < curve_upper_sqrt_price {
                next_sqrt_price.clone()
            } else {
                curve_upper_sqrt_price
            };

            let max_amount_in = get_delta_amount_quote_unsigned(
                &lower_sqrt_price,
                &upper_sqrt_price,
                &config.curve[i].liquidity_scaled(),
                Rounding::Up,
            )?;

            total_amount = add(&total_amount, &max_amount_in);
        }
    }

    Ok(total_amount)
}

/// Quote reserve the full curve requires, i.e. the reserve at its last bound
pub fn max_quote_reserve(config: &PoolConfig) -> CoreResult<BigUint> {
    quote_reserve_for_price(&ScaledInteger::from_u128(config.max_sqrt_price()), config)
}

/// How far a pool has moved along its curve toward migration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize))]
pub struct CurveProgress {
    /// Reserve the curve implies at the pool's current sqrt price
    #[cfg_attr(feature = "client", serde(serialize_with = "serialize_biguint"))]
    pub curve_quote_reserve: BigUint,
    /// Reserve recorded in the pool account
    pub quote_reserve: u64,
    pub migration_quote_threshold: u64,
    /// `quote_reserve / migration_quote_threshold`, capped at 100%
    pub progress_bps: u64,
    pub is_migrated: bool,
}

impl CurveProgress {
    /// Progress as a fraction in `[0, 1]`
    pub fn ratio(&self) -> f64 {
        self.progress_bps as f64 / BPS_DENOMINATOR as f64
    }
}

/// Compute the curve progress of a pool against its config
pub fn curve_progress(pool: &VirtualPool, config: &PoolConfig) -> CoreResult<CurveProgress> {
    let curve_quote_reserve = quote_reserve_for_price(&pool.sqrt_price_scaled(), config)?;

    let progress = div_rounding(
        &mul(&BigUint::from(pool.quote_reserve), &BigUint::from(BPS_DENOMINATOR)),
        &BigUint::from(config.migration_quote_threshold),
        Rounding::Down,
    )?;
    let progress_bps = progress
        .to_u64()
        .ok_or(DbcCoreError::Overflow("u64"))?
        .min(BPS_DENOMINATOR);

    Ok(CurveProgress {
        curve_quote_reserve,
        quote_reserve: pool.quote_reserve,
        migration_quote_threshold: config.migration_quote_threshold,
        progress_bps,
        is_migrated: pool.is_migrated(),
    })
}

#[cfg(feature = "client")]
fn serialize_biguint<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Q64;

    fn config_with_curve(start: u128, points: &[(u128, u128)]) -> PoolConfig {
        let mut config = PoolConfig {
            sqrt_start_price: start,
            ..PoolConfig::default()
        };
        for (slot, (sqrt_price, liquidity)) in config.curve.iter_mut().zip(points) {
            slot.sqrt_price = *sqrt_price;
            slot.liquidity = *liquidity;
        }
        config
    }

    fn scaled(value: u128) -> ScaledInteger {
        ScaledInteger::from_u128(value)
    }

    #[test]
    fn test_delta_zero_liquidity_skips_bounds() {
        // Inverted bounds would underflow, but zero liquidity never subtracts
        let delta = get_delta_amount_quote_unsigned(&scaled(Q64), &scaled(0), &scaled(0), Rounding::Up).unwrap();
        assert!(delta.is_zero());
    }

    #[test]
    fn test_delta_inverted_bounds_underflow() {
        let result = get_delta_amount_quote_unsigned(&scaled(2 * Q64), &scaled(Q64), &scaled(Q64), Rounding::Up);
        assert_eq!(result, Err(DbcCoreError::Underflow));
    }

    #[test]
    fn test_delta_rounding() {
        // L = 3.0 over a single raw step of sqrt price leaves a fraction of a unit
        let lower = scaled(Q64);
        let upper = scaled(Q64 + 1);
        let liquidity = scaled(3 * Q64);

        let up = get_delta_amount_quote_unsigned(&lower, &upper, &liquidity, Rounding::Up).unwrap();
        let down = get_delta_amount_quote_unsigned(&lower, &upper, &liquidity, Rounding::Down).unwrap();
        assert_eq!(up, BigUint::one());
        assert!(down.is_zero());
    }

    #[test]
    fn test_delta_exact_product_does_not_round() {
        // L = 2^64, Δ = 2^64 => 2^128 / 2^128 = 1 with either rounding
        let up = get_delta_amount_quote_unsigned(&scaled(Q64), &scaled(2 * Q64), &scaled(Q64), Rounding::Up).unwrap();
        let down =
            get_delta_amount_quote_unsigned(&scaled(Q64), &scaled(2 * Q64), &scaled(Q64), Rounding::Down).unwrap();
        assert_eq!(up, BigUint::one());
        assert_eq!(down, BigUint::one());
    }

    #[test]
    fn test_canonical_single_segment() {
        let config = config_with_curve(0, &[(Q64, Q64)]);
        let total = quote_reserve_for_price(&scaled(Q64 / 2), &config).unwrap();

        // ceil(2^64 * 2^63 / 2^128) = ceil(0.5) = 1
        assert_eq!(total, BigUint::one());
    }

    #[test]
    fn test_target_at_or_below_start_is_zero() {
        let config = config_with_curve(Q64, &[(2 * Q64, 1_000 * Q64), (4 * Q64, 500 * Q64)]);
        assert!(quote_reserve_for_price(&scaled(Q64), &config).unwrap().is_zero());
        assert!(quote_reserve_for_price(&scaled(Q64 / 2), &config).unwrap().is_zero());
    }

    #[test]
    fn test_multi_segment_accumulates() {
        // Segment 0: L = 1000 over [1, 2]  => 1000
        // Segment 1: L = 500 over [2, 3]   => 500 (target stops at 3)
        let config = config_with_curve(Q64, &[(2 * Q64, 1_000 * Q64), (4 * Q64, 500 * Q64)]);
        let total = quote_reserve_for_price(&scaled(3 * Q64), &config).unwrap();
        assert_eq!(total, BigUint::from(1_500u32));
    }

    #[test]
    fn test_saturates_past_last_bound() {
        let config = config_with_curve(Q64, &[(2 * Q64, 1_000 * Q64), (4 * Q64, 500 * Q64)]);
        let at_end = quote_reserve_for_price(&scaled(4 * Q64), &config).unwrap();
        let beyond = quote_reserve_for_price(&scaled(100 * Q64), &config).unwrap();

        assert_eq!(at_end, BigUint::from(2_000u32));
        assert_eq!(beyond, at_end);
        assert_eq!(max_quote_reserve(&config).unwrap(), at_end);
    }

    #[test]
    fn test_non_monotonic_curve_underflows() {
        // Segment 1 bound sits below segment 0 bound: min(target, 1.5) - 2 underflows
        let config = config_with_curve(0, &[(2 * Q64, Q64), (3 * Q64 / 2, Q64)]);
        let result = quote_reserve_for_price(&scaled(3 * Q64), &config);
        assert_eq!(result, Err(DbcCoreError::Underflow));
    }

    #[test]
    fn test_curve_progress() {
        let config = PoolConfig {
            migration_quote_threshold: 2_000,
            ..config_with_curve(Q64, &[(2 * Q64, 1_000 * Q64), (4 * Q64, 500 * Q64)])
        };
        let pool = VirtualPool {
            sqrt_price: 3 * Q64,
            quote_reserve: 1_500,
            ..VirtualPool::default()
        };

        let progress = curve_progress(&pool, &config).unwrap();
        assert_eq!(progress.curve_quote_reserve, BigUint::from(1_500u32));
        assert_eq!(progress.progress_bps, 7_500);
        assert!((progress.ratio() - 0.75).abs() < f64::EPSILON);
        assert!(!progress.is_migrated);
    }

    #[test]
    fn test_curve_progress_caps_and_rejects_zero_threshold() {
        let mut config = PoolConfig {
            migration_quote_threshold: 100,
            ..PoolConfig::default()
        };
        let pool = VirtualPool {
            quote_reserve: 250,
            is_migrated: 1,
            ..VirtualPool::default()
        };

        let progress = curve_progress(&pool, &config).unwrap();
        assert_eq!(progress.progress_bps, BPS_DENOMINATOR);
        assert!(progress.is_migrated);

        config.migration_quote_threshold = 0;
        assert_eq!(curve_progress(&pool, &config), Err(DbcCoreError::DivideByZero));
    }
}
