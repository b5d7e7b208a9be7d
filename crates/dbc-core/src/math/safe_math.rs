//! # Safe Math Operations
//!
//! Checked arithmetic over arbitrary-precision integers. Nothing here can
//! overflow; the checks cover negative results and zero divisors.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::{CoreResult, DbcCoreError};
use crate::math::scaled::ScaledInteger;

pub fn add(a: &BigUint, b: &BigUint) -> BigUint {
    a + b
}

/// Fails with `Underflow` when `b > a`
pub fn sub(a: &BigUint, b: &BigUint) -> CoreResult<BigUint> {
    if b > a {
        return Err(DbcCoreError::Underflow);
    }
    Ok(a - b)
}

pub fn mul(a: &BigUint, b: &BigUint) -> BigUint {
    a * b
}

/// Truncating division with zero check
pub fn div(a: &BigUint, b: &BigUint) -> CoreResult<BigUint> {
    if b.is_zero() {
        return Err(DbcCoreError::DivideByZero);
    }
    Ok(a / b)
}

/// Remainder with zero check
pub fn modulo(a: &BigUint, b: &BigUint) -> CoreResult<BigUint> {
    if b.is_zero() {
        return Err(DbcCoreError::DivideByZero);
    }
    Ok(a % b)
}

pub fn shl(a: &BigUint, bits: u32) -> BigUint {
    a << bits
}

pub fn shr(a: &BigUint, bits: u32) -> BigUint {
    a >> bits
}

/// `base^exponent` for a scaled base, by binary exponentiation.
///
/// Every product is divided by one scaling factor so the running value stays
/// in Q64. A negative exponent inverts the positive result against `2^128`.
/// With `keep_scaled` false the result is divided by the scaling factor once
/// more before it is returned.
///
/// `exponent == 0` and `base == 1.0` both return scaled one, and `base == 0`
/// returns zero, before the descaling step.
pub fn pow(base: &ScaledInteger, exponent: i64, keep_scaled: bool) -> CoreResult<BigUint> {
    let one = ScaledInteger::one().into_raw();

    if exponent == 0 {
        return Ok(one);
    }
    if base.is_zero() {
        return Ok(BigUint::zero());
    }
    if *base.raw() == one {
        return Ok(one);
    }

    let mut result = one.clone();
    let mut current = base.raw().clone();
    let mut remaining = exponent.unsigned_abs();

    while remaining != 0 {
        if remaining & 1 == 1 {
            result = div(&mul(&result, &current), &one)?;
        }
        current = div(&mul(&current, &current), &one)?;
        remaining >>= 1;
    }

    if exponent < 0 {
        result = div(&mul(&one, &one), &result)?;
    }

    if keep_scaled {
        Ok(result)
    } else {
        div(&result, &one)
    }
}

/// [`pow`] keeping the result in Q64
pub fn pow_scaled(base: &ScaledInteger, exponent: i64) -> CoreResult<ScaledInteger> {
    pow(base, exponent, true).map(ScaledInteger::from_raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::Q64;

    fn big(value: u128) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn test_sub_underflow() {
        assert_eq!(sub(&big(5), &big(3)).unwrap(), big(2));
        assert_eq!(sub(&big(5), &big(5)).unwrap(), big(0));
        assert_eq!(sub(&big(3), &big(5)), Err(DbcCoreError::Underflow));
    }

    #[test]
    fn test_div_and_mod_by_zero() {
        assert_eq!(div(&big(10), &big(0)), Err(DbcCoreError::DivideByZero));
        assert_eq!(modulo(&big(10), &big(0)), Err(DbcCoreError::DivideByZero));
        assert_eq!(div(&big(10), &big(3)).unwrap(), big(3));
        assert_eq!(modulo(&big(10), &big(3)).unwrap(), big(1));
    }

    #[test]
    fn test_no_overflow_past_u128() {
        let max = big(u128::MAX);
        let product = mul(&max, &max);
        assert_eq!(shr(&product, 128), big(u128::MAX - 1));
        assert_eq!(add(&max, &big(1)), shl(&big(1), 128));
    }

    #[test]
    fn test_pow_zero_exponent() {
        for base in [0u128, 1, Q64, 3 * Q64 / 2, u128::MAX] {
            let base = ScaledInteger::from_u128(base);
            assert_eq!(pow(&base, 0, true).unwrap(), big(Q64));
            assert_eq!(pow(&base, 0, false).unwrap(), big(Q64));
        }
    }

    #[test]
    fn test_pow_zero_base() {
        let zero = ScaledInteger::zero();
        assert_eq!(pow(&zero, 5, true).unwrap(), big(0));
        assert_eq!(pow(&zero, -5, true).unwrap(), big(0));
    }

    #[test]
    fn test_pow_one_base() {
        let one = ScaledInteger::one();
        assert_eq!(pow(&one, 7, true).unwrap(), big(Q64));
        assert_eq!(pow(&one, -7, false).unwrap(), big(Q64));
    }

    #[test]
    fn test_pow_positive_exponent() {
        // 2.0^10 = 1024.0
        let two = ScaledInteger::from_u128(2 * Q64);
        assert_eq!(pow(&two, 10, true).unwrap(), big(1024 * Q64));
        assert_eq!(pow(&two, 10, false).unwrap(), big(1024));

        // 1.5^2 = 2.25
        let one_and_half = ScaledInteger::from_u128(3 * Q64 / 2);
        assert_eq!(pow(&one_and_half, 2, true).unwrap(), big(9 * Q64 / 4));
    }

    #[test]
    fn test_pow_negative_exponent() {
        // 2.0^-2 = 0.25
        let two = ScaledInteger::from_u128(2 * Q64);
        assert_eq!(pow(&two, -2, true).unwrap(), big(Q64 / 4));
        assert_eq!(pow(&two, -2, false).unwrap(), big(0));
    }

    #[test]
    fn test_pow_inverse_underflows_to_divide_by_zero() {
        // 2^-40 squared is below Q64 precision, so the inverse divides by zero
        let tiny = ScaledInteger::from_u128(1u128 << 24);
        assert_eq!(pow(&tiny, -4, true), Err(DbcCoreError::DivideByZero));
    }

    #[test]
    fn test_pow_scaled_wraps_result() {
        let two = ScaledInteger::from_u128(2 * Q64);
        assert_eq!(pow_scaled(&two, 3).unwrap(), ScaledInteger::from_u128(8 * Q64));
    }
}
