//! Rounded mul-div over arbitrary-precision integers

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::errors::{CoreResult, DbcCoreError};
use crate::math::safe_math::{add, div, mul, sub};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (truncate)
    Down,
    /// Round up (ceiling)
    Up,
}

/// Divide with the given rounding. `Up` is `(n + d - 1) / d`.
pub fn div_rounding(numerator: &BigUint, denominator: &BigUint, rounding: Rounding) -> CoreResult<BigUint> {
    if denominator.is_zero() {
        return Err(DbcCoreError::DivideByZero);
    }

    match rounding {
        Rounding::Down => div(numerator, denominator),
        Rounding::Up => {
            let denominator_minus_one = sub(denominator, &BigUint::one())?;
            div(&add(numerator, &denominator_minus_one), denominator)
        }
    }
}

/// Multiply two values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div(a: &BigUint, b: &BigUint, denominator: &BigUint, rounding: Rounding) -> CoreResult<BigUint> {
    div_rounding(&mul(a, b), denominator, rounding)
}
