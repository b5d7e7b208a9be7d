//! # Scaled Integers
//!
//! Q64 fixed-point values over arbitrary-precision integers. A raw value `v`
//! stands for `v / 2^RESOLUTION`.

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigUint, ParseBigIntError};
use num_traits::{One, ToPrimitive, Zero};

use crate::constants::RESOLUTION;
use crate::errors::{CoreResult, DbcCoreError};

/// Fixed-point value with `RESOLUTION` fractional bits
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaledInteger(BigUint);

impl ScaledInteger {
    /// Wrap a value that is already scaled
    pub fn from_raw(raw: BigUint) -> Self {
        Self(raw)
    }

    /// Wrap a scaled value as stored on-chain
    pub fn from_u128(raw: u128) -> Self {
        Self(BigUint::from(raw))
    }

    /// Scale an integer: `value << RESOLUTION`
    pub fn from_integer(value: &BigUint) -> Self {
        Self(value << RESOLUTION)
    }

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// `1.0`, i.e. `2^RESOLUTION`
    pub fn one() -> Self {
        Self(BigUint::one() << RESOLUTION)
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn into_raw(self) -> BigUint {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Drop the fractional bits
    pub fn to_integer_floor(&self) -> BigUint {
        &self.0 >> RESOLUTION
    }

    /// Raw value as `u128`, as stored on-chain
    pub fn to_u128(&self) -> CoreResult<u128> {
        self.0.to_u128().ok_or(DbcCoreError::Overflow("u128"))
    }

    /// Approximate decimal value, for display only
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::INFINITY) / 2f64.powi(RESOLUTION as i32)
    }
}

impl From<u128> for ScaledInteger {
    fn from(raw: u128) -> Self {
        Self::from_u128(raw)
    }
}

/// Displays the raw scaled value
impl fmt::Display for ScaledInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a raw scaled value in decimal
impl FromStr for ScaledInteger {
    type Err = ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s.trim()).map(Self)
    }
}

#[cfg(feature = "client")]
impl serde::Serialize for ScaledInteger {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&self.0)
    }
}
