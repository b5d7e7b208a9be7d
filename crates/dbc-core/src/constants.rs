//! # Protocol Constants
//!
//! Fixed-point resolution, curve limits, and account discriminators.

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Number of fractional bits in every scaled value
pub const RESOLUTION: u32 = 64;

/// Q64 fixed-point scale factor: 2^64
pub const Q64: u128 = 1u128 << RESOLUTION;

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

// ============================================================================
// Curve Constants
// ============================================================================

/// Number of liquidity segments stored in every pool config
pub const MAX_CURVE_POINT: usize = 20;

// ============================================================================
// Account Constants
// ============================================================================

/// Length of the account-type tag prefixed to every account
pub const DISCRIMINATOR_LEN: usize = 8;

/// Discriminator of the pool config account
pub const POOL_CONFIG_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [26, 108, 14, 123, 116, 230, 129, 43];

/// Discriminator of the virtual pool account
pub const VIRTUAL_POOL_DISCRIMINATOR: [u8; DISCRIMINATOR_LEN] = [213, 224, 5, 209, 98, 69, 119, 92];
