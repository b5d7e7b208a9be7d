//! # DBC Core - Off-chain Curve Mirror
//!
//! This crate mirrors the pricing math of the dynamic bonding curve program
//! and decodes its account layouts. It provides:
//!
//! - Checked fixed-point arithmetic over arbitrary-precision integers
//! - Account codecs for the pool config and virtual pool records
//! - Curve traversal for quote reserve at a target sqrt price
//! - Read-only analytics (fee metrics, curve progress)
//!
//! Everything here is pure and synchronous. Fetching account bytes is left
//! to the caller.
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization for off-chain use

pub mod constants;
pub mod errors;
pub mod math;
pub mod state;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CoreResult, DbcCoreError};
pub use math::{quote_reserve_for_price, Rounding, ScaledInteger};
pub use state::{decode_pool_config, decode_virtual_pool, AccountKind, PoolConfig, VirtualPool};
