//! # Mathematical Functions
//!
//! Fixed-point arithmetic and curve traversal.

pub mod big_int;
pub mod curve;
pub mod price;
pub mod safe_math;
pub mod scaled;

// Re-export commonly used functions
pub use big_int::*;
pub use curve::*;
pub use price::*;
pub use safe_math::*;
pub use scaled::*;
