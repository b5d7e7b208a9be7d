//! # Core Error Types
//!
//! Errors raised by the fixed-point math, the account codecs, and the curve
//! engine. None of them are recovered inside this crate.

use thiserror::Error;

/// Core errors shared by every component of the crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub enum DbcCoreError {
    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math underflow")]
    Underflow,

    #[error("Division by zero")]
    DivideByZero,

    #[error("Value does not fit in {0}")]
    Overflow(&'static str),

    // ========================================================================
    // Decode Errors
    // ========================================================================

    #[error("Truncated data: expected at least {expected} bytes, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("Invalid discriminator: expected {expected:?}, found {found:?}")]
    InvalidDiscriminator { expected: [u8; 8], found: [u8; 8] },

    #[error("Failed to read {field} at offset {offset}: need {needed} bytes, {remaining} remaining")]
    FieldReadError {
        field: String,
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Curve ordering violation at segment {index}: {reason}")]
    CurveOrderingViolation { index: usize, reason: &'static str },
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, DbcCoreError>;

// Helper functions for creating specific errors
impl DbcCoreError {
    /// Create a truncated data error
    pub fn truncated(expected: usize, actual: usize) -> Self {
        Self::TruncatedData { expected, actual }
    }

    /// Create a curve ordering error for the given segment
    pub fn curve_ordering(index: usize, reason: &'static str) -> Self {
        Self::CurveOrderingViolation { index, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = DbcCoreError::truncated(1048, 12);
        assert_eq!(
            format!("{}", err),
            "Truncated data: expected at least 1048 bytes, got 12"
        );

        let err = DbcCoreError::curve_ordering(3, "upper bound below previous bound");
        assert_eq!(
            format!("{}", err),
            "Curve ordering violation at segment 3: upper bound below previous bound"
        );
    }

    #[test]
    fn test_field_read_error_names_field() {
        let err = DbcCoreError::FieldReadError {
            field: "curve[4].liquidity".to_string(),
            offset: 600,
            needed: 8,
            remaining: 3,
        };
        assert!(format!("{}", err).contains("curve[4].liquidity"));
    }
}
