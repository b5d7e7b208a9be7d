//! Sqrt price conversions for display

use crate::constants::Q64;

/// Convert a Q64 sqrt price to the price of one base token in quote tokens,
/// adjusted for token decimals
pub fn sqrt_price_to_price(sqrt_price: u128, base_decimals: u8, quote_decimals: u8) -> f64 {
    let sqrt_price_float = sqrt_price as f64 / Q64 as f64;
    let decimal_shift = 10f64.powi(base_decimals as i32 - quote_decimals as i32);

    sqrt_price_float * sqrt_price_float * decimal_shift
}

/// Convert a decimal-adjusted price to a Q64 sqrt price
pub fn price_to_sqrt_price(price: f64, base_decimals: u8, quote_decimals: u8) -> u128 {
    let decimal_shift = 10f64.powi(base_decimals as i32 - quote_decimals as i32);
    let raw_price = price / decimal_shift;

    (raw_price.sqrt() * Q64 as f64) as u128
}
