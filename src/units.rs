//! Fixed-point conversion between human decimals and 18-decimal wei integers.
//!
//! Doubles cannot represent most short decimals exactly, so multiplying by
//! `1e18` and casting leaks one-wei drift (`0.46` becomes
//! `460000000000000001`). Conversion instead renders the double with `Display`
//! (the shortest decimal that reparses to the same bits) and assembles the
//! integer from the rendered digits.

use std::num::FpCategory;

use alloy::primitives::U256;

use crate::Result;
use crate::error::Error;

/// One collateral unit / one share, in wei.
pub const WAD: u64 = 1_000_000_000_000_000_000;

/// Number of fractional decimal digits carried by a wei amount.
const FRACTIONAL_DIGITS: usize = 18;

/// Converts a non-negative finite double into its exact 18-decimal wei value.
///
/// Fractional digits beyond the 18th are truncated, never rounded.
pub fn to_wei(value: f64) -> Result<U256> {
    match value.classify() {
        FpCategory::Nan | FpCategory::Infinite => {
            return Err(Error::numeric(format!("{value} is not a finite number")));
        }
        FpCategory::Zero => return Ok(U256::ZERO),
        FpCategory::Normal | FpCategory::Subnormal => {}
    }

    if value.is_sign_negative() {
        return Err(Error::numeric(format!(
            "{value} is negative; wei amounts are unsigned"
        )));
    }

    wei_from_decimal_str(&format!("{value}"))
}

/// Assembles a wei integer from a plain decimal string such as `"0.46"`.
fn wei_from_decimal_str(rendered: &str) -> Result<U256> {
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (rendered, ""),
    };

    let frac_part = frac_part.get(..FRACTIONAL_DIGITS).unwrap_or(frac_part);

    let mut digits = String::with_capacity(int_part.len() + FRACTIONAL_DIGITS);
    digits.push_str(int_part);
    digits.push_str(frac_part);
    digits.extend(std::iter::repeat_n('0', FRACTIONAL_DIGITS - frac_part.len()));

    U256::from_str_radix(&digits, 10)
        .map_err(|e| Error::numeric(format!("unable to parse `{rendered}` as wei: {e}")))
}

/// Best-effort double rendition of a wei amount. Display only; amount
/// computations never round-trip through this.
#[must_use]
pub fn from_wei(value: U256) -> f64 {
    let digits = format!("{:0>width$}", value.to_string(), width = FRACTIONAL_DIGITS + 1);
    let (int_part, frac_part) = digits.split_at(digits.len() - FRACTIONAL_DIGITS);

    format!("{int_part}.{frac_part}")
        .parse()
        .unwrap_or(f64::INFINITY)
}

/// Truncates `value` toward zero onto a grid of `digits` significant decimal
/// digits. Values already within the grid are returned unchanged, so the
/// magnitude of the result never exceeds that of the input.
#[must_use]
pub fn retain_significant_digits(value: U256, digits: u32) -> U256 {
    if value.is_zero() {
        return value;
    }

    let width = u32::try_from(value.to_string().len()).unwrap_or(u32::MAX);
    if width <= digits {
        return value;
    }

    let factor = U256::from(10_u64).pow(U256::from(width - digits));
    (value / factor) * factor
}
