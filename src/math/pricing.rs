//! Constant-product pricing with a fixed 0.3% fee.
//!
//! Both quotes are pure functions of the trade size and the two reserves
//! at call time.  The fee is applied to the input side as a `997 / 1000`
//! factor and stays in the pool, so the reserve product never decreases.
//!
//! # Formulas
//!
//! ```text
//! quote_output(x, R_in, R_out) = floor(997·x·R_out / (1000·R_in + 997·x))
//! quote_input (y, R_in, R_out) = floor(1000·R_in·y / (997·(R_out − y))) + 1
//! ```
//!
//! The output is rounded down and the required input is rounded up (the
//! `+ 1`), so truncation always favours the pool.

use crate::domain::{Amount, Rounding};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// Numerator of the input-side fee factor.
pub const FEE_NUMERATOR: u128 = 997;

/// Denominator of the input-side fee factor.
pub const FEE_DENOMINATOR: u128 = 1_000;

/// Output obtained for selling exactly `amount_in` into a pool holding
/// `reserve_in` of the sold side and `reserve_out` of the bought side.
///
/// # Errors
///
/// - [`AmmError::InvalidReserve`] if either reserve is zero.
/// - [`AmmError::Overflow`] if an intermediate product exceeds 256 bits.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Amount;
/// use hydra_exchange::math::quote_output;
///
/// let out = quote_output(Amount::new(10), Amount::new(1_000_000), Amount::new(20_000));
/// assert_eq!(out, Ok(Amount::new(0)));
/// ```
pub fn quote_output(amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(AmmError::InvalidReserve);
    }
    let in_with_fee = amount_in.safe_mul(&Amount::new(FEE_NUMERATOR))?;
    let numerator = in_with_fee.safe_mul(&reserve_out)?;
    let denominator = reserve_in
        .safe_mul(&Amount::new(FEE_DENOMINATOR))?
        .safe_add(&in_with_fee)?;
    numerator.safe_div(&denominator, Rounding::Down)
}

/// Input required to buy exactly `amount_out` from a pool holding
/// `reserve_in` of the sold side and `reserve_out` of the bought side.
///
/// # Errors
///
/// - [`AmmError::InvalidReserve`] if either reserve is zero or
///   `amount_out >= reserve_out` (the pool cannot be drained).
/// - [`AmmError::Overflow`] if an intermediate product exceeds 256 bits.
pub fn quote_input(amount_out: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(AmmError::InvalidReserve);
    }
    let numerator = reserve_in
        .safe_mul(&amount_out)?
        .safe_mul(&Amount::new(FEE_DENOMINATOR))?;
    let denominator = reserve_out
        .safe_sub(&amount_out)?
        .safe_mul(&Amount::new(FEE_NUMERATOR))?;
    numerator
        .safe_div(&denominator, Rounding::Down)?
        .safe_add(&Amount::new(1))
}
