//! Outcome of a swap operation.

use core::fmt;

use super::Amount;
use crate::error::AmmError;

/// The outcome of a committed trade: what the buyer gave up and what the
/// recipient received.
///
/// For a multi-hop trade, `amount_in` is the quantity of the sold asset and
/// `amount_out` the quantity of the bought asset; the intermediate base
/// currency amount is not part of the result.
///
/// # Invariants
///
/// `amount_in > 0` and `amount_out > 0`.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::{Amount, SwapResult};
///
/// let result = SwapResult::new(Amount::new(1000), Amount::new(990));
/// assert!(result.is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapResult {
    amount_in: Amount,
    amount_out: Amount,
}

impl SwapResult {
    /// Creates a new `SwapResult` with validated invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if either side is zero.
    pub fn new(amount_in: Amount, amount_out: Amount) -> crate::error::Result<Self> {
        if amount_in.is_zero() {
            return Err(AmmError::InvalidAmount("amount_in must be positive"));
        }
        if amount_out.is_zero() {
            return Err(AmmError::InvalidAmount("amount_out must be positive"));
        }
        Ok(Self {
            amount_in,
            amount_out,
        })
    }

    /// Returns the input amount.
    pub const fn amount_in(&self) -> Amount {
        self.amount_in
    }

    /// Returns the output amount.
    pub const fn amount_out(&self) -> Amount {
        self.amount_out
    }
}

impl fmt::Display for SwapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SwapResult(in={}, out={})", self.amount_in, self.amount_out)
    }
}
