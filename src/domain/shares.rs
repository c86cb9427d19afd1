//! Liquidity-share units issued by a pool.

use core::fmt;

use alloy_primitives::U256;

use super::Amount;

/// Liquidity-share units: a fungible claim on a proportional slice of a
/// pool's reserves.
///
/// This is distinct from [`Amount`] because it measures ownership of the
/// pool, not a quantity of either reserve asset.  The first deposit into an
/// empty pool mints shares 1:1 with the base currency supplied, so the two
/// types share a 256-bit representation and convert losslessly.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Shares;
///
/// let a = Shares::new(1_000);
/// let b = Shares::new(2_000);
/// assert_eq!(a.checked_add(&b), Some(Shares::new(3_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Shares(U256);

impl Shares {
    /// No shares.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Creates a new `Shares` value from a `u128`.
    pub const fn new(value: u128) -> Self {
        Self(U256::from_limbs([value as u64, (value >> 64) as u64, 0, 0]))
    }

    /// Wraps a full-width 256-bit value.
    pub const fn from_raw(value: U256) -> Self {
        Self(value)
    }

    /// Returns the underlying 256-bit value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if no shares are represented.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Scales an [`Amount`] by this share count.
    ///
    /// Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul_amount(&self, amount: &Amount) -> Option<Amount> {
        self.0.checked_mul(amount.get()).map(Amount::from_raw)
    }

    /// Reinterprets the share count as a raw amount (used as a divisor).
    pub const fn as_amount(&self) -> Amount {
        Amount::from_raw(self.0)
    }
}

impl From<Amount> for Shares {
    fn from(amount: Amount) -> Self {
        Self(amount.get())
    }
}

impl fmt::Display for Shares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
