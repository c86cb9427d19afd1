//! Raw token amount with checked arithmetic.

use core::fmt;

use alloy_primitives::U256;

use super::Rounding;

/// A raw token amount in the smallest unit (wei or equivalent).
///
/// `Amount` never interprets decimals; scaling lives in
/// [`Decimals`](super::Decimals).  The value is a 256-bit unsigned
/// integer so that products such as `amount_in × 997 × reserve_out` stay
/// exact for 18-decimal tokens.
///
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::{Amount, Rounding};
///
/// let a = Amount::new(100);
/// let b = Amount::new(200);
/// assert_eq!(a.checked_add(&b), Some(Amount::new(300)));
/// assert_eq!(b.checked_sub(&a), Some(Amount::new(100)));
/// assert_eq!(b.checked_div(&Amount::new(3), Rounding::Up), Some(Amount::new(67)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Maximum representable amount.
    pub const MAX: Self = Self(U256::MAX);

    /// Creates a new `Amount` from a `u128` value.
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

    /// Returns `true` if the amount is zero.
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

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Checked division with explicit rounding direction.
    ///
    /// - [`Rounding::Down`]: floor division (round towards zero).
    /// - [`Rounding::Up`]: ceiling division.
    ///
    /// Returns `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self, rounding: Rounding) -> Option<Self> {
        if divisor.0.is_zero() {
            return None;
        }
        let quotient = self.0 / divisor.0;
        match rounding {
            Rounding::Down => Some(Self(quotient)),
            Rounding::Up => {
                // floor(n / d) + (n % d != 0); the increment cannot overflow
                // because a non-zero remainder implies d > 1.
                if (self.0 % divisor.0).is_zero() {
                    Some(Self(quotient))
                } else {
                    Some(Self(quotient + U256::from(1u8)))
                }
            }
        }
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::new(value)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
