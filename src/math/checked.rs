//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, AmmError>`](crate::error::AmmError) instead
//! of panicking on overflow, underflow, or division by zero, so pricing and
//! share code can chain steps with `?`.
//!
//! # Implementations
//!
//! - [`Amount`]: reserve and trade quantities
//! - [`Shares`]: liquidity-share quantities
//!
//! # Examples
//!
//! ```
//! use hydra_exchange::domain::{Amount, Rounding};
//! use hydra_exchange::math::CheckedArithmetic;
//!
//! let a = Amount::new(100);
//! let b = Amount::new(200);
//! assert_eq!(a.safe_add(&b), Ok(Amount::new(300)));
//! assert!(a.safe_sub(&b).is_err());
//! ```

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result exceeds 256 bits.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.checked_div(other, rounding)
            .ok_or(AmmError::DivisionByZero)
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::Overflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::Underflow("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.as_amount()
            .checked_mul(&other.as_amount())
            .map(Shares::from)
            .ok_or(AmmError::Overflow("share multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.as_amount()
            .checked_div(&other.as_amount(), rounding)
            .map(Shares::from)
            .ok_or(AmmError::DivisionByZero)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    mod amount {
        use super::*;

        #[test]
        fn add_overflow() {
            let Err(AmmError::Overflow(_)) = Amount::MAX.safe_add(&Amount::new(1)) else {
                panic!("expected Overflow");
            };
        }

        #[test]
        fn sub_underflow() {
            let Err(AmmError::Underflow(_)) = Amount::new(1).safe_sub(&Amount::new(2)) else {
                panic!("expected Underflow");
            };
        }

        #[test]
        fn mul_overflow() {
            let Err(AmmError::Overflow(_)) = Amount::MAX.safe_mul(&Amount::new(2)) else {
                panic!("expected Overflow");
            };
        }

        #[test]
        fn div_directions() {
            let ten = Amount::new(10);
            let three = Amount::new(3);
            assert_eq!(ten.safe_div(&three, Rounding::Down), Ok(Amount::new(3)));
            assert_eq!(ten.safe_div(&three, Rounding::Up), Ok(Amount::new(4)));
        }

        #[test]
        fn div_by_zero() {
            assert_eq!(
                Amount::new(1).safe_div(&Amount::ZERO, Rounding::Down),
                Err(AmmError::DivisionByZero)
            );
        }
    }

    mod shares {
        use super::*;

        #[test]
        fn add_sub() {
            let a = Shares::new(300);
            let b = Shares::new(100);
            assert_eq!(a.safe_add(&b), Ok(Shares::new(400)));
            assert_eq!(a.safe_sub(&b), Ok(Shares::new(200)));
            let Err(AmmError::Underflow(_)) = b.safe_sub(&a) else {
                panic!("expected Underflow");
            };
        }

        #[test]
        fn mul_and_div() {
            let a = Shares::new(7);
            assert_eq!(a.safe_mul(&Shares::new(6)), Ok(Shares::new(42)));
            assert_eq!(a.safe_div(&Shares::new(2), Rounding::Up), Ok(Shares::new(4)));
            assert_eq!(
                a.safe_div(&Shares::ZERO, Rounding::Down),
                Err(AmmError::DivisionByZero)
            );
        }
    }
}
