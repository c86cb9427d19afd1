//! Token decimal places.

use alloy_primitives::U256;

use super::Amount;
use crate::error::AmmError;

/// Maximum allowed decimal places (EVM standard).
const MAX_DECIMALS: u8 = 18;

/// Represents the number of decimal places of a fungible token, such as
/// a pool's liquidity share token.
///
/// Valid range is `0..=18`, matching the common blockchain standard.
/// Construction is validated: values above 18 are rejected.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::{Amount, Decimals};
///
/// let d = Decimals::new(18).expect("18 is valid");
/// assert_eq!(d.scale_up(5), Amount::new(5_000_000_000_000_000_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Decimals(u8);

impl Decimals {
    /// Zero decimal places.
    pub const ZERO: Self = Self(0);

    /// Maximum standard decimal places (18).
    pub const MAX: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, AmmError> {
        if value > MAX_DECIMALS {
            return Err(AmmError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Converts a whole-unit quantity to the smallest raw unit.
    ///
    /// With `decimals = 18`, an input of `1` yields `10^18`.  Cannot
    /// overflow: `u64::MAX × 10^18` fits comfortably in 256 bits.
    pub fn scale_up(&self, whole: u64) -> Amount {
        Amount::from_raw(U256::from(whole) * self.factor())
    }

    /// Converts raw units back to whole units, truncating any fraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the result does not fit in `u64`.
    pub fn scale_down(&self, raw: Amount) -> Result<u64, AmmError> {
        let whole = raw.get() / self.factor();
        u64::try_from(whole).map_err(|_| AmmError::Overflow("scale_down result exceeds u64"))
    }

    fn factor(&self) -> U256 {
        U256::from(10u8).pow(U256::from(self.0))
    }
}
