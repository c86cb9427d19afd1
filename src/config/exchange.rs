//! Configuration stamped on every pool a registry creates.

use crate::domain::{Amount, Decimals};
use crate::error::AmmError;

/// Smallest base-currency deposit accepted when seeding an empty pool.
const DEFAULT_MIN_BOOTSTRAP_BASE: u128 = 1_000_000_000;

/// Immutable parameters shared by all pools of one registry.
///
/// The trading fee is not configurable (see
/// [`FEE_NUMERATOR`](crate::math::FEE_NUMERATOR)); what varies per
/// deployment is the floor on the first deposit and the metadata of the
/// liquidity-share token.
///
/// # Validation
///
/// - `min_bootstrap_base` must be non-zero.
/// - Share name and symbol must be non-empty.
/// - Share decimals are validated by [`Decimals`].
///
/// # Examples
///
/// ```
/// use hydra_exchange::config::ExchangeConfig;
/// use hydra_exchange::domain::{Amount, Decimals};
///
/// let cfg = ExchangeConfig::new(Amount::new(1_000), "LP", "LP", Decimals::MAX)
///     .expect("valid config");
/// assert_eq!(cfg.min_bootstrap_base(), Amount::new(1_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeConfig {
    min_bootstrap_base: Amount,
    share_name: String,
    share_symbol: String,
    share_decimals: Decimals,
}

impl ExchangeConfig {
    /// Creates a new `ExchangeConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if any parameter is out
    /// of range.
    pub fn new(
        min_bootstrap_base: Amount,
        share_name: impl Into<String>,
        share_symbol: impl Into<String>,
        share_decimals: Decimals,
    ) -> Result<Self, AmmError> {
        let config = Self {
            min_bootstrap_base,
            share_name: share_name.into(),
            share_symbol: share_symbol.into(),
            share_decimals,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.min_bootstrap_base.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "minimum bootstrap deposit must be non-zero",
            ));
        }
        if self.share_name.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("share name is empty"));
        }
        if self.share_symbol.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("share symbol is empty"));
        }
        Ok(())
    }

    /// Returns the minimum base deposit for seeding an empty pool.
    pub const fn min_bootstrap_base(&self) -> Amount {
        self.min_bootstrap_base
    }

    /// Returns the share token name.
    #[must_use]
    pub fn share_name(&self) -> &str {
        &self.share_name
    }

    /// Returns the share token symbol.
    #[must_use]
    pub fn share_symbol(&self) -> &str {
        &self.share_symbol
    }

    /// Returns the share token decimals.
    #[must_use]
    pub const fn share_decimals(&self) -> Decimals {
        self.share_decimals
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            min_bootstrap_base: Amount::new(DEFAULT_MIN_BOOTSTRAP_BASE),
            share_name: "Hydra Exchange V1".to_owned(),
            share_symbol: "HYDRA-V1".to_owned(),
            share_decimals: Decimals::MAX,
        }
    }
}
