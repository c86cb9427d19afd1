//! Parameters of a two-hop (asset → base → asset) trade.

use core::fmt;

use super::{Amount, Timestamp};

/// Exact-input multi-hop parameters: sell exactly `assets_sold` of this
/// pool's asset and receive at least `min_assets_bought` of the peer's.
///
/// `min_base_bought` bounds the intermediate leg independently, so a
/// caller can reject a route whose first hop alone is already too lossy.
/// All three quantities must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteInput {
    /// Exact quantity of the source asset to sell.
    pub assets_sold: Amount,
    /// Lower bound on the quantity of the target asset delivered.
    pub min_assets_bought: Amount,
    /// Lower bound on the intermediate base-currency amount.
    pub min_base_bought: Amount,
    /// Latest acceptable execution time.
    pub deadline: Timestamp,
}

impl RouteInput {
    /// Bundles exact-input route parameters.
    pub const fn new(
        assets_sold: Amount,
        min_assets_bought: Amount,
        min_base_bought: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self {
            assets_sold,
            min_assets_bought,
            min_base_bought,
            deadline,
        }
    }
}

impl fmt::Display for RouteInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RouteInput(sold={}, min_bought={}, min_base={}, deadline={})",
            self.assets_sold, self.min_assets_bought, self.min_base_bought, self.deadline
        )
    }
}

/// Exact-output multi-hop parameters: receive exactly `assets_bought` of
/// the peer's asset, selling at most `max_assets_sold` of this pool's
/// asset and routing at most `max_base_sold` base currency through the
/// intermediate leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteOutput {
    /// Exact quantity of the target asset to deliver.
    pub assets_bought: Amount,
    /// Upper bound on the quantity of the source asset sold.
    pub max_assets_sold: Amount,
    /// Upper bound on the intermediate base-currency amount.
    pub max_base_sold: Amount,
    /// Latest acceptable execution time.
    pub deadline: Timestamp,
}

impl RouteOutput {
    /// Bundles exact-output route parameters.
    pub const fn new(
        assets_bought: Amount,
        max_assets_sold: Amount,
        max_base_sold: Amount,
        deadline: Timestamp,
    ) -> Self {
        Self {
            assets_bought,
            max_assets_sold,
            max_base_sold,
            deadline,
        }
    }
}

impl fmt::Display for RouteOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RouteOutput(bought={}, max_sold={}, max_base={}, deadline={})",
            self.assets_bought, self.max_assets_sold, self.max_base_sold, self.deadline
        )
    }
}
