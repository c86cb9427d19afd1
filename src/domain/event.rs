//! Domain events emitted by pools and the registry.

use alloy_primitives::Address;

use super::{Amount, Shares};

/// Observable outcome of a committed operation.
///
/// Events are appended to the host's log only when the operation that
/// produced them commits; a rolled-back operation leaves no events behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Base currency was sold for the pool's asset.
    AssetPurchase {
        /// Account that paid.
        buyer: Address,
        /// Base currency sold.
        base_sold: Amount,
        /// Asset bought.
        assets_bought: Amount,
    },
    /// The pool's asset was sold for base currency.
    BasePurchase {
        /// Account that paid.
        buyer: Address,
        /// Asset sold.
        assets_sold: Amount,
        /// Base currency bought.
        base_bought: Amount,
    },
    /// Reserves were deposited in exchange for shares.
    AddLiquidity {
        /// Depositor.
        provider: Address,
        /// Base currency deposited.
        base_amount: Amount,
        /// Asset deposited.
        asset_amount: Amount,
    },
    /// Shares were burned in exchange for reserves.
    RemoveLiquidity {
        /// Withdrawer.
        provider: Address,
        /// Base currency paid out.
        base_amount: Amount,
        /// Asset paid out.
        asset_amount: Amount,
    },
    /// Shares moved between holders; `from` is zero on mint, `to` on burn.
    SharesTransferred {
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
        /// Shares moved.
        shares: Shares,
    },
    /// A share allowance was set.
    SharesApproved {
        /// Holder granting the allowance.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// New allowance.
        shares: Shares,
    },
    /// The registry created a pool.
    PoolCreated {
        /// Asset traded by the new pool.
        asset: Address,
        /// Address of the new pool.
        pool: Address,
    },
}

/// An [`Event`] together with the address that emitted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogEntry {
    /// Pool or registry address.
    pub emitter: Address,
    /// The event payload.
    pub event: Event,
}
