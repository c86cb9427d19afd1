//! The pool-shaped capability a router delegates its second leg to.
//!
//! A multi-hop trade sells this pool's asset for base currency and then
//! spends that base currency at a *peer* pool.  The router only needs four
//! things from the peer: its address, two base→asset quotes, and the two
//! base→asset transfer primitives.  [`PeerExchange`] names exactly that
//! surface.
//!
//! # Trust Boundary
//!
//! When the peer comes from a [`Registry`](crate::factory::Registry) it is
//! a pool of the same lineage.  When a caller hands a peer in directly
//! (the routed-by-pool entry points on [`Exchange`](crate::pools::Exchange))
//! nothing about it is verified: a buggy or hostile implementation can
//! quote one price and charge another, or keep the base currency without
//! delivering.  The local pool only guarantees its own leg; the caller
//! owns the choice of peer.

use alloy_primitives::Address;

use crate::domain::{Amount, CallContext, Timestamp};
use crate::env::Env;
use crate::error::Result;

/// Second-leg counterparty of a multi-hop trade.
///
/// Object safe, so routers accept `&mut dyn PeerExchange`.
pub trait PeerExchange {
    /// Address that receives the intermediate base currency.
    fn address(&self) -> Address;

    /// Assets obtained for selling exactly `base_sold`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAmount`](crate::error::AmmError::InvalidAmount)
    /// on a zero query, or a pricing error for an empty pool.
    fn base_to_asset_input_price(&self, env: &Env, base_sold: Amount) -> Result<Amount>;

    /// Base currency required to buy exactly `assets_bought`.
    ///
    /// # Errors
    ///
    /// As for [`base_to_asset_input_price`](Self::base_to_asset_input_price).
    fn base_to_asset_output_price(&self, env: &Env, assets_bought: Amount) -> Result<Amount>;

    /// Exact-input purchase paid with `ctx.value()`, delivering at least
    /// `min_assets` to `recipient`.  Returns the assets delivered.
    ///
    /// # Errors
    ///
    /// Any failure of the peer's own leg; the whole operation aborts.
    fn base_to_asset_transfer_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        min_assets: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<Amount>;

    /// Exact-output purchase of `assets_bought` for `recipient`, paid from
    /// `ctx.value()` with any excess refunded to the caller.  Returns the
    /// base currency spent.
    ///
    /// # Errors
    ///
    /// Any failure of the peer's own leg; the whole operation aborts.
    fn base_to_asset_transfer_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        assets_bought: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<Amount>;
}
