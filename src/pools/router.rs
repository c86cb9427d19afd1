//! Two-hop trades: this pool's asset → base currency → a peer's asset.
//!
//! The first leg runs here; the second is delegated to a
//! [`PeerExchange`] by sending it the intermediate base currency as
//! attached value.  Both legs share one atomic scope, so either the whole
//! route commits or nothing does.
//!
//! The entry points in this module take the peer directly (routed by
//! pool).  Its behaviour is not verified; see the trust note on
//! [`PeerExchange`].  [`Registry`](crate::factory::Registry) offers the
//! same routes resolved by asset, where the peer is known to be a pool of
//! the same registry.

use alloy_primitives::Address;
use tracing::debug;

use super::exchange::{non_zero, reject_value};
use super::Exchange;
use crate::domain::{CallContext, Event, RouteInput, RouteOutput, SwapResult};
use crate::env::Env;
use crate::error::{AmmError, Result};
use crate::math::{quote_input, quote_output};
use crate::traits::PeerExchange;

impl Exchange {
    /// Sells exactly `route.assets_sold` of this pool's asset and buys the
    /// peer's asset for the caller.
    ///
    /// Returns the assets sold here and the assets bought at the peer.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::InvalidAmount`] if any route amount is zero or the
    ///   call carries value.
    /// - [`AmmError::InvalidRecipient`] if the peer is zero or this pool.
    /// - [`AmmError::SlippageExceeded`] if either leg misses its minimum.
    /// - Any error raised by the peer's leg.
    pub fn asset_to_asset_swap_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        route: RouteInput,
        peer: &mut dyn PeerExchange,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_asset_swap_input", |pool, env| {
            pool.route_input(env, ctx, route, ctx.caller(), peer)
        })
    }

    /// Like [`asset_to_asset_swap_input`](Self::asset_to_asset_swap_input),
    /// delivering to `recipient`.
    ///
    /// # Errors
    ///
    /// Additionally [`AmmError::InvalidRecipient`] if `recipient` is zero or
    /// this pool.
    pub fn asset_to_asset_transfer_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        route: RouteInput,
        recipient: Address,
        peer: &mut dyn PeerExchange,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_asset_transfer_input", |pool, env| {
            pool.ensure_recipient(recipient)?;
            pool.route_input(env, ctx, route, recipient, peer)
        })
    }

    /// Buys exactly `route.assets_bought` of the peer's asset for the
    /// caller, selling at most `route.max_assets_sold` here.
    ///
    /// Returns the assets sold here and the assets bought at the peer.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if the deadline has passed.
    /// - [`AmmError::InvalidAmount`] if `assets_bought` or `max_base_sold`
    ///   is zero, or the call carries value.
    /// - [`AmmError::InvalidRecipient`] if the peer is zero or this pool.
    /// - [`AmmError::SlippageExceeded`] if either ceiling is exceeded.
    /// - Any error raised by the peer's leg.
    pub fn asset_to_asset_swap_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        route: RouteOutput,
        peer: &mut dyn PeerExchange,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_asset_swap_output", |pool, env| {
            pool.route_output(env, ctx, route, ctx.caller(), peer)
        })
    }

    /// Like [`asset_to_asset_swap_output`](Self::asset_to_asset_swap_output),
    /// delivering to `recipient`.
    ///
    /// # Errors
    ///
    /// Additionally [`AmmError::InvalidRecipient`].
    pub fn asset_to_asset_transfer_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        route: RouteOutput,
        recipient: Address,
        peer: &mut dyn PeerExchange,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_asset_transfer_output", |pool, env| {
            pool.ensure_recipient(recipient)?;
            pool.route_output(env, ctx, route, recipient, peer)
        })
    }

    fn ensure_peer(&self, peer: &dyn PeerExchange) -> Result<()> {
        let peer = peer.address();
        if peer.is_zero() || peer == self.address() {
            return Err(AmmError::InvalidRecipient);
        }
        Ok(())
    }

    fn route_input(
        &self,
        env: &mut Env,
        ctx: CallContext,
        route: RouteInput,
        recipient: Address,
        peer: &mut dyn PeerExchange,
    ) -> Result<SwapResult> {
        reject_value(ctx)?;
        Self::ensure_live(env, route.deadline)?;
        non_zero(route.assets_sold, "assets sold must be positive")?;
        non_zero(route.min_assets_bought, "minimum assets bought must be positive")?;
        non_zero(route.min_base_bought, "minimum base must be positive")?;
        self.ensure_peer(peer)?;

        let asset_reserve = self.asset_reserve(env)?;
        let base_reserve = self.base_reserve(env);
        let base_bought = quote_output(route.assets_sold, asset_reserve, base_reserve)?;
        if base_bought < route.min_base_bought {
            return Err(AmmError::SlippageExceeded("intermediate base below minimum"));
        }

        self.pull_asset(env, ctx.caller(), route.assets_sold)?;
        env.emit(
            self.address(),
            Event::BasePurchase {
                buyer: ctx.caller(),
                assets_sold: route.assets_sold,
                base_bought,
            },
        );
        let assets_bought = peer.base_to_asset_transfer_input(
            env,
            CallContext::new(self.address()).with_value(base_bought),
            route.min_assets_bought,
            route.deadline,
            recipient,
        )?;

        debug!(
            pool = ?self.address(),
            peer = ?peer.address(),
            caller = ?ctx.caller(),
            sold = %route.assets_sold,
            base = %base_bought,
            bought = %assets_bought,
            "Route committed"
        );
        SwapResult::new(route.assets_sold, assets_bought)
    }

    fn route_output(
        &self,
        env: &mut Env,
        ctx: CallContext,
        route: RouteOutput,
        recipient: Address,
        peer: &mut dyn PeerExchange,
    ) -> Result<SwapResult> {
        reject_value(ctx)?;
        Self::ensure_live(env, route.deadline)?;
        non_zero(route.assets_bought, "assets bought must be positive")?;
        non_zero(route.max_base_sold, "maximum base must be positive")?;
        self.ensure_peer(peer)?;

        let base_needed = peer.base_to_asset_output_price(env, route.assets_bought)?;
        if base_needed > route.max_base_sold {
            return Err(AmmError::SlippageExceeded("intermediate base above maximum"));
        }
        let asset_reserve = self.asset_reserve(env)?;
        let base_reserve = self.base_reserve(env);
        let assets_sold = quote_input(base_needed, asset_reserve, base_reserve)?;
        if assets_sold > route.max_assets_sold {
            return Err(AmmError::SlippageExceeded("assets sold above maximum"));
        }

        self.pull_asset(env, ctx.caller(), assets_sold)?;
        env.emit(
            self.address(),
            Event::BasePurchase {
                buyer: ctx.caller(),
                assets_sold,
                base_bought: base_needed,
            },
        );
        peer.base_to_asset_transfer_output(
            env,
            CallContext::new(self.address()).with_value(base_needed),
            route.assets_bought,
            route.deadline,
            recipient,
        )?;

        debug!(
            pool = ?self.address(),
            peer = ?peer.address(),
            caller = ?ctx.caller(),
            sold = %assets_sold,
            base = %base_needed,
            bought = %route.assets_bought,
            "Route committed"
        );
        SwapResult::new(assets_sold, route.assets_bought)
    }
}
