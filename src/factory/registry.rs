//! Pool registry: one pool per asset, sequential ids, routed trades.

use std::collections::HashMap;

use alloy_primitives::{keccak256, Address};
use tracing::debug;

use crate::config::ExchangeConfig;
use crate::domain::{CallContext, Event, RouteInput, RouteOutput, SwapResult};
use crate::env::Env;
use crate::error::{AmmError, Result};
use crate::pools::Exchange;

/// Creates pools and maps assets to them.
///
/// The registry owns its pools.  Ids start at 1 and follow creation order;
/// they are never reused.  Pool addresses are
/// `keccak256(registry ‖ id_be)` truncated to 20 bytes, so the same
/// registry always assigns the same address to the same id.
///
/// Lookups return [`Address::ZERO`] for unknown entries instead of failing.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_exchange::config::ExchangeConfig;
/// use hydra_exchange::domain::Timestamp;
/// use hydra_exchange::env::Env;
/// use hydra_exchange::factory::Registry;
///
/// let token = Address::repeat_byte(0x70);
/// let mut env = Env::new(Timestamp::new(0));
/// let mut registry = Registry::new(Address::repeat_byte(0xFA), ExchangeConfig::default());
///
/// let pool = registry.create_pool(&mut env, token).expect("fresh asset");
/// assert_eq!(registry.pool_for_asset(&token), pool);
/// assert_eq!(registry.asset_for_pool(&pool), token);
/// assert_eq!(registry.asset_for_id(1), token);
/// assert_eq!(registry.asset_for_id(2), Address::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    address: Address,
    config: ExchangeConfig,
    pools: Vec<Exchange>,
    pool_by_asset: HashMap<Address, Address>,
    asset_by_pool: HashMap<Address, Address>,
    index_by_pool: HashMap<Address, usize>,
}

impl Registry {
    /// Creates an empty registry at `address` stamping `config` on every
    /// pool it creates.
    #[must_use]
    pub fn new(address: Address, config: ExchangeConfig) -> Self {
        Self {
            address,
            config,
            pools: Vec::new(),
            pool_by_asset: HashMap::new(),
            asset_by_pool: HashMap::new(),
            index_by_pool: HashMap::new(),
        }
    }

    pub const fn address(&self) -> Address {
        self.address
    }

    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Creates the pool for `asset` and returns its address.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset` is zero or already has a
    ///   pool.
    /// - [`AmmError::InvalidConfiguration`] if the registry's config is
    ///   invalid.
    pub fn create_pool(&mut self, env: &mut Env, asset: Address) -> Result<Address> {
        if asset.is_zero() || self.pool_by_asset.contains_key(&asset) {
            return Err(AmmError::InvalidAsset);
        }
        let index = self.pools.len();
        let id = u64::try_from(index)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(AmmError::Overflow("pool id overflow"))?;
        let pool = self.derive_address(id);
        let exchange = Exchange::new(pool, asset, self.address, self.config.clone())?;

        self.pools.push(exchange);
        self.pool_by_asset.insert(asset, pool);
        self.asset_by_pool.insert(pool, asset);
        self.index_by_pool.insert(pool, index);
        env.emit(self.address, Event::PoolCreated { asset, pool });
        debug!(registry = ?self.address, asset = ?asset, pool = ?pool, id, "Pool created");
        Ok(pool)
    }

    /// Pool trading `asset`, or zero.
    pub fn pool_for_asset(&self, asset: &Address) -> Address {
        self.pool_by_asset.get(asset).copied().unwrap_or_default()
    }

    /// Asset traded by `pool`, or zero.
    pub fn asset_for_pool(&self, pool: &Address) -> Address {
        self.asset_by_pool.get(pool).copied().unwrap_or_default()
    }

    /// Asset of the pool with id `id` (1-based), or zero.
    pub fn asset_for_id(&self, id: u64) -> Address {
        id.checked_sub(1)
            .and_then(|n| usize::try_from(n).ok())
            .and_then(|index| self.pools.get(index))
            .map_or(Address::ZERO, Exchange::asset)
    }

    /// Number of pools created so far; also the id of the newest pool.
    pub fn pool_count(&self) -> u64 {
        u64::try_from(self.pools.len()).unwrap_or(u64::MAX)
    }

    /// The pool at `pool`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if this registry has no pool there.
    pub fn exchange(&self, pool: &Address) -> Result<&Exchange> {
        let index = self.index_of(pool)?;
        self.pools.get(index).ok_or(AmmError::PoolNotFound)
    }

    /// Mutable access to the pool at `pool`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if this registry has no pool there.
    pub fn exchange_mut(&mut self, pool: &Address) -> Result<&mut Exchange> {
        let index = self.index_of(pool)?;
        self.pools.get_mut(index).ok_or(AmmError::PoolNotFound)
    }

    /// Sells `route.assets_sold` at `pool` and buys `bought_asset` from
    /// this registry's pool for it, delivered to the caller.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] if `pool` is not one of ours.
    /// - [`AmmError::InvalidRecipient`] if `bought_asset` has no pool here
    ///   or is the asset `pool` already trades.
    /// - Anything [`Exchange::asset_to_asset_swap_input`] returns.
    pub fn asset_to_asset_swap_input(
        &mut self,
        env: &mut Env,
        pool: &Address,
        ctx: CallContext,
        route: RouteInput,
        bought_asset: &Address,
    ) -> Result<SwapResult> {
        let (source, target) = self.route_pair(pool, bought_asset)?;
        source.asset_to_asset_swap_input(env, ctx, route, target)
    }

    /// Like [`asset_to_asset_swap_input`](Self::asset_to_asset_swap_input),
    /// delivering to `recipient`.
    ///
    /// # Errors
    ///
    /// As for the swap variant, plus [`AmmError::InvalidRecipient`] for a
    /// zero or self-referential `recipient`.
    pub fn asset_to_asset_transfer_input(
        &mut self,
        env: &mut Env,
        pool: &Address,
        ctx: CallContext,
        route: RouteInput,
        recipient: Address,
        bought_asset: &Address,
    ) -> Result<SwapResult> {
        let (source, target) = self.route_pair(pool, bought_asset)?;
        source.asset_to_asset_transfer_input(env, ctx, route, recipient, target)
    }

    /// Buys exactly `route.assets_bought` of `bought_asset` for the caller,
    /// paying with the asset of `pool`.
    ///
    /// # Errors
    ///
    /// As for [`asset_to_asset_swap_input`](Self::asset_to_asset_swap_input),
    /// with the ceilings of [`Exchange::asset_to_asset_swap_output`].
    pub fn asset_to_asset_swap_output(
        &mut self,
        env: &mut Env,
        pool: &Address,
        ctx: CallContext,
        route: RouteOutput,
        bought_asset: &Address,
    ) -> Result<SwapResult> {
        let (source, target) = self.route_pair(pool, bought_asset)?;
        source.asset_to_asset_swap_output(env, ctx, route, target)
    }

    /// Like [`asset_to_asset_swap_output`](Self::asset_to_asset_swap_output),
    /// delivering to `recipient`.
    ///
    /// # Errors
    ///
    /// As for the swap variant, plus [`AmmError::InvalidRecipient`].
    pub fn asset_to_asset_transfer_output(
        &mut self,
        env: &mut Env,
        pool: &Address,
        ctx: CallContext,
        route: RouteOutput,
        recipient: Address,
        bought_asset: &Address,
    ) -> Result<SwapResult> {
        let (source, target) = self.route_pair(pool, bought_asset)?;
        source.asset_to_asset_transfer_output(env, ctx, route, recipient, target)
    }

    fn index_of(&self, pool: &Address) -> Result<usize> {
        self.index_by_pool
            .get(pool)
            .copied()
            .ok_or(AmmError::PoolNotFound)
    }

    fn derive_address(&self, id: u64) -> Address {
        let preimage = [self.address.as_slice(), &id.to_be_bytes()].concat();
        Address::from_word(keccak256(preimage))
    }

    /// Disjoint mutable borrows of the source pool and the pool trading
    /// `bought_asset`.
    fn route_pair(
        &mut self,
        pool: &Address,
        bought_asset: &Address,
    ) -> Result<(&mut Exchange, &mut Exchange)> {
        let source = self.index_of(pool)?;
        let target_pool = self.pool_for_asset(bought_asset);
        if target_pool.is_zero() {
            return Err(AmmError::InvalidRecipient);
        }
        let target = self.index_of(&target_pool)?;
        if source == target {
            return Err(AmmError::InvalidRecipient);
        }

        let split = source.max(target);
        let (low, high) = self
            .pools
            .split_at_mut_checked(split)
            .ok_or(AmmError::PoolNotFound)?;
        let upper = high.first_mut().ok_or(AmmError::PoolNotFound)?;
        let lower = low.get_mut(source.min(target)).ok_or(AmmError::PoolNotFound)?;
        if source < target {
            Ok((lower, upper))
        } else {
            Ok((upper, lower))
        }
    }
}
