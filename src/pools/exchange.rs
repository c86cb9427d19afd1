//! The exchange pool: one asset traded against the base currency.
//!
//! An [`Exchange`] owns only its liquidity-share book.  Both reserves are
//! the pool's balances in the host's ledgers and are read fresh on every
//! call, never cached.  The operations are split across sibling modules:
//!
//! - liquidity deposits and withdrawals (`liquidity.rs`)
//! - single-hop swaps and the bare payment path (`swap.rs`)
//! - two-hop routing through a [`PeerExchange`] (`router.rs`)
//!
//! # Atomicity
//!
//! Every public operation runs inside an atomic scope: the host
//! ledgers, the event log and this pool's share book are captured on
//! entry and restored if the operation fails.  A nested call into a peer
//! pool runs inside the outer scope, so a failure in either leg undoes
//! both.
//!
//! # Reentrancy
//!
//! Operations take `&mut self`, so while one is running nothing else can
//! reach this pool, a router peer included.  Swap legs compute from a
//! reserve snapshot taken before any transfer and mutate no pool-local
//! state.

use std::collections::HashMap;

use alloy_primitives::Address;
use tracing::{debug, warn};

use crate::config::ExchangeConfig;
use crate::domain::{Amount, CallContext, Decimals, Event, Shares, Timestamp};
use crate::env::Env;
use crate::error::{AmmError, Result};
use crate::math::{quote_input, quote_output, CheckedArithmetic};
use crate::traits::PeerExchange;

/// Liquidity-share balances and allowances of one pool.
///
/// `total` always equals the sum of `balances`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct ShareBook {
    pub(super) total: Shares,
    pub(super) balances: HashMap<Address, Shares>,
    pub(super) allowances: HashMap<(Address, Address), Shares>,
}

impl ShareBook {
    fn balance_of(&self, holder: &Address) -> Shares {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn credit(&mut self, holder: &Address, shares: Shares) -> Result<()> {
        let credited = self.balance_of(holder).safe_add(&shares)?;
        self.balances.insert(*holder, credited);
        Ok(())
    }

    fn debit(&mut self, holder: &Address, shares: Shares) -> Result<()> {
        let remaining = self
            .balance_of(holder)
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientShares)?;
        if remaining.is_zero() {
            self.balances.remove(holder);
        } else {
            self.balances.insert(*holder, remaining);
        }
        Ok(())
    }
}

/// A constant-product pool trading one asset against the base currency.
///
/// Pools are normally created by a [`Registry`](crate::factory::Registry),
/// which assigns the address and records the asset mapping.  A pool
/// starts empty; the first [`add_liquidity`](Exchange::add_liquidity)
/// sets its price.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_exchange::config::ExchangeConfig;
/// use hydra_exchange::domain::Amount;
/// use hydra_exchange::env::Env;
/// use hydra_exchange::error::AmmError;
/// use hydra_exchange::domain::Timestamp;
/// use hydra_exchange::ledger::TokenLedger;
/// use hydra_exchange::pools::Exchange;
///
/// let token = Address::repeat_byte(0x70);
/// let mut env = Env::new(Timestamp::new(0));
/// env.register_asset(token, Box::new(TokenLedger::new())).expect("fresh");
///
/// let pool = Exchange::new(
///     Address::repeat_byte(0xEE),
///     token,
///     Address::repeat_byte(0xFA),
///     ExchangeConfig::default(),
/// )
/// .expect("valid pool");
///
/// assert!(pool.total_shares().is_zero());
/// assert_eq!(
///     pool.base_to_asset_input_price(&env, Amount::new(1)),
///     Err(AmmError::InvalidReserve)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    address: Address,
    asset: Address,
    registry: Address,
    config: ExchangeConfig,
    pub(super) shares: ShareBook,
}

impl Exchange {
    /// Creates an empty pool at `address` trading `asset`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAsset`] if `asset` is zero.
    /// - [`AmmError::InvalidRecipient`] if `address` is zero or equals
    ///   `asset`.
    /// - [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(
        address: Address,
        asset: Address,
        registry: Address,
        config: ExchangeConfig,
    ) -> Result<Self> {
        if asset.is_zero() {
            return Err(AmmError::InvalidAsset);
        }
        if address.is_zero() || address == asset {
            return Err(AmmError::InvalidRecipient);
        }
        config.validate()?;
        Ok(Self {
            address,
            asset,
            registry,
            config,
            shares: ShareBook::default(),
        })
    }

    /// Address of this pool in the host ledgers.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The asset traded against base currency.
    pub const fn asset(&self) -> Address {
        self.asset
    }

    /// The registry that created this pool.
    pub const fn registry(&self) -> Address {
        self.registry
    }

    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Base currency held by the pool.
    pub fn base_reserve(&self, env: &Env) -> Amount {
        env.base().balance_of(&self.address)
    }

    /// Asset held by the pool.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`] if the host has no ledger for the asset.
    pub fn asset_reserve(&self, env: &Env) -> Result<Amount> {
        Ok(env.asset(&self.asset)?.balance_of(&self.address))
    }

    // -- share token ------------------------------------------------------

    /// Share token name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.config.share_name()
    }

    /// Share token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.config.share_symbol()
    }

    /// Share token decimals.
    pub const fn decimals(&self) -> Decimals {
        self.config.share_decimals()
    }

    /// Outstanding liquidity shares.
    pub const fn total_shares(&self) -> Shares {
        self.shares.total
    }

    /// Shares held by `holder`.
    pub fn share_balance(&self, holder: &Address) -> Shares {
        self.shares.balance_of(holder)
    }

    /// Shares `spender` may still move on behalf of `owner`.
    pub fn share_allowance(&self, owner: &Address, spender: &Address) -> Shares {
        self.shares.allowance(owner, spender)
    }

    /// Moves `shares` from the caller to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if the call carries value.
    /// - [`AmmError::InsufficientShares`] if the caller holds too few.
    pub fn transfer_shares(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        to: Address,
        shares: Shares,
    ) -> Result<()> {
        self.atomically(env, "transfer_shares", |pool, env| {
            reject_value(ctx)?;
            pool.move_shares(env, ctx.caller(), to, shares)
        })
    }

    /// Sets the caller's share allowance for `spender` to `shares`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAmount`] if the call carries value.
    pub fn approve_shares(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        spender: Address,
        shares: Shares,
    ) -> Result<()> {
        self.atomically(env, "approve_shares", |pool, env| {
            reject_value(ctx)?;
            pool.shares
                .allowances
                .insert((ctx.caller(), spender), shares);
            env.emit(
                pool.address,
                Event::SharesApproved {
                    owner: ctx.caller(),
                    spender,
                    shares,
                },
            );
            Ok(())
        })
    }

    /// Moves `shares` from `from` to `to` against the caller's allowance.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if the call carries value.
    /// - [`AmmError::InsufficientAllowance`] if the allowance is too small.
    /// - [`AmmError::InsufficientShares`] if `from` holds too few.
    pub fn transfer_shares_from(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        from: Address,
        to: Address,
        shares: Shares,
    ) -> Result<()> {
        self.atomically(env, "transfer_shares_from", |pool, env| {
            reject_value(ctx)?;
            let remaining = pool
                .shares
                .allowance(&from, &ctx.caller())
                .checked_sub(&shares)
                .ok_or(AmmError::InsufficientAllowance)?;
            pool.move_shares(env, from, to, shares)?;
            pool.shares
                .allowances
                .insert((from, ctx.caller()), remaining);
            Ok(())
        })
    }

    fn move_shares(&mut self, env: &mut Env, from: Address, to: Address, shares: Shares) -> Result<()> {
        self.shares.debit(&from, shares)?;
        self.shares.credit(&to, shares)?;
        env.emit(self.address, Event::SharesTransferred { from, to, shares });
        Ok(())
    }

    /// Creates `shares` for `holder`.
    pub(super) fn mint_shares(&mut self, env: &mut Env, holder: Address, shares: Shares) -> Result<()> {
        self.shares.total = self.shares.total.safe_add(&shares)?;
        self.shares.credit(&holder, shares)?;
        env.emit(
            self.address,
            Event::SharesTransferred {
                from: Address::ZERO,
                to: holder,
                shares,
            },
        );
        Ok(())
    }

    /// Destroys `shares` held by `holder`.
    pub(super) fn burn_shares(&mut self, env: &mut Env, holder: Address, shares: Shares) -> Result<()> {
        self.shares.debit(&holder, shares)?;
        self.shares.total = self
            .shares
            .total
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientShares)?;
        env.emit(
            self.address,
            Event::SharesTransferred {
                from: holder,
                to: Address::ZERO,
                shares,
            },
        );
        Ok(())
    }

    // -- price queries ----------------------------------------------------

    /// Assets obtained for selling exactly `base_sold`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `base_sold` is zero.
    /// - [`AmmError::InvalidReserve`] if the pool is empty.
    pub fn base_to_asset_input_price(&self, env: &Env, base_sold: Amount) -> Result<Amount> {
        non_zero(base_sold, "base sold must be positive")?;
        quote_output(base_sold, self.base_reserve(env), self.asset_reserve(env)?)
    }

    /// Base currency required to buy exactly `assets_bought`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidAmount`] if `assets_bought` is zero.
    /// - [`AmmError::InvalidReserve`] if the pool is empty or would be
    ///   drained.
    pub fn base_to_asset_output_price(&self, env: &Env, assets_bought: Amount) -> Result<Amount> {
        non_zero(assets_bought, "assets bought must be positive")?;
        quote_input(assets_bought, self.base_reserve(env), self.asset_reserve(env)?)
    }

    /// Base currency obtained for selling exactly `assets_sold`.
    ///
    /// # Errors
    ///
    /// As for [`base_to_asset_input_price`](Self::base_to_asset_input_price).
    pub fn asset_to_base_input_price(&self, env: &Env, assets_sold: Amount) -> Result<Amount> {
        non_zero(assets_sold, "assets sold must be positive")?;
        quote_output(assets_sold, self.asset_reserve(env)?, self.base_reserve(env))
    }

    /// Assets required to buy exactly `base_bought`.
    ///
    /// # Errors
    ///
    /// As for [`base_to_asset_output_price`](Self::base_to_asset_output_price).
    pub fn asset_to_base_output_price(&self, env: &Env, base_bought: Amount) -> Result<Amount> {
        non_zero(base_bought, "base bought must be positive")?;
        quote_input(base_bought, self.asset_reserve(env)?, self.base_reserve(env))
    }

    // -- execution helpers ------------------------------------------------

    /// Runs `op` as one all-or-nothing unit.
    ///
    /// On error the host ledgers, the event log and this pool's share book
    /// are restored to their state at entry.
    pub(super) fn atomically<T>(
        &mut self,
        env: &mut Env,
        name: &'static str,
        op: impl FnOnce(&mut Self, &mut Env) -> Result<T>,
    ) -> Result<T> {
        let checkpoint = env.checkpoint();
        let shares = self.shares.clone();
        match op(self, env) {
            Ok(value) => Ok(value),
            Err(err) => {
                env.rollback(checkpoint);
                self.shares = shares;
                warn!(pool = ?self.address, op = name, error = %err, "Operation rolled back");
                Err(err)
            }
        }
    }

    pub(super) fn ensure_live(env: &Env, deadline: Timestamp) -> Result<()> {
        if deadline.has_passed(env.now()) {
            return Err(AmmError::Expired);
        }
        Ok(())
    }

    /// Rejects the zero address and the pool itself.
    pub(super) fn ensure_recipient(&self, recipient: Address) -> Result<()> {
        if recipient.is_zero() || recipient == self.address {
            return Err(AmmError::InvalidRecipient);
        }
        Ok(())
    }

    /// Moves the call's attached value into the pool.
    pub(super) fn receive_value(&self, env: &mut Env, ctx: CallContext) -> Result<()> {
        env.base_mut()
            .transfer(&ctx.caller(), &self.address, ctx.value())?;
        Ok(())
    }

    pub(super) fn pay_base(&self, env: &mut Env, to: Address, amount: Amount) -> Result<()> {
        env.base_mut().transfer(&self.address, &to, amount)?;
        Ok(())
    }

    pub(super) fn send_asset(&self, env: &mut Env, to: Address, amount: Amount) -> Result<()> {
        env.asset_mut(&self.asset)?
            .transfer(&self.address, &to, amount)?;
        Ok(())
    }

    /// Pulls `amount` of the asset from `from` against the allowance it
    /// granted this pool.
    pub(super) fn pull_asset(&self, env: &mut Env, from: Address, amount: Amount) -> Result<()> {
        env.asset_mut(&self.asset)?
            .transfer_from(&self.address, &from, &self.address, amount)?;
        Ok(())
    }

    pub(super) fn log_commit(&self, name: &'static str, caller: Address, sold: Amount, bought: Amount) {
        debug!(
            pool = ?self.address,
            asset = ?self.asset,
            caller = ?caller,
            sold = %sold,
            bought = %bought,
            op = name,
            "Operation committed"
        );
    }
}

/// Fails with [`AmmError::InvalidAmount`] when `amount` is zero.
pub(super) fn non_zero(amount: Amount, what: &'static str) -> Result<()> {
    if amount.is_zero() {
        return Err(AmmError::InvalidAmount(what));
    }
    Ok(())
}

/// Non-payable operations refuse attached value.
pub(super) fn reject_value(ctx: CallContext) -> Result<()> {
    if ctx.value().is_zero() {
        Ok(())
    } else {
        Err(AmmError::InvalidAmount("operation does not accept value"))
    }
}

impl PeerExchange for Exchange {
    fn address(&self) -> Address {
        self.address
    }

    fn base_to_asset_input_price(&self, env: &Env, base_sold: Amount) -> Result<Amount> {
        Self::base_to_asset_input_price(self, env, base_sold)
    }

    fn base_to_asset_output_price(&self, env: &Env, assets_bought: Amount) -> Result<Amount> {
        Self::base_to_asset_output_price(self, env, assets_bought)
    }

    fn base_to_asset_transfer_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        min_assets: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<Amount> {
        Self::base_to_asset_transfer_input(self, env, ctx, min_assets, deadline, recipient)
            .map(|result| result.amount_out())
    }

    fn base_to_asset_transfer_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        assets_bought: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<Amount> {
        Self::base_to_asset_transfer_output(self, env, ctx, assets_bought, deadline, recipient)
            .map(|result| result.amount_in())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::TokenLedger;

    fn token() -> Address {
        Address::repeat_byte(0x70)
    }

    fn pool_addr() -> Address {
        Address::repeat_byte(0xEE)
    }

    fn alice() -> Address {
        Address::repeat_byte(0xA1)
    }

    fn bob() -> Address {
        Address::repeat_byte(0xB0)
    }

    fn setup() -> (Env, Exchange) {
        let mut env = Env::new(Timestamp::new(100));
        let Ok(()) = env.register_asset(token(), Box::new(TokenLedger::new())) else {
            panic!("fresh asset");
        };
        let Ok(pool) = Exchange::new(pool_addr(), token(), Address::ZERO, ExchangeConfig::default())
        else {
            panic!("valid pool");
        };
        (env, pool)
    }

    fn with_shares(pool: &mut Exchange, env: &mut Env, holder: Address, n: u128) {
        let Ok(()) = pool.mint_shares(env, holder, Shares::new(n)) else {
            panic!("mint");
        };
    }

    #[test]
    fn new_rejects_bad_addresses() {
        let cfg = ExchangeConfig::default();
        assert_eq!(
            Exchange::new(pool_addr(), Address::ZERO, Address::ZERO, cfg.clone()),
            Err(AmmError::InvalidAsset)
        );
        assert_eq!(
            Exchange::new(Address::ZERO, token(), Address::ZERO, cfg.clone()),
            Err(AmmError::InvalidRecipient)
        );
        assert_eq!(
            Exchange::new(token(), token(), Address::ZERO, cfg),
            Err(AmmError::InvalidRecipient)
        );
    }

    #[test]
    fn metadata_comes_from_config() {
        let (_, pool) = setup();
        assert_eq!(pool.name(), "Hydra Exchange V1");
        assert_eq!(pool.symbol(), "HYDRA-V1");
        assert_eq!(pool.decimals(), Decimals::MAX);
        assert_eq!(pool.asset(), token());
        assert_eq!(pool.address(), pool_addr());
    }

    #[test]
    fn empty_pool_prices_are_invalid_reserve() {
        let (env, pool) = setup();
        assert_eq!(
            pool.asset_to_base_output_price(&env, Amount::new(1)),
            Err(AmmError::InvalidReserve)
        );
        assert_eq!(
            pool.base_to_asset_output_price(&env, Amount::ZERO),
            Err(AmmError::InvalidAmount("assets bought must be positive"))
        );
    }

    #[test]
    fn share_transfer_moves_balance_and_logs() {
        let (mut env, mut pool) = setup();
        with_shares(&mut pool, &mut env, alice(), 100);
        let Ok(()) = pool.transfer_shares(&mut env, CallContext::new(alice()), bob(), Shares::new(40))
        else {
            panic!("funded");
        };
        assert_eq!(pool.share_balance(&alice()), Shares::new(60));
        assert_eq!(pool.share_balance(&bob()), Shares::new(40));
        assert_eq!(pool.total_shares(), Shares::new(100));
        let Some(last) = env.logs().last() else {
            panic!("event logged");
        };
        assert_eq!(
            last.event,
            Event::SharesTransferred {
                from: alice(),
                to: bob(),
                shares: Shares::new(40)
            }
        );
    }

    #[test]
    fn share_transfer_over_balance_fails_cleanly() {
        let (mut env, mut pool) = setup();
        with_shares(&mut pool, &mut env, alice(), 10);
        let logged = env.logs().len();
        assert_eq!(
            pool.transfer_shares(&mut env, CallContext::new(alice()), bob(), Shares::new(11)),
            Err(AmmError::InsufficientShares)
        );
        assert_eq!(pool.share_balance(&alice()), Shares::new(10));
        assert_eq!(env.logs().len(), logged);
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let (mut env, mut pool) = setup();
        with_shares(&mut pool, &mut env, alice(), 50);
        let Ok(()) = pool.approve_shares(&mut env, CallContext::new(alice()), bob(), Shares::new(30))
        else {
            panic!("approve");
        };
        assert_eq!(pool.share_allowance(&alice(), &bob()), Shares::new(30));

        let Ok(()) = pool.transfer_shares_from(
            &mut env,
            CallContext::new(bob()),
            alice(),
            bob(),
            Shares::new(20),
        ) else {
            panic!("allowed");
        };
        assert_eq!(pool.share_allowance(&alice(), &bob()), Shares::new(10));
        assert_eq!(pool.share_balance(&bob()), Shares::new(20));

        assert_eq!(
            pool.transfer_shares_from(
                &mut env,
                CallContext::new(bob()),
                alice(),
                bob(),
                Shares::new(11),
            ),
            Err(AmmError::InsufficientAllowance)
        );
    }

    #[test]
    fn share_ops_reject_value() {
        let (mut env, mut pool) = setup();
        let ctx = CallContext::new(alice()).with_value(Amount::new(1));
        assert_eq!(
            pool.approve_shares(&mut env, ctx, bob(), Shares::new(1)),
            Err(AmmError::InvalidAmount("operation does not accept value"))
        );
    }

    #[test]
    fn burn_reduces_total() {
        let (mut env, mut pool) = setup();
        with_shares(&mut pool, &mut env, alice(), 7);
        let Ok(()) = pool.burn_shares(&mut env, alice(), Shares::new(7)) else {
            panic!("held");
        };
        assert!(pool.total_shares().is_zero());
        assert!(pool.share_balance(&alice()).is_zero());
        assert_eq!(
            pool.burn_shares(&mut env, alice(), Shares::new(1)),
            Err(AmmError::InsufficientShares)
        );
    }

    #[test]
    fn recipient_rules() {
        let (_, pool) = setup();
        assert_eq!(pool.ensure_recipient(Address::ZERO), Err(AmmError::InvalidRecipient));
        assert_eq!(pool.ensure_recipient(pool_addr()), Err(AmmError::InvalidRecipient));
        assert_eq!(pool.ensure_recipient(bob()), Ok(()));
    }

    #[test]
    fn peer_address_matches_pool() {
        let (_, pool) = setup();
        let peer: &dyn PeerExchange = &pool;
        assert_eq!(peer.address(), pool_addr());
    }
}
