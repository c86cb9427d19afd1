//! Single-hop swaps between the base currency and the pool's asset.
//!
//! Each direction has two primitives (exact input, exact output) and four
//! public entry points: a *swap* variant paying the caller and a
//! *transfer* variant paying a distinct recipient.
//!
//! # Reserve Snapshots
//!
//! The two directions read their reserves at different moments:
//!
//! | Direction | Input arrives | Reserve used for pricing |
//! |-----------|---------------|--------------------------|
//! | base → asset | attached value, before pricing | pool balance minus the attached value |
//! | asset → base | pulled, after pricing | pool balance before the pull |
//!
//! Either way the trader's own input is never counted as liquidity it
//! trades against.

use alloy_primitives::Address;

use super::exchange::{non_zero, reject_value};
use super::Exchange;
use crate::domain::{Amount, CallContext, Event, SwapResult, Timestamp};
use crate::env::Env;
use crate::error::{AmmError, Result};
use crate::math::{quote_input, quote_output, CheckedArithmetic};

impl Exchange {
    /// Sells the attached value for at least `min_assets`, paid to the
    /// caller.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidAmount`] if the value or `min_assets` is zero.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_assets`.
    /// - [`AmmError::InvalidReserve`] if the pool is empty.
    pub fn base_to_asset_swap_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        min_assets: Amount,
        deadline: Timestamp,
    ) -> Result<SwapResult> {
        self.atomically(env, "base_to_asset_swap_input", |pool, env| {
            pool.base_in_exact(env, ctx, min_assets, deadline, ctx.caller())
        })
    }

    /// Like [`base_to_asset_swap_input`](Self::base_to_asset_swap_input),
    /// delivering to `recipient`.
    ///
    /// # Errors
    ///
    /// Additionally [`AmmError::InvalidRecipient`] if `recipient` is zero or
    /// this pool.
    pub fn base_to_asset_transfer_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        min_assets: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        self.atomically(env, "base_to_asset_transfer_input", |pool, env| {
            pool.ensure_recipient(recipient)?;
            pool.base_in_exact(env, ctx, min_assets, deadline, recipient)
        })
    }

    /// Buys exactly `assets_bought` for the caller, spending at most the
    /// attached value and refunding the rest.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidAmount`] if `assets_bought` is zero.
    /// - [`AmmError::SlippageExceeded`] if the price exceeds the value.
    /// - [`AmmError::InvalidReserve`] if the pool is empty or would be
    ///   drained.
    /// - [`AmmError::Ledger`] if the caller refuses the refund.
    pub fn base_to_asset_swap_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        assets_bought: Amount,
        deadline: Timestamp,
    ) -> Result<SwapResult> {
        self.atomically(env, "base_to_asset_swap_output", |pool, env| {
            pool.base_out_exact(env, ctx, assets_bought, deadline, ctx.caller())
        })
    }

    /// Like [`base_to_asset_swap_output`](Self::base_to_asset_swap_output),
    /// delivering to `recipient`.
    ///
    /// # Errors
    ///
    /// Additionally [`AmmError::InvalidRecipient`].
    pub fn base_to_asset_transfer_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        assets_bought: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        self.atomically(env, "base_to_asset_transfer_output", |pool, env| {
            pool.ensure_recipient(recipient)?;
            pool.base_out_exact(env, ctx, assets_bought, deadline, recipient)
        })
    }

    /// Sells exactly `assets_sold` for at least `min_base`, paid to the
    /// caller.  The caller must have approved this pool for the asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidAmount`] if any amount is zero or the call
    ///   carries value.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_base`.
    /// - [`AmmError::Ledger`] if the asset pull fails.
    pub fn asset_to_base_swap_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        assets_sold: Amount,
        min_base: Amount,
        deadline: Timestamp,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_base_swap_input", |pool, env| {
            pool.asset_in_exact(env, ctx, assets_sold, min_base, deadline, ctx.caller())
        })
    }

    /// Like [`asset_to_base_swap_input`](Self::asset_to_base_swap_input),
    /// paying `recipient`.
    ///
    /// # Errors
    ///
    /// Additionally [`AmmError::InvalidRecipient`].
    pub fn asset_to_base_transfer_input(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        assets_sold: Amount,
        min_base: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_base_transfer_input", |pool, env| {
            pool.ensure_recipient(recipient)?;
            pool.asset_in_exact(env, ctx, assets_sold, min_base, deadline, recipient)
        })
    }

    /// Buys exactly `base_bought` for the caller, selling at most
    /// `max_assets`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Expired`] if `deadline` has passed.
    /// - [`AmmError::InvalidAmount`] if `base_bought` is zero or the call
    ///   carries value.
    /// - [`AmmError::SlippageExceeded`] if the price exceeds `max_assets`.
    pub fn asset_to_base_swap_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        base_bought: Amount,
        max_assets: Amount,
        deadline: Timestamp,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_base_swap_output", |pool, env| {
            pool.asset_out_exact(env, ctx, base_bought, max_assets, deadline, ctx.caller())
        })
    }

    /// Like [`asset_to_base_swap_output`](Self::asset_to_base_swap_output),
    /// paying `recipient`.
    ///
    /// # Errors
    ///
    /// Additionally [`AmmError::InvalidRecipient`].
    pub fn asset_to_base_transfer_output(
        &mut self,
        env: &mut Env,
        ctx: CallContext,
        base_bought: Amount,
        max_assets: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        self.atomically(env, "asset_to_base_transfer_output", |pool, env| {
            pool.ensure_recipient(recipient)?;
            pool.asset_out_exact(env, ctx, base_bought, max_assets, deadline, recipient)
        })
    }

    /// Bare payment: sells the attached value for at least one unit of the
    /// asset, delivered to the payer, with the current time as deadline.
    ///
    /// # Errors
    ///
    /// As for [`base_to_asset_swap_input`](Self::base_to_asset_swap_input).
    pub fn receive(&mut self, env: &mut Env, ctx: CallContext) -> Result<SwapResult> {
        let now = env.now();
        self.atomically(env, "receive", |pool, env| {
            pool.base_in_exact(env, ctx, Amount::new(1), now, ctx.caller())
        })
    }

    // -- primitives -------------------------------------------------------

    fn base_in_exact(
        &self,
        env: &mut Env,
        ctx: CallContext,
        min_assets: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        Self::ensure_live(env, deadline)?;
        let base_sold = ctx.value();
        non_zero(base_sold, "base sold must be positive")?;
        non_zero(min_assets, "minimum assets must be positive")?;

        self.receive_value(env, ctx)?;
        let base_reserve = self.base_reserve(env).safe_sub(&base_sold)?;
        let asset_reserve = self.asset_reserve(env)?;

        let assets_bought = quote_output(base_sold, base_reserve, asset_reserve)?;
        if assets_bought < min_assets {
            return Err(AmmError::SlippageExceeded("assets bought below minimum"));
        }

        self.send_asset(env, recipient, assets_bought)?;
        env.emit(
            self.address(),
            Event::AssetPurchase {
                buyer: ctx.caller(),
                base_sold,
                assets_bought,
            },
        );
        self.log_commit("base_to_asset_input", ctx.caller(), base_sold, assets_bought);
        SwapResult::new(base_sold, assets_bought)
    }

    fn base_out_exact(
        &self,
        env: &mut Env,
        ctx: CallContext,
        assets_bought: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        Self::ensure_live(env, deadline)?;
        non_zero(assets_bought, "assets bought must be positive")?;
        let max_base = ctx.value();

        self.receive_value(env, ctx)?;
        let base_reserve = self.base_reserve(env).safe_sub(&max_base)?;
        let asset_reserve = self.asset_reserve(env)?;

        let base_sold = quote_input(assets_bought, base_reserve, asset_reserve)?;
        if base_sold > max_base {
            return Err(AmmError::SlippageExceeded("base required above attached value"));
        }

        self.pay_base(env, ctx.caller(), max_base.safe_sub(&base_sold)?)?;
        self.send_asset(env, recipient, assets_bought)?;
        env.emit(
            self.address(),
            Event::AssetPurchase {
                buyer: ctx.caller(),
                base_sold,
                assets_bought,
            },
        );
        self.log_commit("base_to_asset_output", ctx.caller(), base_sold, assets_bought);
        SwapResult::new(base_sold, assets_bought)
    }

    fn asset_in_exact(
        &self,
        env: &mut Env,
        ctx: CallContext,
        assets_sold: Amount,
        min_base: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        reject_value(ctx)?;
        Self::ensure_live(env, deadline)?;
        non_zero(assets_sold, "assets sold must be positive")?;
        non_zero(min_base, "minimum base must be positive")?;

        let asset_reserve = self.asset_reserve(env)?;
        let base_reserve = self.base_reserve(env);
        let base_bought = quote_output(assets_sold, asset_reserve, base_reserve)?;
        if base_bought < min_base {
            return Err(AmmError::SlippageExceeded("base bought below minimum"));
        }

        self.pay_base(env, recipient, base_bought)?;
        self.pull_asset(env, ctx.caller(), assets_sold)?;
        env.emit(
            self.address(),
            Event::BasePurchase {
                buyer: ctx.caller(),
                assets_sold,
                base_bought,
            },
        );
        self.log_commit("asset_to_base_input", ctx.caller(), assets_sold, base_bought);
        SwapResult::new(assets_sold, base_bought)
    }

    fn asset_out_exact(
        &self,
        env: &mut Env,
        ctx: CallContext,
        base_bought: Amount,
        max_assets: Amount,
        deadline: Timestamp,
        recipient: Address,
    ) -> Result<SwapResult> {
        reject_value(ctx)?;
        Self::ensure_live(env, deadline)?;
        non_zero(base_bought, "base bought must be positive")?;

        let asset_reserve = self.asset_reserve(env)?;
        let base_reserve = self.base_reserve(env);
        let assets_sold = quote_input(base_bought, asset_reserve, base_reserve)?;
        if assets_sold > max_assets {
            return Err(AmmError::SlippageExceeded("assets required above maximum"));
        }

        self.pay_base(env, recipient, base_bought)?;
        self.pull_asset(env, ctx.caller(), assets_sold)?;
        env.emit(
            self.address(),
            Event::BasePurchase {
                buyer: ctx.caller(),
                assets_sold,
                base_bought,
            },
        );
        self.log_commit("asset_to_base_output", ctx.caller(), assets_sold, base_bought);
        SwapResult::new(assets_sold, base_bought)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::pools::fixtures::{
        alice, asset_balance, bob, deadline, ether, pool_addr, seeded_pool, NOW,
    };

    fn reference_pool() -> (Env, Exchange) {
        seeded_pool(ether(5), ether(10))
    }

    #[test]
    fn base_in_prices_against_reserve_without_attached_value() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice()).with_value(ether(1));
        let Ok(result) = pool.base_to_asset_swap_input(&mut env, ctx, Amount::new(1), deadline())
        else {
            panic!("valid trade");
        };
        // Counting the attached value as reserve would give 1_424_896_384_164_641_989.
        assert_eq!(result.amount_out(), Amount::new(1_662_497_915_624_478_906));
        assert_eq!(pool.base_reserve(&env), ether(6));
        assert_eq!(
            asset_balance(&env, &alice()),
            ether(1_000).safe_add(&result.amount_out()).unwrap_or_default()
        );
    }

    #[test]
    fn asset_in_prices_against_reserve_before_pull() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice());
        let Ok(result) =
            pool.asset_to_base_swap_input(&mut env, ctx, ether(1), Amount::new(1), deadline())
        else {
            panic!("valid trade");
        };
        // Reading the reserve after the pull would give 415_520_546_803_367_508.
        assert_eq!(result.amount_out(), Amount::new(453_305_446_940_074_565));
        let Ok(assets) = pool.asset_reserve(&env) else {
            panic!("registered");
        };
        assert_eq!(assets, ether(11));
    }

    #[test]
    fn base_out_refunds_excess_value() {
        let (mut env, mut pool) = reference_pool();
        let before = env.base().balance_of(&alice());
        let ctx = CallContext::new(alice()).with_value(ether(2));
        let Ok(result) = pool.base_to_asset_swap_output(&mut env, ctx, ether(1), deadline()) else {
            panic!("valid trade");
        };
        // Pricing against the balance including the value would demand 780_118_132_174_300_680.
        assert_eq!(result.amount_in(), Amount::new(557_227_237_267_357_629));
        assert_eq!(
            before.safe_sub(&env.base().balance_of(&alice())),
            Ok(result.amount_in())
        );
        assert_eq!(asset_balance(&env, &alice()), ether(1_001));
    }

    #[test]
    fn asset_out_pulls_exact_input() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice());
        let Ok(result) =
            pool.asset_to_base_swap_output(&mut env, ctx, ether(1), ether(3), deadline())
        else {
            panic!("valid trade");
        };
        assert_eq!(result.amount_in(), Amount::new(2_507_522_567_703_109_328));
        assert_eq!(env.base().balance_of(&alice()), ether(1_001));
        assert_eq!(
            ether(1_000).safe_sub(&asset_balance(&env, &alice())),
            Ok(result.amount_in())
        );
    }

    #[test]
    fn quote_then_execute_matches() {
        let (mut env, mut pool) = reference_pool();
        let Ok(quoted) = pool.asset_to_base_input_price(&env, ether(2)) else {
            panic!("non-empty pool");
        };
        let Ok(result) = pool.asset_to_base_swap_input(
            &mut env,
            CallContext::new(bob()),
            ether(2),
            quoted,
            deadline(),
        ) else {
            panic!("valid trade");
        };
        assert_eq!(result.amount_out(), quoted);
    }

    #[test]
    fn transfer_variant_pays_recipient() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice()).with_value(ether(1));
        let Ok(result) =
            pool.base_to_asset_transfer_input(&mut env, ctx, Amount::new(1), deadline(), bob())
        else {
            panic!("valid trade");
        };
        assert_eq!(asset_balance(&env, &alice()), ether(1_000));
        assert_eq!(
            asset_balance(&env, &bob()),
            ether(1_000).safe_add(&result.amount_out()).unwrap_or_default()
        );
    }

    #[test]
    fn transfer_variant_rejects_zero_and_self() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice());
        for recipient in [Address::ZERO, pool_addr()] {
            assert_eq!(
                pool.asset_to_base_transfer_output(
                    &mut env,
                    ctx,
                    ether(1),
                    ether(3),
                    deadline(),
                    recipient,
                ),
                Err(AmmError::InvalidRecipient)
            );
        }
    }

    #[test]
    fn expired_trade_leaves_state_unchanged() {
        let (mut env, mut pool) = reference_pool();
        let logged = env.logs().len();
        let ctx = CallContext::new(alice()).with_value(ether(1));
        assert_eq!(
            pool.base_to_asset_swap_input(&mut env, ctx, Amount::new(1), Timestamp::new(NOW - 1)),
            Err(AmmError::Expired)
        );
        assert_eq!(pool.base_reserve(&env), ether(5));
        assert_eq!(env.base().balance_of(&alice()), ether(1_000));
        assert_eq!(env.logs().len(), logged);
    }

    #[test]
    fn slippage_rolls_back_attached_value() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice()).with_value(ether(1));
        let Err(AmmError::SlippageExceeded(_)) =
            pool.base_to_asset_swap_input(&mut env, ctx, ether(2), deadline())
        else {
            panic!("expected SlippageExceeded");
        };
        assert_eq!(env.base().balance_of(&alice()), ether(1_000));
        assert_eq!(pool.base_reserve(&env), ether(5));
    }

    #[test]
    fn zero_amounts_rejected() {
        let (mut env, mut pool) = reference_pool();
        let Err(AmmError::InvalidAmount(_)) = pool.base_to_asset_swap_input(
            &mut env,
            CallContext::new(alice()),
            Amount::new(1),
            deadline(),
        ) else {
            panic!("expected InvalidAmount");
        };
        let Err(AmmError::InvalidAmount(_)) = pool.asset_to_base_swap_input(
            &mut env,
            CallContext::new(alice()),
            ether(1),
            Amount::ZERO,
            deadline(),
        ) else {
            panic!("expected InvalidAmount");
        };
    }

    #[test]
    fn asset_side_refuses_attached_value() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice()).with_value(Amount::new(1));
        assert_eq!(
            pool.asset_to_base_swap_input(&mut env, ctx, ether(1), Amount::new(1), deadline()),
            Err(AmmError::InvalidAmount("operation does not accept value"))
        );
    }

    #[test]
    fn rejected_refund_aborts_trade() {
        let (mut env, mut pool) = reference_pool();
        env.base_mut().reject_payments(&alice(), true);
        let ctx = CallContext::new(alice()).with_value(ether(2));
        assert_eq!(
            pool.base_to_asset_swap_output(&mut env, ctx, ether(1), deadline()),
            Err(AmmError::Ledger(LedgerError::PaymentRejected))
        );
        assert_eq!(asset_balance(&env, &alice()), ether(1_000));
        assert_eq!(pool.base_reserve(&env), ether(5));
    }

    #[test]
    fn draining_output_is_invalid_reserve() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(alice()).with_value(ether(100));
        assert_eq!(
            pool.base_to_asset_swap_output(&mut env, ctx, ether(10), deadline()),
            Err(AmmError::InvalidReserve)
        );
    }

    #[test]
    fn receive_buys_for_payer() {
        let (mut env, mut pool) = reference_pool();
        let ctx = CallContext::new(bob()).with_value(ether(1));
        let Ok(result) = pool.receive(&mut env, ctx) else {
            panic!("valid payment");
        };
        assert_eq!(result.amount_out(), Amount::new(1_662_497_915_624_478_906));
        let Some(entry) = env.logs().last() else {
            panic!("event logged");
        };
        assert_eq!(
            entry.event,
            Event::AssetPurchase {
                buyer: bob(),
                base_sold: ether(1),
                assets_bought: result.amount_out(),
            }
        );
    }

    #[test]
    fn empty_pool_swaps_are_invalid_reserve() {
        let (mut env, mut pool) = crate::pools::fixtures::empty_pool();
        let ctx = CallContext::new(alice()).with_value(ether(1));
        assert_eq!(
            pool.base_to_asset_swap_input(&mut env, ctx, Amount::new(1), deadline()),
            Err(AmmError::InvalidReserve)
        );
        assert_eq!(env.base().balance_of(&alice()), ether(1_000));
    }
}
