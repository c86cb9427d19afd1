//! Property-based tests using `proptest` for exchange invariants.
//!
//! 1. **Constant product**: `base · asset` never decreases across swaps.
//! 2. **Share conservation**: `total_shares` equals the sum of balances.
//! 3. **No over-withdrawal**: a withdrawal never exceeds its pro-rata slice.
//! 4. **Quote round trip**: executing a quoted trade yields the quote.
//! 5. **Quote idempotence**: repeated queries agree.

#![allow(clippy::panic)]

use alloy_primitives::U256;
use proptest::prelude::*;

use super::fixtures::{alice, bob, deadline, ether, provider, seeded_pool};
use super::Exchange;
use crate::domain::{Amount, CallContext, Shares};
use crate::env::Env;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn product(env: &Env, pool: &Exchange) -> U256 {
    let Ok(assets) = pool.asset_reserve(env) else {
        panic!("registered asset");
    };
    pool.base_reserve(env).get() * assets.get()
}

fn share_sum(pool: &Exchange) -> U256 {
    [provider(), alice(), bob()]
        .iter()
        .map(|holder| pool.share_balance(holder).get())
        .fold(U256::ZERO, |acc, held| acc + held)
}

/// One of four single-hop entry points, chosen by `kind`.
fn run_swap(env: &mut Env, pool: &mut Exchange, kind: u8, size: u128) {
    let amount = Amount::new(size);
    let trader = CallContext::new(alice());
    let one = Amount::new(1);
    // Failures (slippage on dust, draining) are fine; the state must stay consistent.
    let _ = match kind % 4 {
        0 => pool.base_to_asset_swap_input(env, trader.with_value(amount), one, deadline()),
        1 => pool.asset_to_base_transfer_input(env, trader, amount, one, deadline(), bob()),
        2 => pool.base_to_asset_transfer_output(
            env,
            trader.with_value(ether(400)),
            amount,
            deadline(),
            bob(),
        ),
        _ => pool.asset_to_base_swap_output(env, trader, amount, ether(400), deadline()),
    };
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Whole-ether reserves in [1, 300].
fn reserve_strategy() -> impl Strategy<Value = u64> {
    1u64..=300u64
}

/// Raw trade sizes from dust up to 20 ether.
fn trade_strategy() -> impl Strategy<Value = u128> {
    1u128..=20_000_000_000_000_000_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Constant Product
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_never_decreases(
        base in reserve_strategy(),
        assets in reserve_strategy(),
        trades in prop::collection::vec((any::<u8>(), trade_strategy()), 1..8),
    ) {
        let (mut env, mut pool) = seeded_pool(ether(base), ether(assets));
        for (kind, size) in trades {
            let before = product(&env, &pool);
            run_swap(&mut env, &mut pool, kind, size);
            let after = product(&env, &pool);
            prop_assert!(after >= before, "product fell from {} to {}", before, after);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Share Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_shares_are_conserved(
        base in reserve_strategy(),
        assets in reserve_strategy(),
        deposit in 1u64..=50u64,
        moved in 1u128..=1_000_000_000_000_000_000u128,
        burned in 1u128..=1_000_000_000_000_000_000u128,
    ) {
        let (mut env, mut pool) = seeded_pool(ether(base), ether(assets));
        let ctx = CallContext::new(alice());
        let _ = pool.add_liquidity(
            &mut env,
            ctx.with_value(ether(deposit)),
            Shares::new(1),
            ether(1_000),
            deadline(),
        );
        prop_assert_eq!(pool.total_shares().get(), share_sum(&pool));

        let _ = pool.transfer_shares(&mut env, CallContext::new(provider()), bob(), Shares::new(moved));
        prop_assert_eq!(pool.total_shares().get(), share_sum(&pool));

        let _ = pool.remove_liquidity(
            &mut env,
            CallContext::new(bob()),
            Shares::new(burned),
            Amount::new(1),
            Amount::new(1),
            deadline(),
        );
        prop_assert_eq!(pool.total_shares().get(), share_sum(&pool));
    }
}

// ---------------------------------------------------------------------------
// Property 3: No Over-Withdrawal
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_withdrawal_within_pro_rata_slice(
        base in reserve_strategy(),
        assets in reserve_strategy(),
        trades in prop::collection::vec((any::<u8>(), trade_strategy()), 0..4),
        fraction in 1u64..=100u64,
    ) {
        let (mut env, mut pool) = seeded_pool(ether(base), ether(assets));
        for (kind, size) in trades {
            run_swap(&mut env, &mut pool, kind, size);
        }
        let total = pool.total_shares().get();
        let shares = total * U256::from(fraction) / U256::from(100u64);
        let base_reserve = pool.base_reserve(&env).get();
        let Ok(asset_reserve) = pool.asset_reserve(&env) else {
            panic!("registered asset");
        };

        let Ok((base_out, asset_out)) = pool.remove_liquidity(
            &mut env,
            CallContext::new(provider()),
            Shares::from_raw(shares),
            Amount::new(1),
            Amount::new(1),
            deadline(),
        ) else {
            return Ok(());
        };
        prop_assert!(base_out.get() * total <= shares * base_reserve);
        prop_assert!(asset_out.get() * total <= shares * asset_reserve.get());
    }
}

// ---------------------------------------------------------------------------
// Property 4: Quote Round Trip
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quoted_input_trade_matches_quote(
        base in reserve_strategy(),
        assets in reserve_strategy(),
        size in trade_strategy(),
    ) {
        let (mut env, mut pool) = seeded_pool(ether(base), ether(assets));
        let sold = Amount::new(size);
        let Ok(quoted) = pool.base_to_asset_input_price(&env, sold) else {
            return Ok(());
        };
        if quoted.is_zero() {
            return Ok(());
        }
        let ctx = CallContext::new(alice()).with_value(sold);
        let Ok(result) = pool.base_to_asset_swap_input(&mut env, ctx, quoted, deadline()) else {
            panic!("quoted trade must execute");
        };
        prop_assert_eq!(result.amount_out(), quoted);
    }

    #[test]
    fn prop_quoted_output_trade_costs_quote(
        base in reserve_strategy(),
        assets in reserve_strategy(),
        size in trade_strategy(),
    ) {
        let (mut env, mut pool) = seeded_pool(ether(base), ether(assets));
        let wanted = Amount::new(size);
        let Ok(quoted) = pool.asset_to_base_output_price(&env, wanted) else {
            return Ok(());
        };
        if quoted > ether(1_000) {
            return Ok(());
        }
        let Ok(result) =
            pool.asset_to_base_swap_output(&mut env, CallContext::new(alice()), wanted, quoted, deadline())
        else {
            panic!("quoted trade must execute");
        };
        prop_assert_eq!(result.amount_in(), quoted);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Quote Idempotence
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quotes_are_idempotent(
        base in reserve_strategy(),
        assets in reserve_strategy(),
        size in trade_strategy(),
    ) {
        let (env, pool) = seeded_pool(ether(base), ether(assets));
        let amount = Amount::new(size);
        prop_assert_eq!(
            pool.base_to_asset_input_price(&env, amount),
            pool.base_to_asset_input_price(&env, amount)
        );
        prop_assert_eq!(
            pool.base_to_asset_output_price(&env, amount),
            pool.base_to_asset_output_price(&env, amount)
        );
        prop_assert_eq!(
            pool.asset_to_base_input_price(&env, amount),
            pool.asset_to_base_input_price(&env, amount)
        );
        prop_assert_eq!(
            pool.asset_to_base_output_price(&env, amount),
            pool.asset_to_base_output_price(&env, amount)
        );
    }
}
