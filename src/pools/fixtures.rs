//! Shared setup for pool unit and property tests.

#![allow(clippy::panic)]

use alloy_primitives::Address;

use super::Exchange;
use crate::config::ExchangeConfig;
use crate::domain::{Amount, CallContext, Decimals, Shares, Timestamp};
use crate::env::Env;
use crate::ledger::{Ledger, TokenLedger};

pub(crate) const NOW: u64 = 1_000;

pub(crate) fn token() -> Address {
    Address::repeat_byte(0x70)
}

pub(crate) fn pool_addr() -> Address {
    Address::repeat_byte(0xEE)
}

pub(crate) fn provider() -> Address {
    Address::repeat_byte(0x11)
}

pub(crate) fn alice() -> Address {
    Address::repeat_byte(0xA1)
}

pub(crate) fn bob() -> Address {
    Address::repeat_byte(0xB0)
}

/// `whole` units at 18 decimals.
pub(crate) fn ether(whole: u64) -> Amount {
    Decimals::MAX.scale_up(whole)
}

pub(crate) fn deadline() -> Timestamp {
    Timestamp::new(NOW + 300)
}

/// Host with `token()` registered and `provider`, `alice` and `bob` each
/// holding 1 000 ether of both sides, with unlimited allowance for `spender`.
pub(crate) fn funded_env(spender: Address) -> Env {
    let mut ledger = TokenLedger::new();
    let mut env = Env::new(Timestamp::new(NOW));
    for holder in [provider(), alice(), bob()] {
        let Ok(()) = ledger.mint(&holder, ether(1_000)) else {
            panic!("mint asset");
        };
        let Ok(()) = env.base_mut().mint(&holder, ether(1_000)) else {
            panic!("mint base");
        };
        Ledger::approve(&mut ledger, &holder, &spender, Amount::MAX);
    }
    let Ok(()) = env.register_asset(token(), Box::new(ledger)) else {
        panic!("fresh asset");
    };
    env
}

pub(crate) fn empty_pool() -> (Env, Exchange) {
    let env = funded_env(pool_addr());
    let Ok(pool) = Exchange::new(pool_addr(), token(), Address::ZERO, ExchangeConfig::default())
    else {
        panic!("valid pool");
    };
    (env, pool)
}

/// Pool bootstrapped by `provider` with the given reserves.
pub(crate) fn seeded_pool(base: Amount, assets: Amount) -> (Env, Exchange) {
    let (mut env, mut pool) = empty_pool();
    let ctx = CallContext::new(provider()).with_value(base);
    let Ok(_) = pool.add_liquidity(&mut env, ctx, Shares::ZERO, assets, deadline()) else {
        panic!("bootstrap deposit");
    };
    (env, pool)
}

pub(crate) fn asset_balance(env: &Env, holder: &Address) -> Amount {
    let Ok(ledger) = env.asset(&token()) else {
        panic!("registered");
    };
    ledger.balance_of(holder)
}
