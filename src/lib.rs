//! # Hydra Exchange
//!
//! Constant-product exchange engine: pools pairing one asset with a base
//! currency, proportional liquidity shares, single-hop swaps in exact-input
//! and exact-output modes, and two-hop asset-to-asset routes through a peer
//! pool.
//!
//! Pricing uses a fixed 0.3% fee (`997 / 1000`) on the input side, with
//! outputs rounded down and inputs rounded up so the reserve product never
//! shrinks.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hydra-exchange = "0.1"
//! ```
//!
//! ## Create a pool, seed it, and trade
//!
//! ```rust
//! use alloy_primitives::Address;
//! use hydra_exchange::prelude::*;
//!
//! let token = Address::repeat_byte(0x70);
//! let lp = Address::repeat_byte(0x11);
//! let trader = Address::repeat_byte(0xA1);
//!
//! // 1. Host with a base-currency balance and a token ledger
//! let mut env = Env::new(Timestamp::new(1_000));
//! let mut ledger = TokenLedger::new();
//! ledger.mint(&lp, Decimals::MAX.scale_up(100)).expect("fits");
//! env.register_asset(token, Box::new(ledger)).expect("fresh asset");
//! env.base_mut().mint(&lp, Decimals::MAX.scale_up(100)).expect("fits");
//! env.base_mut().mint(&trader, Decimals::MAX.scale_up(10)).expect("fits");
//!
//! // 2. Create the pool through a registry
//! let mut registry = Registry::new(Address::repeat_byte(0xFA), ExchangeConfig::default());
//! let pool_addr = registry.create_pool(&mut env, token).expect("pool created");
//! env.asset_mut(&token).expect("registered").approve(&lp, &pool_addr, Amount::MAX);
//!
//! // 3. Seed 5 base : 10 token
//! let pool = registry.exchange_mut(&pool_addr).expect("known pool");
//! let deadline = env.now().plus(60);
//! let seed = CallContext::new(lp).with_value(Decimals::MAX.scale_up(5));
//! pool.add_liquidity(&mut env, seed, Shares::ZERO, Decimals::MAX.scale_up(10), deadline)
//!     .expect("bootstrap");
//!
//! // 4. Sell 1 base for at least one token unit
//! let buy = CallContext::new(trader).with_value(Decimals::MAX.scale_up(1));
//! let result = pool
//!     .base_to_asset_swap_input(&mut env, buy, Amount::new(1), deadline)
//!     .expect("swap succeeded");
//! assert_eq!(result.amount_out(), Amount::new(1_662_497_915_624_478_906));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Consumer   │  CallContext + Env
//! └──────┬──────┘
//!        │ create_pool / routed-by-asset trades
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  asset ↔ pool maps, sequential ids
//! └──────┬──────┘
//!        │ owns
//!        ▼
//! ┌─────────────┐   PeerExchange   ┌─────────────┐
//! │  Exchange    │ ───────────────▶ │  peer pool   │
//! └──────┬──────┘                   └─────────────┘
//!        │ quote_output / quote_input
//!        ▼
//! ┌─────────────┐
//! │    Math      │  pricing engine, checked arithmetic
//! └──────┬──────┘
//!        ▼
//! ┌─────────────┐
//! │   Domain     │  Amount, Shares, Timestamp, Event, …
//! └─────────────┘
//! ```
//!
//! Balances never live in a pool.  [`Env`](env::Env) owns the base-currency
//! ledger, one ledger per asset and the event log, and rolls all of them
//! back when an operation fails.
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Timestamp`](domain::Timestamp), [`Event`](domain::Event), etc. |
//! | [`math`]   | Pricing engine ([`quote_output`](math::quote_output), [`quote_input`](math::quote_input)) and checked arithmetic |
//! | [`config`] | [`ExchangeConfig`](config::ExchangeConfig) pool blueprint |
//! | [`ledger`] | Ledger collaborators: [`Ledger`](ledger::Ledger), [`TokenLedger`](ledger::TokenLedger), [`BaseCurrency`](ledger::BaseCurrency) |
//! | [`env`]    | [`Env`](env::Env) execution host with checkpoint / rollback |
//! | [`traits`] | [`PeerExchange`](traits::PeerExchange) router seam |
//! | [`pools`]  | [`Exchange`](pools::Exchange): liquidity, swaps, routes, share token |
//! | [`factory`] | [`Registry`](factory::Registry): create, look up, route by asset |
//! | [`error`]  | [`AmmError`](error::AmmError) and [`LedgerError`](error::LedgerError) |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod env;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
