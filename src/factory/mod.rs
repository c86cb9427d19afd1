//! Pool creation and discovery.
//!
//! A [`Registry`] creates at most one [`Exchange`](crate::pools::Exchange)
//! per asset, assigns sequential ids, and is the authority on which
//! addresses are its pools.  Its routed-by-asset entry points resolve the
//! second pool of a two-hop trade from its own map, so the peer is always
//! a pool of the same registry.
//!
//! # Usage
//!
//! ```rust
//! use alloy_primitives::Address;
//! use hydra_exchange::config::ExchangeConfig;
//! use hydra_exchange::domain::Timestamp;
//! use hydra_exchange::env::Env;
//! use hydra_exchange::factory::Registry;
//!
//! let mut env = Env::new(Timestamp::new(0));
//! let mut registry = Registry::new(Address::repeat_byte(0xFA), ExchangeConfig::default());
//! let pool = registry
//!     .create_pool(&mut env, Address::repeat_byte(0x70))
//!     .expect("pool created");
//! assert_eq!(registry.exchange(&pool).expect("known").registry(), registry.address());
//! ```

mod registry;

pub use registry::Registry;
