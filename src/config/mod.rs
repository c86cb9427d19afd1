//! Pool configuration.
//!
//! [`ExchangeConfig`] is the declarative blueprint a
//! [`Registry`](crate::factory::Registry) stamps on every pool it creates.

mod exchange;

pub use exchange::ExchangeConfig;
