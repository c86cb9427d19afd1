//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_exchange::prelude::*;
//! ```
//!
//! Brings the domain value types, the host and its ledgers, the pool and
//! registry, the router seam and the error types into scope.

pub use crate::domain::{
    Amount, CallContext, Decimals, Event, LogEntry, Rounding, RouteInput, RouteOutput, Shares,
    SwapResult, Timestamp,
};

pub use crate::traits::PeerExchange;

pub use crate::math::CheckedArithmetic;

pub use crate::config::ExchangeConfig;

pub use crate::env::Env;
pub use crate::ledger::{BaseCurrency, Ledger, TokenLedger};

pub use crate::error::{AmmError, LedgerError, Result};

pub use crate::factory::Registry;
pub use crate::pools::Exchange;
