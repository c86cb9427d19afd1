//! Fundamental domain value types used throughout the exchange engine.
//!
//! This module contains the value types that model the exchange domain:
//! amounts, shares, deadlines, call contexts, route parameters, trade
//! results and events.  Quantities are 256-bit newtypes with checked
//! arithmetic; addresses are [`alloy_primitives::Address`].

mod amount;
mod call_context;
mod decimals;
mod event;
mod rounding;
mod route;
mod shares;
mod swap_result;
mod timestamp;

pub use alloy_primitives::Address;
pub use amount::Amount;
pub use call_context::CallContext;
pub use decimals::Decimals;
pub use event::{Event, LogEntry};
pub use rounding::Rounding;
pub use route::{RouteInput, RouteOutput};
pub use shares::Shares;
pub use swap_result::SwapResult;
pub use timestamp::Timestamp;
