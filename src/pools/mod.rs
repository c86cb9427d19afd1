//! The exchange pool and its operations.
//!
//! [`Exchange`] is a constant-product pool pairing one asset with the base
//! currency.  Its operations are grouped by concern:
//!
//! | Module | Operations |
//! |--------|------------|
//! | `exchange` | construction, accessors, share token, price queries |
//! | `liquidity` | `add_liquidity`, `remove_liquidity` |
//! | `swap` | base ↔ asset swaps (exact input / exact output), `receive` |
//! | `router` | asset → base → asset routes through a [`PeerExchange`](crate::traits::PeerExchange) |

mod exchange;
mod liquidity;
mod router;
mod swap;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod proptest_properties;

pub use exchange::Exchange;
