//! Trait abstractions at the seams between pools.
//!
//! [`PeerExchange`] is the capability a pool's router calls into when it
//! composes a two-hop trade.  [`Exchange`](crate::pools::Exchange)
//! implements it; integrators may supply their own implementation through
//! the routed-by-pool entry points.

mod peer_exchange;

pub use peer_exchange::PeerExchange;
