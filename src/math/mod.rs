//! Arithmetic and pricing for the exchange engine.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on [`Amount`](crate::domain::Amount) and [`Shares`](crate::domain::Shares),
//! and the Pricing Engine: [`quote_output`] and [`quote_input`] with the
//! fixed `997 / 1000` fee factor.

mod checked;
mod pricing;

pub use checked::CheckedArithmetic;
pub use pricing::{quote_input, quote_output, FEE_DENOMINATOR, FEE_NUMERATOR};
