//! External ledger collaborators.
//!
//! Pools never own balances.  The traded asset's per-holder balances live
//! in a [`Ledger`] (one per asset address), and base currency lives in the
//! [`BaseCurrency`] ledger, which also models attached-value payments and
//! recipients that refuse them.  Both are installed in the
//! [`Env`](crate::env::Env) host.

mod base_currency;
mod token_ledger;

pub use base_currency::BaseCurrency;
pub use token_ledger::{Ledger, TokenLedger};
