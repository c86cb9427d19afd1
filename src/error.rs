//! Unified error types for the Hydra exchange engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Failures reported by the ledger collaborators are carried
//! as [`LedgerError`] and converted with `?`.
//!
//! Every error aborts the operation that raised it: the pool's atomic scope
//! rolls back all ledger movements, share mutations and events before the
//! error reaches the caller.

use thiserror::Error;

/// Failures reported by a ledger collaborator (asset or base currency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The sender does not hold enough units.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The spender was not granted enough allowance by the owner.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The recipient refused the payment.
    #[error("payment rejected by recipient")]
    PaymentRejected,

    /// Crediting the recipient would overflow its balance.
    #[error("balance overflow")]
    BalanceOverflow,
}

/// Crate-wide error enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// The operation's deadline is earlier than the current time.
    #[error("deadline expired")]
    Expired,

    /// A zero or otherwise out-of-domain quantity was supplied.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The recipient or peer is the zero address or the pool itself.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// The asset address is zero, unknown, or already registered.
    #[error("invalid asset")]
    InvalidAsset,

    /// The pricing formula was invoked against an empty or inconsistent pool.
    #[error("invalid reserve")]
    InvalidReserve,

    /// A computed result violates the caller's stated bound.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// The holder owns fewer shares than requested.
    #[error("insufficient shares")]
    InsufficientShares,

    /// The spender was not approved for enough shares.
    #[error("insufficient share allowance")]
    InsufficientAllowance,

    /// No pool is registered at the given address.
    #[error("pool not found")]
    PoolNotFound,

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A ledger collaborator rejected a movement.
    #[error("ledger failure: {0}")]
    Ledger(#[from] LedgerError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;
