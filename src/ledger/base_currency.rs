//! Base-currency ledger with attached-value transport.

use std::collections::{HashMap, HashSet};

use alloy_primitives::Address;

use crate::domain::Amount;
use crate::error::LedgerError;

/// Balances of the base currency every pool is quoted against.
///
/// Base currency moves only through [`transfer`](Self::transfer): when a
/// caller attaches value to a pool call, and when a pool pays out or
/// refunds.  Accounts flagged with [`reject_payments`](Self::reject_payments)
/// refuse incoming payments, which aborts the operation that attempted
/// the payment.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_exchange::domain::Amount;
/// use hydra_exchange::error::LedgerError;
/// use hydra_exchange::ledger::BaseCurrency;
///
/// let alice = Address::repeat_byte(1);
/// let vault = Address::repeat_byte(2);
/// let mut base = BaseCurrency::new();
/// base.mint(&alice, Amount::new(10)).expect("fits");
/// base.reject_payments(&vault, true);
/// assert_eq!(
///     base.transfer(&alice, &vault, Amount::new(1)),
///     Err(LedgerError::PaymentRejected)
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseCurrency {
    balances: HashMap<Address, Amount>,
    rejecting: HashSet<Address>,
}

impl BaseCurrency {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of base currency held by `holder`.
    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    /// Credits `amount` new units to `holder`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::BalanceOverflow`] if the balance would exceed 256 bits.
    pub fn mint(&mut self, holder: &Address, amount: Amount) -> Result<(), LedgerError> {
        let credited = self
            .balance_of(holder)
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.balances.insert(*holder, credited);
        Ok(())
    }

    /// Marks `holder` as refusing (or accepting again) incoming payments.
    pub fn reject_payments(&mut self, holder: &Address, reject: bool) {
        if reject {
            self.rejecting.insert(*holder);
        } else {
            self.rejecting.remove(holder);
        }
    }

    /// Sends `amount` from `from` to `to`.
    ///
    /// A zero-amount transfer is a no-op and is never rejected.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::PaymentRejected`] if `to` refuses payments.
    /// - [`LedgerError::InsufficientBalance`] if `from` holds too little.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        if self.rejecting.contains(to) {
            return Err(LedgerError::PaymentRejected);
        }
        self.balance_of(to)
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        let remaining = self
            .balance_of(from)
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance)?;
        self.balances.insert(*from, remaining);
        self.mint(to, amount)
    }
}
