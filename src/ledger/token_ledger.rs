//! Fungible asset ledger: the contract a pool has with its traded asset.

use std::collections::HashMap;
use std::fmt::Debug;

use alloy_primitives::Address;

use crate::domain::Amount;
use crate::error::LedgerError;

/// Balance/allowance bookkeeping for one fungible asset.
///
/// A pool relies only on this interface: it reads its own balance as the
/// asset reserve, pays out with [`transfer`](Ledger::transfer), and pulls
/// deposits with [`transfer_from`](Ledger::transfer_from) against an
/// allowance the depositor granted beforehand.  Any failure is fatal to the
/// calling pool operation.
///
/// Implementations must be cloneable through [`box_clone`](Ledger::box_clone)
/// so the host can checkpoint and roll back every ledger.
pub trait Ledger: Debug {
    /// Units held by `holder`.
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Units `spender` may still move on behalf of `owner`.
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] if `from` holds less than `amount`.
    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), LedgerError>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientAllowance`] or
    /// [`LedgerError::InsufficientBalance`].
    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    /// Sets the allowance of `spender` over `owner`'s units to `amount`.
    fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount);

    /// Clones the ledger behind a fresh box.
    fn box_clone(&self) -> Box<dyn Ledger>;
}

impl Clone for Box<dyn Ledger> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// In-memory [`Ledger`] implementation.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_exchange::domain::Amount;
/// use hydra_exchange::ledger::{Ledger, TokenLedger};
///
/// let alice = Address::repeat_byte(1);
/// let bob = Address::repeat_byte(2);
/// let mut ledger = TokenLedger::new();
/// ledger.mint(&alice, Amount::new(100)).expect("fits");
/// ledger.transfer(&alice, &bob, Amount::new(40)).expect("funded");
/// assert_eq!(ledger.balance_of(&bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenLedger {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl TokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `amount` new units to `holder`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::BalanceOverflow`] if the balance would exceed 256 bits.
    pub fn mint(&mut self, holder: &Address, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance_of(holder);
        let credited = balance
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.balances.insert(*holder, credited);
        Ok(())
    }

    fn debit(&mut self, holder: &Address, amount: Amount) -> Result<(), LedgerError> {
        let remaining = self
            .balance_of(holder)
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance)?;
        self.balances.insert(*holder, remaining);
        Ok(())
    }
}

impl Ledger for TokenLedger {
    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        // Credit check first so a failing transfer leaves both sides intact.
        self.balance_of(to)
            .checked_add(&amount)
            .ok_or(LedgerError::BalanceOverflow)?;
        self.debit(from, amount)?;
        self.mint(to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let remaining = self
            .allowance(from, spender)
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientAllowance)?;
        self.transfer(from, to, amount)?;
        self.allowances.insert((*from, *spender), remaining);
        Ok(())
    }

    fn approve(&mut self, owner: &Address, spender: &Address, amount: Amount) {
        self.allowances.insert((*owner, *spender), amount);
    }

    fn box_clone(&self) -> Box<dyn Ledger> {
        Box::new(self.clone())
    }
}
