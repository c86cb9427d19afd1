//! Serialized execution host for pools and registries.
//!
//! [`Env`] plays the role of the surrounding platform: it owns the clock,
//! the [`BaseCurrency`] ledger, one [`Ledger`] per registered asset, and
//! the event log.  Operations run one at a time against a `&mut Env`; the
//! [`checkpoint`](Env::checkpoint) / [`rollback`](Env::rollback) pair is
//! what makes each pool operation all-or-nothing.
//!
//! # Examples
//!
//! ```
//! use alloy_primitives::Address;
//! use hydra_exchange::domain::{Amount, Timestamp};
//! use hydra_exchange::env::Env;
//! use hydra_exchange::ledger::TokenLedger;
//!
//! let token = Address::repeat_byte(0x70);
//! let mut env = Env::new(Timestamp::new(1_000));
//! env.register_asset(token, Box::new(TokenLedger::new())).expect("fresh asset");
//!
//! let cp = env.checkpoint();
//! env.base_mut().mint(&Address::repeat_byte(1), Amount::new(5)).expect("fits");
//! env.rollback(cp);
//! assert!(env.base().balance_of(&Address::repeat_byte(1)).is_zero());
//! ```

use std::collections::BTreeMap;

use alloy_primitives::Address;

use crate::domain::{Event, LogEntry, Timestamp};
use crate::error::{AmmError, Result};
use crate::ledger::{BaseCurrency, Ledger};

/// Snapshot of every ledger and the log length, taken by
/// [`Env::checkpoint`].
#[derive(Debug, Clone)]
pub struct Checkpoint {
    base: BaseCurrency,
    assets: BTreeMap<Address, Box<dyn Ledger>>,
    log_len: usize,
}

/// Ambient state shared by every pool: clock, ledgers and event log.
#[derive(Debug, Clone)]
pub struct Env {
    now: Timestamp,
    base: BaseCurrency,
    assets: BTreeMap<Address, Box<dyn Ledger>>,
    logs: Vec<LogEntry>,
}

impl Env {
    /// Creates an empty host whose clock reads `now`.
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            base: BaseCurrency::new(),
            assets: BTreeMap::new(),
            logs: Vec::new(),
        }
    }

    /// Current time, compared against operation deadlines.
    pub const fn now(&self) -> Timestamp {
        self.now
    }

    /// Moves the clock to `now`.
    pub fn set_time(&mut self, now: Timestamp) {
        self.now = now;
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&mut self, seconds: u64) {
        self.now = self.now.plus(seconds);
    }

    /// Base-currency ledger.
    pub const fn base(&self) -> &BaseCurrency {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut BaseCurrency {
        &mut self.base
    }

    /// Installs the ledger of the asset at `address`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`] if `address` is zero or already has a
    /// ledger.
    pub fn register_asset(&mut self, address: Address, ledger: Box<dyn Ledger>) -> Result<()> {
        if address.is_zero() || self.assets.contains_key(&address) {
            return Err(AmmError::InvalidAsset);
        }
        self.assets.insert(address, ledger);
        Ok(())
    }

    /// Ledger of the asset at `address`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`] if no ledger is installed there.
    pub fn asset(&self, address: &Address) -> Result<&dyn Ledger> {
        self.assets
            .get(address)
            .map(|ledger| ledger.as_ref())
            .ok_or(AmmError::InvalidAsset)
    }

    /// Mutable ledger of the asset at `address`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidAsset`] if no ledger is installed there.
    pub fn asset_mut(&mut self, address: &Address) -> Result<&mut dyn Ledger> {
        match self.assets.get_mut(address) {
            Some(ledger) => Ok(ledger.as_mut()),
            None => Err(AmmError::InvalidAsset),
        }
    }

    /// Appends `event` to the log on behalf of `emitter`.
    pub fn emit(&mut self, emitter: Address, event: Event) {
        self.logs.push(LogEntry { emitter, event });
    }

    /// Events committed so far, oldest first.
    pub fn logs(&self) -> &[LogEntry] {
        &self.logs
    }

    /// Removes and returns every logged event.
    pub fn drain_logs(&mut self) -> Vec<LogEntry> {
        std::mem::take(&mut self.logs)
    }

    /// Captures all ledgers and the log position.
    ///
    /// The clock is not part of a checkpoint.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            base: self.base.clone(),
            assets: self.assets.clone(),
            log_len: self.logs.len(),
        }
    }

    /// Restores the ledgers captured by `checkpoint` and discards events
    /// logged after it.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.base = checkpoint.base;
        self.assets = checkpoint.assets;
        self.logs.truncate(checkpoint.log_len);
    }
}
