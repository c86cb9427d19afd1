//! Caller identity and attached base-currency value of a pool call.

use alloy_primitives::Address;

use super::Amount;

/// Who is calling a pool operation and how much base currency travels
/// with the call.
///
/// Payable operations move `value` from `caller` into the pool before any
/// pricing happens; non-payable operations reject a non-zero `value`.
///
/// # Examples
///
/// ```
/// use alloy_primitives::Address;
/// use hydra_exchange::domain::{Amount, CallContext};
///
/// let alice = Address::repeat_byte(0xA1);
/// let ctx = CallContext::new(alice).with_value(Amount::new(1_000));
/// assert_eq!(ctx.caller(), alice);
/// assert_eq!(ctx.value(), Amount::new(1_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    caller: Address,
    value: Amount,
}

impl CallContext {
    /// A call from `caller` carrying no value.
    #[must_use]
    pub const fn new(caller: Address) -> Self {
        Self {
            caller,
            value: Amount::ZERO,
        }
    }

    /// Attaches `value` units of base currency to the call.
    #[must_use]
    pub const fn with_value(self, value: Amount) -> Self {
        Self { value, ..self }
    }

    /// Returns the calling address.
    #[must_use]
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Returns the attached value.
    pub const fn value(&self) -> Amount {
        self.value
    }
}
