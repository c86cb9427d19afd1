//! Explicit rounding direction for integer division.

/// Direction in which an integer quotient is rounded.
///
/// Every division in the pricing and share arithmetic names its direction,
/// and the direction is always the one that favours the pool:
///
/// | Quantity | Direction |
/// |----------|-----------|
/// | output paid to a trader | [`Rounding::Down`] |
/// | input demanded from a trader | [`Rounding::Up`] |
/// | shares minted / reserves paid on withdrawal | [`Rounding::Down`] |
/// | asset demanded from a depositor | [`Rounding::Up`] |
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert_eq!(Rounding::Down.opposite(), Rounding::Up);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }

    /// Returns the other direction.
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}
