//! The discrete price grid.
//!
//! A [`Tick`] is a price in hundredths of one Point per share, restricted
//! to `[1, 99]`. Validation happens exactly once, at the boundary where a
//! raw integer enters the core; everything past that point trusts the value
//! and does unchecked arithmetic.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_ORDER_SHARES, TICK_MAX, TICK_MIN};
use crate::error::{Result, TickbookError};

/// A validated price level: Point-cents per share, in `[1, 99]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick(u16);

impl Tick {
    /// Validate a raw tick value.
    pub fn new(raw: u16) -> Result<Self> {
        if (TICK_MIN..=TICK_MAX).contains(&raw) {
            Ok(Self(raw))
        } else {
            Err(TickbookError::InvalidTick { tick: raw })
        }
    }

    /// The raw tick value, in `[1, 99]`.
    #[must_use]
    pub fn value(self) -> u16 {
        self.0
    }

    /// Zero-based bit position in a side mask (tick 1 → bit 0).
    #[must_use]
    pub fn bit(self) -> u32 {
        u32::from(self.0 - 1)
    }

    /// Reverse of [`Tick::bit`]. Callers must pass a bit in `[0, 98]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_bit(bit: u32) -> Self {
        debug_assert!(bit < u32::from(TICK_MAX));
        Self(bit as u16 + 1)
    }

    /// Points (in cents) exchanged for `shares` at this tick.
    ///
    /// Callers guarantee `shares <= MAX_ORDER_SHARES` (checked at the
    /// boundary), so the multiplication cannot overflow.
    #[must_use]
    pub fn points_for(self, shares: u64) -> u64 {
        debug_assert!(shares <= MAX_ORDER_SHARES);
        u64::from(self.0) * shares
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0.{:02}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_range_accepted() {
        assert!(Tick::new(1).is_ok());
        assert!(Tick::new(50).is_ok());
        assert!(Tick::new(99).is_ok());
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(matches!(
            Tick::new(0),
            Err(TickbookError::InvalidTick { tick: 0 })
        ));
        assert!(matches!(
            Tick::new(100),
            Err(TickbookError::InvalidTick { tick: 100 })
        ));
    }

    #[test]
    fn bit_mapping_roundtrips() {
        for raw in TICK_MIN..=TICK_MAX {
            let tick = Tick::new(raw).unwrap();
            assert_eq!(Tick::from_bit(tick.bit()), tick);
        }
        assert_eq!(Tick::new(1).unwrap().bit(), 0);
        assert_eq!(Tick::new(99).unwrap().bit(), 98);
    }

    #[test]
    fn points_are_tick_times_shares() {
        let tick = Tick::new(40).unwrap();
        assert_eq!(tick.points_for(10), 400);
        assert_eq!(tick.points_for(0), 0);
    }

    #[test]
    fn max_order_shares_cannot_overflow() {
        let tick = Tick::new(99).unwrap();
        // Largest permitted order at the most expensive tick stays in u64.
        let points = tick.points_for(MAX_ORDER_SHARES);
        assert!(points <= u64::MAX);
    }

    #[test]
    fn display_as_point_fraction() {
        assert_eq!(format!("{}", Tick::new(7).unwrap()), "0.07");
        assert_eq!(format!("{}", Tick::new(99).unwrap()), "0.99");
    }
}
