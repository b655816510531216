//! Per-side bitmask over the 99-tick price grid.
//!
//! Bit 0 corresponds to tick 1, bit 98 to tick 99. A set bit must mirror
//! level non-emptiness exactly: an orphaned bit makes an empty level look
//! liquid, a missing bit hides real liquidity. Best-price discovery is a
//! single bit-scan instead of an O(n) walk over sparse levels.

use tickbook_types::Tick;

/// A 99-bit occupancy mask for one book side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickMask(u128);

impl TickMask {
    /// All ticks empty.
    #[must_use]
    pub fn new() -> Self {
        Self(0)
    }

    /// Mark a tick non-empty. Idempotent.
    pub fn set(&mut self, tick: Tick) {
        self.0 |= 1u128 << tick.bit();
    }

    /// Mark a tick empty. Idempotent.
    pub fn clear(&mut self, tick: Tick) {
        self.0 &= !(1u128 << tick.bit());
    }

    #[must_use]
    pub fn is_set(&self, tick: Tick) -> bool {
        self.0 & (1u128 << tick.bit()) != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of non-empty ticks.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest non-empty tick, if any (best price on an Ask side).
    #[must_use]
    pub fn lowest_set(&self) -> Option<Tick> {
        (self.0 != 0).then(|| Tick::from_bit(self.0.trailing_zeros()))
    }

    /// Highest non-empty tick, if any (best price on a Bid side).
    #[must_use]
    pub fn highest_set(&self) -> Option<Tick> {
        (self.0 != 0).then(|| Tick::from_bit(127 - self.0.leading_zeros()))
    }

    /// Lowest non-empty tick at or below `bound` — the best Ask an
    /// incoming Bid priced at `bound` may cross.
    #[must_use]
    pub fn lowest_set_at_most(&self, bound: Tick) -> Option<Tick> {
        let eligible = self.0 & ((1u128 << (bound.bit() + 1)) - 1);
        (eligible != 0).then(|| Tick::from_bit(eligible.trailing_zeros()))
    }

    /// Highest non-empty tick at or above `bound` — the best Bid an
    /// incoming Ask priced at `bound` may cross.
    #[must_use]
    pub fn highest_set_at_least(&self, bound: Tick) -> Option<Tick> {
        let eligible = self.0 & !((1u128 << bound.bit()) - 1);
        (eligible != 0).then(|| Tick::from_bit(127 - eligible.leading_zeros()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(raw: u16) -> Tick {
        Tick::new(raw).unwrap()
    }

    #[test]
    fn empty_mask_has_no_best() {
        let mask = TickMask::new();
        assert!(mask.is_empty());
        assert_eq!(mask.lowest_set(), None);
        assert_eq!(mask.highest_set(), None);
        assert_eq!(mask.lowest_set_at_most(tick(99)), None);
        assert_eq!(mask.highest_set_at_least(tick(1)), None);
    }

    #[test]
    fn set_clear_idempotent() {
        let mut mask = TickMask::new();
        mask.set(tick(50));
        mask.set(tick(50));
        assert!(mask.is_set(tick(50)));
        assert_eq!(mask.count(), 1);
        mask.clear(tick(50));
        mask.clear(tick(50));
        assert!(!mask.is_set(tick(50)));
        assert!(mask.is_empty());
    }

    #[test]
    fn extreme_ticks_representable() {
        let mut mask = TickMask::new();
        mask.set(tick(1));
        mask.set(tick(99));
        assert_eq!(mask.lowest_set(), Some(tick(1)));
        assert_eq!(mask.highest_set(), Some(tick(99)));
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn lowest_set_at_most_respects_bound() {
        let mut mask = TickMask::new();
        mask.set(tick(30));
        mask.set(tick(60));
        // Bound below every set tick: nothing eligible.
        assert_eq!(mask.lowest_set_at_most(tick(29)), None);
        // Bound exactly at a set tick: inclusive.
        assert_eq!(mask.lowest_set_at_most(tick(30)), Some(tick(30)));
        // Bound above both: lowest wins.
        assert_eq!(mask.lowest_set_at_most(tick(99)), Some(tick(30)));
    }

    #[test]
    fn highest_set_at_least_respects_bound() {
        let mut mask = TickMask::new();
        mask.set(tick(30));
        mask.set(tick(60));
        assert_eq!(mask.highest_set_at_least(tick(61)), None);
        assert_eq!(mask.highest_set_at_least(tick(60)), Some(tick(60)));
        assert_eq!(mask.highest_set_at_least(tick(1)), Some(tick(60)));
    }

    #[test]
    fn bound_scan_over_full_grid() {
        let mut mask = TickMask::new();
        for raw in 1..=99 {
            mask.set(tick(raw));
        }
        assert_eq!(mask.count(), 99);
        for raw in 1..=99 {
            assert_eq!(mask.lowest_set_at_most(tick(raw)), Some(tick(1)));
            assert_eq!(mask.highest_set_at_least(tick(raw)), Some(tick(99)));
        }
    }
}
