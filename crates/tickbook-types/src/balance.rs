//! Balance tracking types for the reservation discipline.
//!
//! Every user holds a `free` balance (usable for new orders) and a
//! `reserved` balance (locked 1:1 behind live resting orders). Points and
//! each per-(market, outcome) share position are independent ledgers with
//! identical semantics.

use serde::{Deserialize, Serialize};

use crate::{BookKey, MarketId, OutcomeId, Side};

/// A single balance entry for a (user, asset) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Available for new orders / withdrawal.
    pub free: u64,
    /// Locked behind live resting orders; not withdrawable.
    pub reserved: u64,
}

impl BalanceEntry {
    /// Total balance (free + reserved).
    #[must_use]
    pub fn total(&self) -> u64 {
        self.free + self.reserved
    }

    /// Whether this entry has no balance at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.free == 0 && self.reserved == 0
    }
}

/// An asset a balance entry can denominate.
///
/// Shares are keyed by the Ask-side [`BookKey`] of their (market, outcome)
/// pair; the [`Asset::shares`] constructor enforces that, so two orders on
/// opposite sides of the same pair settle against one custody entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Asset {
    Points,
    Shares(BookKey),
}

impl Asset {
    /// The share asset of a (market, outcome) pair.
    #[must_use]
    pub fn shares(market: MarketId, outcome: OutcomeId) -> Self {
        Self::Shares(BookKey::new(market, outcome, Side::Ask))
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Points => write!(f, "POINTS"),
            Self::Shares(key) => write!(f, "SHARES[{}/{}]", key.market, key.outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_entry_default_is_zero() {
        let entry = BalanceEntry::default();
        assert_eq!(entry.free, 0);
        assert_eq!(entry.reserved, 0);
        assert!(entry.is_zero());
    }

    #[test]
    fn balance_entry_total() {
        let entry = BalanceEntry {
            free: 100,
            reserved: 50,
        };
        assert_eq!(entry.total(), 150);
        assert!(!entry.is_zero());
    }

    #[test]
    fn share_asset_is_side_agnostic() {
        let asset = Asset::shares(MarketId(1), OutcomeId(0));
        let Asset::Shares(key) = asset else {
            panic!("expected share asset");
        };
        assert_eq!(key.side, Side::Ask);
        assert_eq!(key, key.custody_key());
    }

    #[test]
    fn asset_display() {
        assert_eq!(format!("{}", Asset::Points), "POINTS");
        let shares = Asset::shares(MarketId(5), OutcomeId(1));
        assert_eq!(format!("{shares}"), "SHARES[mkt:5/out:1]");
    }

    #[test]
    fn balance_entry_serde_roundtrip() {
        let entry = BalanceEntry {
            free: 123,
            reserved: 45,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: BalanceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
