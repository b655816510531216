//! Book addressing.

use serde::{Deserialize, Serialize};

use crate::{MarketId, OutcomeId, Side};

/// Identifies one (market, outcome, side) book. Immutable; namespaces all
/// per-book state (order ids, levels, masks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BookKey {
    pub market: MarketId,
    pub outcome: OutcomeId,
    pub side: Side,
}

impl BookKey {
    #[must_use]
    pub fn new(market: MarketId, outcome: OutcomeId, side: Side) -> Self {
        Self {
            market,
            outcome,
            side,
        }
    }

    /// The Ask-side key of this (market, outcome) pair.
    ///
    /// Share custody is side-agnostic: holdings for a pair are always
    /// keyed under the Ask-side namespace, no matter which side a
    /// holder's order sits on.
    #[must_use]
    pub fn custody_key(self) -> Self {
        Self {
            side: Side::Ask,
            ..self
        }
    }

    /// The key of the book an incoming order on this key matches against.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self {
            side: self.side.opposite(),
            ..self
        }
    }
}

impl std::fmt::Display for BookKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.market, self.outcome, self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custody_key_is_ask_side() {
        let bid = BookKey::new(MarketId(1), OutcomeId(0), Side::Bid);
        let ask = BookKey::new(MarketId(1), OutcomeId(0), Side::Ask);
        assert_eq!(bid.custody_key(), ask);
        assert_eq!(ask.custody_key(), ask);
    }

    #[test]
    fn opposite_flips_side_only() {
        let key = BookKey::new(MarketId(3), OutcomeId(1), Side::Bid);
        let opp = key.opposite();
        assert_eq!(opp.market, key.market);
        assert_eq!(opp.outcome, key.outcome);
        assert_eq!(opp.side, Side::Ask);
    }

    #[test]
    fn display_format() {
        let key = BookKey::new(MarketId(2), OutcomeId(1), Side::Ask);
        assert_eq!(format!("{key}"), "mkt:2/out:1/ASK");
    }
}
