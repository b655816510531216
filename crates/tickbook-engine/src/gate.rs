//! The market-lifecycle seam.
//!
//! Market creation, resolution, and finalization live outside the core.
//! The engine consumes a single question from that collaborator: is this
//! market tradable right now? Placement and takes ask it; cancellation
//! deliberately does not.

use std::collections::HashSet;

use tickbook_types::MarketId;

/// Lifecycle gate consulted before any trading operation.
pub trait MarketGate {
    fn is_tradable(&self, market: MarketId) -> bool;
}

/// A gate that admits every market. Useful for tests and single-market
/// embeddings whose lifecycle is managed elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl MarketGate for OpenGate {
    fn is_tradable(&self, _market: MarketId) -> bool {
        true
    }
}

/// A gate backed by an explicit set of tradable markets.
#[derive(Debug, Clone, Default)]
pub struct ListGate {
    tradable: HashSet<MarketId>,
}

impl ListGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a market tradable.
    pub fn open(&mut self, market: MarketId) {
        self.tradable.insert(market);
    }

    /// Mark a market no longer tradable (resolved, paused, finalized).
    pub fn close(&mut self, market: MarketId) {
        self.tradable.remove(&market);
    }
}

impl MarketGate for ListGate {
    fn is_tradable(&self, market: MarketId) -> bool {
        self.tradable.contains(&market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_gate_admits_everything() {
        assert!(OpenGate.is_tradable(MarketId(0)));
        assert!(OpenGate.is_tradable(MarketId(u64::MAX)));
    }

    #[test]
    fn list_gate_tracks_membership() {
        let mut gate = ListGate::new();
        let market = MarketId(7);
        assert!(!gate.is_tradable(market));
        gate.open(market);
        assert!(gate.is_tradable(market));
        gate.close(market);
        assert!(!gate.is_tradable(market));
    }
}
