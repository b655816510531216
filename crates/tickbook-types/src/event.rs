//! Observational records for the engine's audit trail.
//!
//! Every state-changing operation appends typed events: a placement, one
//! fill per maker match, a cancellation, or a take summary. Events are
//! ordered within a single call; ordering across calls follows the total
//! order of operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BookKey, FillRecord, OrderId, Tick, UserId};

/// A single entry in the engine's append-only journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A remainder rested in the book.
    OrderPlaced {
        key: BookKey,
        order_id: OrderId,
        owner: UserId,
        tick: Tick,
        requested_shares: u64,
        placed_at: DateTime<Utc>,
    },
    /// One maker match.
    Filled(FillRecord),
    /// An order was removed by its owner.
    OrderCancelled {
        key: BookKey,
        order_id: OrderId,
        owner: UserId,
        tick: Tick,
        cancelled_shares: u64,
        cancelled_at: DateTime<Utc>,
    },
    /// Summary of one take call (emitted after its fills).
    TakeExecuted {
        key: BookKey,
        taker: UserId,
        limit_tick: Tick,
        requested_shares: u64,
        filled_shares: u64,
        points_traded: u64,
        executed_at: DateTime<Utc>,
    },
}

impl EngineEvent {
    /// Stable kind tag for log filtering.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderPlaced { .. } => "ORDER_PLACED",
            Self::Filled(_) => "FILLED",
            Self::OrderCancelled { .. } => "ORDER_CANCELLED",
            Self::TakeExecuted { .. } => "TAKE_EXECUTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MarketId, OutcomeId, Side};

    #[test]
    fn event_kinds() {
        let event = EngineEvent::OrderPlaced {
            key: BookKey::new(MarketId(1), OutcomeId(0), Side::Bid),
            order_id: OrderId(1),
            owner: UserId(1),
            tick: Tick::new(50).unwrap(),
            requested_shares: 10,
            placed_at: Utc::now(),
        };
        assert_eq!(event.kind(), "ORDER_PLACED");
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = EngineEvent::OrderCancelled {
            key: BookKey::new(MarketId(1), OutcomeId(0), Side::Ask),
            order_id: OrderId(2),
            owner: UserId(9),
            tick: Tick::new(40).unwrap(),
            cancelled_shares: 4,
            cancelled_at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
