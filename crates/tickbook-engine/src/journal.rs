//! Append-only observational journal.
//!
//! Every state-changing operation appends its records here in execution
//! order. Collaborators drain the journal; the engine never reads it back.

use tickbook_types::EngineEvent;

/// Append-only event log for one engine instance.
#[derive(Debug, Default)]
pub struct Journal {
    events: Vec<EngineEvent>,
}

impl Journal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: EngineEvent) {
        self.events.push(event);
    }

    /// Take all accumulated events, oldest first.
    pub fn drain(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events accumulated since the last drain.
    #[must_use]
    pub fn events(&self) -> &[EngineEvent] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tickbook_types::{BookKey, MarketId, OrderId, OutcomeId, Side, Tick, UserId};

    fn placed(order_id: u64) -> EngineEvent {
        EngineEvent::OrderPlaced {
            key: BookKey::new(MarketId(1), OutcomeId(0), Side::Bid),
            order_id: OrderId(order_id),
            owner: UserId(1),
            tick: Tick::new(50).unwrap(),
            requested_shares: 10,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut journal = Journal::new();
        journal.push(placed(1));
        journal.push(placed(2));
        assert_eq!(journal.len(), 2);

        let events = journal.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            EngineEvent::OrderPlaced {
                order_id: OrderId(1),
                ..
            }
        ));
        assert!(journal.is_empty());
    }
}
