//! The resting order record.
//!
//! Orders live in a dense id-keyed map per book side and are chained into
//! per-tick FIFO queues through the forward-only `next` link. Once created,
//! `requested_shares` never changes; `shares_remaining` is the sole mutable
//! quantity and only ever decreases.

use serde::{Deserialize, Serialize};

use crate::{OrderId, Tick, UserId};

/// A resting limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub owner: UserId,
    pub tick: Tick,
    /// Size at creation. Immutable.
    pub requested_shares: u64,
    /// Live size. Monotonically non-increasing; the order is removed
    /// from its book the moment this reaches zero.
    pub shares_remaining: u64,
    /// Forward link to the next order at the same level, if any.
    pub next: Option<OrderId>,
}

impl Order {
    /// A fresh resting order at the tail of its level (no successor yet).
    #[must_use]
    pub fn new(id: OrderId, owner: UserId, tick: Tick, shares: u64) -> Self {
        Self {
            id,
            owner,
            tick,
            requested_shares: shares,
            shares_remaining: shares,
            next: None,
        }
    }

    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.shares_remaining == 0
    }

    #[must_use]
    pub fn filled_shares(&self) -> u64 {
        self.requested_shares - self.shares_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_order(shares: u64) -> Order {
        Order::new(OrderId(1), UserId(7), Tick::new(50).unwrap(), shares)
    }

    #[test]
    fn fresh_order_is_unfilled_tail() {
        let order = make_order(10);
        assert!(!order.is_filled());
        assert_eq!(order.filled_shares(), 0);
        assert_eq!(order.shares_remaining, order.requested_shares);
        assert!(order.next.is_none());
    }

    #[test]
    fn fill_tracking() {
        let mut order = make_order(10);
        order.shares_remaining -= 6;
        assert_eq!(order.filled_shares(), 6);
        assert!(!order.is_filled());
        order.shares_remaining = 0;
        assert!(order.is_filled());
        assert_eq!(order.filled_shares(), 10);
    }

    #[test]
    fn serde_roundtrip() {
        let order = make_order(4);
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }
}
