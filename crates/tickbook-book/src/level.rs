//! A single price level: the endpoints of one FIFO chain.
//!
//! Orders at the same tick are chained head→tail through their forward
//! `next` links; the level record only stores the endpoints and a running
//! total. Invariant: `total_shares` equals the sum of `shares_remaining`
//! over the live chain, and `head`/`tail` are both `None` iff the level is
//! empty — at which point the owning side's mask bit must be clear.

use tickbook_types::OrderId;

/// Endpoints and running total of one tick's FIFO queue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Level {
    /// Oldest live order (next to be filled).
    pub head: Option<OrderId>,
    /// Newest live order (insertion point).
    pub tail: Option<OrderId>,
    /// Sum of `shares_remaining` over the chain.
    pub total_shares: u64,
}

impl Level {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
