//! One side of one (market, outcome) pair's book.
//!
//! A [`BookSide`] owns its order-id allocation (monotonic from 1, never
//! reused), a dense id-keyed order map, the per-tick [`Level`] records, and
//! the side's [`TickMask`]. Orders within a level are a singly linked FIFO
//! chain: price priority by tick, strict arrival order within a tick.
//!
//! Removal of a non-head node needs its predecessor. Callers supply
//! predecessor *candidates* obtained from a prior read-only scan
//! ([`BookSide::cancel_candidates`]); the mutating splice then walks
//! forward from each live candidate, which amortizes an O(n) chain walk
//! into an O(candidates) operation.

use std::collections::HashMap;

use tickbook_types::{Order, OrderId, Result, Side, Tick, TickbookError, UserId};

use crate::level::Level;
use crate::tick_index::TickMask;

/// Outcome of consuming shares from the head of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadFill {
    pub order_id: OrderId,
    pub owner: UserId,
    /// The head order reached zero and was removed from the book.
    pub drained: bool,
    /// The level reached zero and its mask bit was cleared.
    pub level_emptied: bool,
}

/// One side of a (market, outcome) pair's book.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    /// Next order id to hand out. Advances on every allocation and never
    /// rolls back, so ids are never reused across cancellations.
    next_order_id: OrderId,
    mask: TickMask,
    levels: HashMap<Tick, Level>,
    orders: HashMap<OrderId, Order>,
}

impl BookSide {
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self {
            side,
            next_order_id: OrderId::FIRST,
            mask: TickMask::new(),
            levels: HashMap::new(),
            orders: HashMap::new(),
        }
    }

    #[must_use]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Snapshot of the side's occupancy mask.
    #[must_use]
    pub fn mask(&self) -> TickMask {
        self.mask
    }

    /// Hand out the next order id.
    pub fn allocate_order_id(&mut self) -> OrderId {
        let id = self.next_order_id;
        self.next_order_id = id.next();
        id
    }

    // =================================================================
    // Insertion
    // =================================================================

    /// Append a fresh order to the tail of its tick's FIFO chain.
    ///
    /// Sets the mask bit when the level was empty. The id must come from
    /// [`BookSide::allocate_order_id`] on this side.
    pub fn insert(&mut self, id: OrderId, owner: UserId, tick: Tick, shares: u64) -> Result<()> {
        let order = Order::new(id, owner, tick, shares);
        let level = self.levels.entry(tick).or_default();

        match level.tail {
            Some(tail_id) => {
                let tail = self.orders.get_mut(&tail_id).ok_or_else(|| {
                    TickbookError::Internal(format!("dangling tail {tail_id} at {tick}"))
                })?;
                tail.next = Some(id);
            }
            None => {
                level.head = Some(id);
                self.mask.set(tick);
            }
        }
        level.tail = Some(id);
        level.total_shares += shares;
        self.orders.insert(id, order);
        Ok(())
    }

    // =================================================================
    // Matching support
    // =================================================================

    /// Best resting tick this side offers within a taker's price bound:
    /// lowest Ask at or below the bound, highest Bid at or above it.
    #[must_use]
    pub fn best_within(&self, bound: Tick) -> Option<Tick> {
        match self.side {
            Side::Ask => self.mask.lowest_set_at_most(bound),
            Side::Bid => self.mask.highest_set_at_least(bound),
        }
    }

    /// Best resting tick regardless of bound.
    #[must_use]
    pub fn best(&self) -> Option<Tick> {
        match self.side {
            Side::Ask => self.mask.lowest_set(),
            Side::Bid => self.mask.highest_set(),
        }
    }

    /// Consume `shares` from the head order at `tick`.
    ///
    /// Decrements the order and the level total; removes the order and
    /// clears the mask bit as they drain to zero. `shares` must not exceed
    /// the head's remainder — the planner guarantees it, and a violation
    /// is an internal fault.
    pub fn fill_head(&mut self, tick: Tick, shares: u64) -> Result<HeadFill> {
        let level = self
            .levels
            .get_mut(&tick)
            .ok_or_else(|| TickbookError::Internal(format!("fill at empty level {tick}")))?;
        let head_id = level
            .head
            .ok_or_else(|| TickbookError::Internal(format!("headless level {tick}")))?;
        let order = self
            .orders
            .get_mut(&head_id)
            .ok_or_else(|| TickbookError::Internal(format!("dangling head {head_id}")))?;

        if shares > order.shares_remaining {
            return Err(TickbookError::Internal(format!(
                "overfill of {head_id}: {shares} > {}",
                order.shares_remaining
            )));
        }

        order.shares_remaining -= shares;
        level.total_shares -= shares;
        let owner = order.owner;
        let drained = order.shares_remaining == 0;
        let mut level_emptied = false;

        if drained {
            let next = order.next;
            self.orders.remove(&head_id);
            level.head = next;
            if next.is_none() {
                level.tail = None;
                level_emptied = true;
                debug_assert_eq!(level.total_shares, 0);
                self.levels.remove(&tick);
                self.mask.clear(tick);
            }
        }

        Ok(HeadFill {
            order_id: head_id,
            owner,
            drained,
            level_emptied,
        })
    }

    // =================================================================
    // Cancellation
    // =================================================================

    /// Splice a specific order out of its chain.
    ///
    /// The head is unlinked directly. For any other node, the walk starts
    /// from each live candidate in turn and follows `next` links until the
    /// target is found immediately after some node; the first hit wins.
    /// Chain links never leave a level, so a candidate from the wrong level
    /// walks to its chain's end and is skipped. Walks share a step budget.
    pub fn remove_with_hints(
        &mut self,
        target: OrderId,
        candidates: &[OrderId],
        budget: u32,
    ) -> Result<Order> {
        let order = self
            .orders
            .get(&target)
            .ok_or(TickbookError::CancelTargetNotFound(target))?;
        let tick = order.tick;
        let level = self
            .levels
            .get(&tick)
            .ok_or_else(|| TickbookError::Internal(format!("order {target} without level")))?;

        if level.head == Some(target) {
            return self.unlink_head(tick, target);
        }

        let predecessor = self.find_predecessor(target, candidates, budget)?;
        self.splice_after(tick, predecessor, target)
    }

    /// Forward-walk the live chain from each candidate until one is found
    /// whose successor is the target.
    fn find_predecessor(
        &self,
        target: OrderId,
        candidates: &[OrderId],
        budget: u32,
    ) -> Result<OrderId> {
        let mut steps: u32 = 0;
        for &candidate in candidates {
            if candidate == target {
                continue;
            }
            let mut cursor = candidate;
            while let Some(order) = self.orders.get(&cursor) {
                steps += 1;
                if steps > budget {
                    return Err(TickbookError::ResourceExhausted { steps });
                }
                match order.next {
                    Some(next) if next == target => return Ok(cursor),
                    Some(next) => cursor = next,
                    None => break,
                }
            }
        }
        Err(TickbookError::CancelTargetNotFound(target))
    }

    fn unlink_head(&mut self, tick: Tick, head_id: OrderId) -> Result<Order> {
        let removed = self
            .orders
            .remove(&head_id)
            .ok_or_else(|| TickbookError::Internal(format!("dangling head {head_id}")))?;
        let level = self
            .levels
            .get_mut(&tick)
            .ok_or_else(|| TickbookError::Internal(format!("headless unlink at {tick}")))?;

        level.head = removed.next;
        level.total_shares -= removed.shares_remaining;
        if level.head.is_none() {
            level.tail = None;
            debug_assert_eq!(level.total_shares, 0);
            self.levels.remove(&tick);
            self.mask.clear(tick);
        }
        Ok(removed)
    }

    fn splice_after(&mut self, tick: Tick, predecessor: OrderId, target: OrderId) -> Result<Order> {
        let removed = self
            .orders
            .remove(&target)
            .ok_or(TickbookError::CancelTargetNotFound(target))?;
        let pred = self
            .orders
            .get_mut(&predecessor)
            .ok_or_else(|| TickbookError::Internal(format!("dangling predecessor {predecessor}")))?;
        pred.next = removed.next;

        let level = self
            .levels
            .get_mut(&tick)
            .ok_or_else(|| TickbookError::Internal(format!("spliced order without level {tick}")))?;
        if level.tail == Some(target) {
            level.tail = Some(predecessor);
        }
        level.total_shares -= removed.shares_remaining;
        Ok(removed)
    }

    /// Read-only predecessor discovery for the two-phase cancel protocol.
    ///
    /// Returns up to `max_n` ids immediately preceding the target in its
    /// chain (oldest first); empty when the target is the head. The scan
    /// shares the chain step budget and reports `ResourceExhausted` past it.
    pub fn cancel_candidates(
        &self,
        target: OrderId,
        max_n: usize,
        budget: u32,
    ) -> Result<Vec<OrderId>> {
        let order = self
            .orders
            .get(&target)
            .ok_or(TickbookError::CancelTargetNotFound(target))?;
        let level = self
            .levels
            .get(&order.tick)
            .ok_or_else(|| TickbookError::Internal(format!("order {target} without level")))?;

        let mut window: Vec<OrderId> = Vec::with_capacity(max_n);
        let mut cursor = level.head;
        let mut steps: u32 = 0;
        while let Some(id) = cursor {
            if id == target {
                return Ok(window);
            }
            steps += 1;
            if steps > budget {
                return Err(TickbookError::ResourceExhausted { steps });
            }
            if window.len() == max_n && max_n > 0 {
                window.remove(0);
            }
            if max_n > 0 {
                window.push(id);
            }
            cursor = self
                .orders
                .get(&id)
                .ok_or_else(|| TickbookError::Internal(format!("dangling link {id}")))?
                .next;
        }
        // The order map said the target is live, so the chain must reach it.
        Err(TickbookError::Internal(format!(
            "order {target} not on its chain"
        )))
    }

    // =================================================================
    // Queries
    // =================================================================

    #[must_use]
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    #[must_use]
    pub fn level(&self, tick: Tick) -> Option<&Level> {
        self.levels.get(&tick)
    }

    /// Live shares resting at a tick (0 when the level is absent).
    #[must_use]
    pub fn total_at(&self, tick: Tick) -> u64 {
        self.levels.get(&tick).map_or(0, |l| l.total_shares)
    }

    /// Number of live orders on this side.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// The live chain at a tick, head to tail. Diagnostic / test helper.
    #[must_use]
    pub fn chain(&self, tick: Tick) -> Vec<&Order> {
        let mut out = Vec::new();
        let mut cursor = self.levels.get(&tick).and_then(|l| l.head);
        while let Some(id) = cursor {
            match self.orders.get(&id) {
                Some(order) => {
                    cursor = order.next;
                    out.push(order);
                }
                None => break,
            }
        }
        out
    }

    /// Ticks that currently hold liquidity, per the mask.
    #[must_use]
    pub fn live_ticks(&self) -> Vec<Tick> {
        let mut ticks: Vec<Tick> = self.levels.keys().copied().collect();
        ticks.sort_unstable();
        ticks
    }
}

/// Both sides of one (market, outcome) pair.
#[derive(Debug, Clone)]
pub struct OutcomeBook {
    bids: BookSide,
    asks: BookSide,
}

impl OutcomeBook {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bids: BookSide::new(Side::Bid),
            asks: BookSide::new(Side::Ask),
        }
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut BookSide {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Best (highest) bid tick, or `None` if no bids.
    #[must_use]
    pub fn best_bid(&self) -> Option<Tick> {
        self.bids.best()
    }

    /// Best (lowest) ask tick, or `None` if no asks.
    #[must_use]
    pub fn best_ask(&self) -> Option<Tick> {
        self.asks.best()
    }
}

impl Default for OutcomeBook {
    fn default() -> Self {
        Self::new()
    }
}
