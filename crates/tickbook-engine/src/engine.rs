//! The matching engine.
//!
//! Every state-changing operation runs in two phases:
//!
//! 1. **Plan** — a read-only walk over the resting side computes the fill
//!    list, fee legs, and the taker's total balance requirement. All
//!    failures (validation, lifecycle gate, insufficient balance, min-fill
//!    shortfall, step ceilings) surface here, before the first mutation.
//! 2. **Apply** — the planned fills are committed: head orders consumed,
//!    both parties settled through the [`BalanceLedger`], records appended
//!    to the journal, and any remainder rested with a fresh reservation.
//!
//! Execution is single-threaded and totally ordered; an operation commits
//! every mutation it computed or none, and there is nothing to roll back
//! because the apply phase cannot fail.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tickbook_book::OutcomeBook;
use tickbook_types::{
    Asset, BookKey, EngineConfig, EngineEvent, FillRecord, MarketId, OrderId, OutcomeId,
    PlaceResult, Result, Side, TakeResult, Tick, TickbookError, UserId, constants,
};

use crate::balance_ledger::BalanceLedger;
use crate::gate::{MarketGate, OpenGate};
use crate::journal::Journal;
use crate::registry::UserRegistry;

/// Basis-point fee against a fill's Points amount, floored toward zero at
/// full precision. This is the single rounding policy for all fee legs.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn fee_floor(points: u64, bps: u16) -> u64 {
    ((u128::from(points) * u128::from(bps)) / u128::from(constants::BPS_DENOMINATOR)) as u64
}

/// One planned maker match.
#[derive(Debug, Clone, Copy)]
struct FillPlan {
    maker_order: OrderId,
    maker: UserId,
    /// Execution tick: the maker's resting price.
    tick: Tick,
    shares: u64,
    points: u64,
    maker_fee: u64,
    taker_fee: u64,
}

/// Output of a read-only matching walk.
#[derive(Debug, Default)]
struct MatchPlan {
    fills: Vec<FillPlan>,
    filled_shares: u64,
    points_traded: u64,
    remainder: u64,
}

/// The trading core: books, balances, identity, fees, and the journal,
/// behind a lifecycle gate supplied by the embedding system.
pub struct Engine<G: MarketGate> {
    config: EngineConfig,
    gate: G,
    books: HashMap<(MarketId, OutcomeId), OutcomeBook>,
    balances: BalanceLedger,
    registry: UserRegistry,
    fee_exempt: HashSet<UserId>,
    fees_collected: u64,
    journal: Journal,
}

impl Engine<OpenGate> {
    /// An engine whose markets are always tradable.
    pub fn with_open_gate(config: EngineConfig) -> Result<Self> {
        Self::new(config, OpenGate)
    }
}

impl<G: MarketGate> Engine<G> {
    /// Create an engine. The configuration is validated here, once.
    pub fn new(config: EngineConfig, gate: G) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            gate,
            books: HashMap::new(),
            balances: BalanceLedger::new(),
            registry: UserRegistry::new(),
            fee_exempt: HashSet::new(),
            fees_collected: 0,
            journal: Journal::new(),
        })
    }

    // =================================================================
    // Trading operations
    // =================================================================

    /// Place a limit order: match against the opposite side within the
    /// price bound, then rest any remainder fully collateralized.
    ///
    /// Returns the rested order id (`None` iff nothing rests), the filled
    /// size, and the Points traded. The side's id counter advances on
    /// every accepted call, filled fully or not.
    pub fn place_limit(
        &mut self,
        user: UserId,
        market: MarketId,
        outcome: OutcomeId,
        side: Side,
        tick: u16,
        shares: u64,
    ) -> Result<PlaceResult> {
        let limit = Tick::new(tick)?;
        validate_shares(shares)?;
        if !self.gate.is_tradable(market) {
            return Err(TickbookError::MarketNotTradable(market));
        }

        let plan = self.plan_walk(market, outcome, user, side, limit, shares)?;

        // Pre-flight the taker's total requirement against the starting
        // free balance: fills plus the remainder's reservation.
        match side {
            Side::Bid => {
                let needed = plan.points_traded + limit.points_for(plan.remainder);
                self.require_free(user, Asset::Points, needed)?;
            }
            Side::Ask => {
                self.require_free(user, Asset::shares(market, outcome), shares)?;
            }
        }

        let order_id = self
            .books
            .entry((market, outcome))
            .or_default()
            .side_mut(side)
            .allocate_order_id();

        let fills = self.apply_fills(market, outcome, user, side, &plan)?;

        let rested = if plan.remainder > 0 {
            match side {
                Side::Bid => {
                    self.balances
                        .reserve(user, Asset::Points, limit.points_for(plan.remainder))?;
                }
                Side::Ask => {
                    self.balances
                        .reserve(user, Asset::shares(market, outcome), plan.remainder)?;
                }
            }
            let book = self.book_mut(market, outcome)?;
            book.side_mut(side).insert(order_id, user, limit, plan.remainder)?;
            self.journal.push(EngineEvent::OrderPlaced {
                key: BookKey::new(market, outcome, side),
                order_id,
                owner: user,
                tick: limit,
                requested_shares: plan.remainder,
                placed_at: Utc::now(),
            });
            Some(order_id)
        } else {
            None
        };

        tracing::debug!(
            %user,
            %market,
            %outcome,
            %side,
            tick,
            shares,
            filled = plan.filled_shares,
            rested = plan.remainder,
            "place_limit"
        );

        Ok(PlaceResult {
            order_id: rested,
            filled_shares: plan.filled_shares,
            points_traded: plan.points_traded,
            fills,
        })
    }

    /// Immediate-or-shortfall execution: the same matching walk, but never
    /// rests a remainder and never allocates an order id.
    ///
    /// If the walk would fill less than `min_fill`, the whole call fails
    /// with `MinFillShortfall` and **zero** mutation — all-or-nothing on
    /// shortfall, not on partial fills above the minimum.
    pub fn take(
        &mut self,
        user: UserId,
        market: MarketId,
        outcome: OutcomeId,
        side: Side,
        limit_tick: u16,
        shares: u64,
        min_fill: u64,
    ) -> Result<TakeResult> {
        let limit = Tick::new(limit_tick)?;
        validate_shares(shares)?;
        if !self.gate.is_tradable(market) {
            return Err(TickbookError::MarketNotTradable(market));
        }

        let plan = self.plan_walk(market, outcome, user, side, limit, shares)?;
        if plan.filled_shares < min_fill {
            return Err(TickbookError::MinFillShortfall {
                filled: plan.filled_shares,
                min_fill,
            });
        }
        match side {
            Side::Bid => self.require_free(user, Asset::Points, plan.points_traded)?,
            Side::Ask => {
                self.require_free(user, Asset::shares(market, outcome), plan.filled_shares)?;
            }
        }

        let fills = self.apply_fills(market, outcome, user, side, &plan)?;
        self.journal.push(EngineEvent::TakeExecuted {
            key: BookKey::new(market, outcome, side),
            taker: user,
            limit_tick: limit,
            requested_shares: shares,
            filled_shares: plan.filled_shares,
            points_traded: plan.points_traded,
            executed_at: Utc::now(),
        });

        tracing::debug!(
            %user,
            %market,
            %outcome,
            %side,
            limit_tick,
            shares,
            min_fill,
            filled = plan.filled_shares,
            "take"
        );

        Ok(TakeResult {
            filled_shares: plan.filled_shares,
            points_traded: plan.points_traded,
            fills,
        })
    }

    /// Remove a specific resting order using caller-supplied predecessor
    /// candidates, and release its reservation.
    ///
    /// Permitted in every lifecycle state — deliberately independent of
    /// the tradable gate. Returns the cancelled (remaining) shares.
    pub fn cancel(
        &mut self,
        user: UserId,
        market: MarketId,
        outcome: OutcomeId,
        side: Side,
        order_id: OrderId,
        candidates: &[OrderId],
    ) -> Result<u64> {
        if candidates.len() > constants::MAX_CANCEL_CANDIDATES {
            return Err(TickbookError::TooManyCandidates {
                given: candidates.len(),
                max: constants::MAX_CANCEL_CANDIDATES,
            });
        }

        let budget = self.config.max_chain_steps;
        let removed = {
            let book = self
                .books
                .get_mut(&(market, outcome))
                .ok_or(TickbookError::CancelTargetNotFound(order_id))?;
            let book_side = book.side_mut(side);
            let order = book_side
                .order(order_id)
                .ok_or(TickbookError::CancelTargetNotFound(order_id))?;
            if order.owner != user {
                return Err(TickbookError::NotOrderOwner(order_id));
            }
            book_side.remove_with_hints(order_id, candidates, budget)?
        };

        match side {
            Side::Bid => {
                self.balances.release(
                    user,
                    Asset::Points,
                    removed.tick.points_for(removed.shares_remaining),
                )?;
            }
            Side::Ask => {
                self.balances.release(
                    user,
                    Asset::shares(market, outcome),
                    removed.shares_remaining,
                )?;
            }
        }

        self.journal.push(EngineEvent::OrderCancelled {
            key: BookKey::new(market, outcome, side),
            order_id,
            owner: user,
            tick: removed.tick,
            cancelled_shares: removed.shares_remaining,
            cancelled_at: Utc::now(),
        });

        tracing::debug!(
            %user,
            %market,
            %outcome,
            %side,
            %order_id,
            cancelled = removed.shares_remaining,
            "cancel"
        );

        Ok(removed.shares_remaining)
    }

    // =================================================================
    // Read-only queries
    // =================================================================

    /// Predecessor candidates for the two-phase cancel protocol: up to
    /// `max_n` (≤ 16) ids immediately preceding the target in its chain.
    pub fn cancel_candidates(
        &self,
        market: MarketId,
        outcome: OutcomeId,
        side: Side,
        target: OrderId,
        max_n: usize,
    ) -> Result<Vec<OrderId>> {
        if max_n > constants::MAX_CANCEL_CANDIDATES {
            return Err(TickbookError::TooManyCandidates {
                given: max_n,
                max: constants::MAX_CANCEL_CANDIDATES,
            });
        }
        let book = self
            .books
            .get(&(market, outcome))
            .ok_or(TickbookError::CancelTargetNotFound(target))?;
        book.side(side)
            .cancel_candidates(target, max_n, self.config.max_chain_steps)
    }

    /// Diagnostic: (remaining, requested) shares of a live resting order.
    pub fn order_remaining_and_requested(
        &self,
        market: MarketId,
        outcome: OutcomeId,
        side: Side,
        order_id: OrderId,
    ) -> Result<(u64, u64)> {
        let order = self
            .books
            .get(&(market, outcome))
            .and_then(|book| book.side(side).order(order_id))
            .ok_or(TickbookError::OrderNotFound(order_id))?;
        Ok((order.shares_remaining, order.requested_shares))
    }

    /// The book of a (market, outcome) pair, if any order ever rested there.
    #[must_use]
    pub fn book(&self, market: MarketId, outcome: OutcomeId) -> Option<&OutcomeBook> {
        self.books.get(&(market, outcome))
    }

    #[must_use]
    pub fn best_bid(&self, market: MarketId, outcome: OutcomeId) -> Option<Tick> {
        self.books.get(&(market, outcome)).and_then(OutcomeBook::best_bid)
    }

    #[must_use]
    pub fn best_ask(&self, market: MarketId, outcome: OutcomeId) -> Option<Tick> {
        self.books.get(&(market, outcome)).and_then(OutcomeBook::best_ask)
    }

    #[must_use]
    pub fn balances(&self) -> &BalanceLedger {
        &self.balances
    }

    /// Points withheld as fees since construction.
    #[must_use]
    pub fn fees_collected(&self) -> u64 {
        self.fees_collected
    }

    /// Events accumulated since the last drain.
    #[must_use]
    pub fn events(&self) -> &[EngineEvent] {
        self.journal.events()
    }

    /// Take all accumulated events, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.journal.drain()
    }

    #[must_use]
    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    // =================================================================
    // Collaborator seams
    // =================================================================

    /// Resolve an external account to its user id, assigning one lazily.
    pub fn resolve_user(&mut self, account: tickbook_types::AccountKey) -> UserId {
        self.registry.resolve(account)
    }

    /// Look up an account that must already be registered.
    pub fn user_id(&self, account: tickbook_types::AccountKey) -> Result<UserId> {
        self.registry.lookup(account)
    }

    /// Fund an account with Points (bridging collaborator seam).
    pub fn deposit_points(&mut self, user: UserId, amount: u64) {
        self.balances.credit(user, Asset::Points, amount);
    }

    /// Credit outcome shares into custody (minting/settlement seam).
    pub fn credit_shares(
        &mut self,
        user: UserId,
        market: MarketId,
        outcome: OutcomeId,
        amount: u64,
    ) {
        self.balances.credit(user, Asset::shares(market, outcome), amount);
    }

    /// Flag a user as globally fee-exempt (administration is external).
    pub fn set_fee_exempt(&mut self, user: UserId, exempt: bool) {
        if exempt {
            self.fee_exempt.insert(user);
        } else {
            self.fee_exempt.remove(&user);
        }
    }

    #[must_use]
    pub fn is_fee_exempt(&self, user: UserId) -> bool {
        self.fee_exempt.contains(&user)
    }

    // =================================================================
    // Internals
    // =================================================================

    /// Read-only matching walk: best eligible tick per the resting side's
    /// mask, then the level's FIFO chain, until the request is filled or
    /// the price bound cuts off. A local mask copy simulates consumed
    /// levels so the scan never revisits one.
    fn plan_walk(
        &self,
        market: MarketId,
        outcome: OutcomeId,
        taker: UserId,
        taker_side: Side,
        limit: Tick,
        requested: u64,
    ) -> Result<MatchPlan> {
        let mut plan = MatchPlan {
            remainder: requested,
            ..MatchPlan::default()
        };
        let Some(book) = self.books.get(&(market, outcome)) else {
            return Ok(plan);
        };
        let resting = book.side(taker_side.opposite());

        let mut scratch = resting.mask();
        let mut steps: u32 = 0;
        let mut current = resting.best_within(limit);

        while plan.remainder > 0 {
            let Some(tick) = current else { break };
            let mut cursor = resting.level(tick).and_then(|level| level.head);
            while let Some(id) = cursor {
                if plan.remainder == 0 {
                    break;
                }
                steps += 1;
                if steps > self.config.max_match_steps {
                    return Err(TickbookError::ResourceExhausted { steps });
                }
                let maker = resting
                    .order(id)
                    .ok_or_else(|| TickbookError::Internal(format!("dangling link {id}")))?;
                let shares = plan.remainder.min(maker.shares_remaining);
                let points = tick.points_for(shares);
                let (maker_fee, taker_fee) = self.fees_for(maker.owner, taker, points);
                plan.fills.push(FillPlan {
                    maker_order: id,
                    maker: maker.owner,
                    tick,
                    shares,
                    points,
                    maker_fee,
                    taker_fee,
                });
                plan.filled_shares += shares;
                plan.points_traded += points;
                plan.remainder -= shares;
                cursor = maker.next;
            }
            if plan.remainder > 0 {
                scratch.clear(tick);
                current = match resting.side() {
                    Side::Ask => scratch.lowest_set_at_most(limit),
                    Side::Bid => scratch.highest_set_at_least(limit),
                };
            }
        }
        Ok(plan)
    }

    /// Commit a plan: consume maker heads, settle both parties, journal
    /// one fill record per maker match. Only internal faults can surface
    /// here — every external failure was raised during planning.
    fn apply_fills(
        &mut self,
        market: MarketId,
        outcome: OutcomeId,
        taker: UserId,
        taker_side: Side,
        plan: &MatchPlan,
    ) -> Result<Vec<FillRecord>> {
        let mut records = Vec::with_capacity(plan.fills.len());
        for fill in &plan.fills {
            {
                let book = self.book_mut(market, outcome)?;
                let head = book
                    .side_mut(taker_side.opposite())
                    .fill_head(fill.tick, fill.shares)?;
                debug_assert_eq!(head.order_id, fill.maker_order);
            }
            self.settle_fill(market, outcome, taker, taker_side, fill)?;

            let record = FillRecord {
                market,
                outcome,
                taker_side,
                taker,
                maker: fill.maker,
                maker_order: fill.maker_order,
                tick: fill.tick,
                shares: fill.shares,
                points: fill.points,
                maker_fee: fill.maker_fee,
                taker_fee: fill.taker_fee,
                executed_at: Utc::now(),
            };
            self.journal.push(EngineEvent::Filled(record.clone()));
            records.push(record);
        }
        Ok(records)
    }

    /// Settle one fill. The buyer is debited exactly `tick × shares`
    /// Points (from its reservation when it is the maker); the seller is
    /// credited that amount minus both fee legs; shares move pre-fee.
    fn settle_fill(
        &mut self,
        market: MarketId,
        outcome: OutcomeId,
        taker: UserId,
        taker_side: Side,
        fill: &FillPlan,
    ) -> Result<()> {
        let shares_asset = Asset::shares(market, outcome);
        let seller_credit = fill.points - fill.maker_fee - fill.taker_fee;

        match taker_side {
            // Taker buys from a resting Ask: the maker's shares are reserved.
            Side::Bid => {
                self.balances
                    .debit_reserved(fill.maker, shares_asset, fill.shares)?;
                self.balances.credit(fill.maker, Asset::Points, seller_credit);
                self.balances.debit_free(taker, Asset::Points, fill.points)?;
                self.balances.credit(taker, shares_asset, fill.shares);
            }
            // Taker sells into a resting Bid: the maker's Points are reserved.
            Side::Ask => {
                self.balances
                    .debit_reserved(fill.maker, Asset::Points, fill.points)?;
                self.balances.credit(fill.maker, shares_asset, fill.shares);
                self.balances.debit_free(taker, shares_asset, fill.shares)?;
                self.balances.credit(taker, Asset::Points, seller_credit);
            }
        }
        self.fees_collected += fill.maker_fee + fill.taker_fee;
        Ok(())
    }

    fn fees_for(&self, maker: UserId, taker: UserId, points: u64) -> (u64, u64) {
        if self.fee_exempt.contains(&maker) || self.fee_exempt.contains(&taker) {
            return (0, 0);
        }
        (
            fee_floor(points, self.config.maker_fee_bps),
            fee_floor(points, self.config.taker_fee_bps),
        )
    }

    fn require_free(&self, user: UserId, asset: Asset, needed: u64) -> Result<()> {
        let free = self.balances.balance(user, asset).free;
        if free < needed {
            return Err(TickbookError::InsufficientFree {
                asset,
                needed,
                free,
            });
        }
        Ok(())
    }

    fn book_mut(&mut self, market: MarketId, outcome: OutcomeId) -> Result<&mut OutcomeBook> {
        self.books
            .get_mut(&(market, outcome))
            .ok_or_else(|| TickbookError::Internal(format!("missing book {market}/{outcome}")))
    }
}

fn validate_shares(shares: u64) -> Result<()> {
    if shares == 0 {
        return Err(TickbookError::ZeroShares);
    }
    if shares > constants::MAX_ORDER_SHARES {
        return Err(TickbookError::OrderTooLarge { shares });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::ListGate;

    const MARKET: MarketId = MarketId(1);
    const OUTCOME: OutcomeId = OutcomeId(0);

    /// Zero-fee engine with an open gate and two funded users.
    fn setup() -> (Engine<OpenGate>, UserId, UserId) {
        let mut engine = Engine::with_open_gate(EngineConfig::zero_fees()).unwrap();
        let alice = UserId(1);
        let bob = UserId(2);
        engine.deposit_points(alice, 1_000_000);
        engine.deposit_points(bob, 1_000_000);
        engine.credit_shares(alice, MARKET, OUTCOME, 10_000);
        engine.credit_shares(bob, MARKET, OUTCOME, 10_000);
        (engine, alice, bob)
    }

    #[test]
    fn invalid_tick_rejected_before_gate() {
        let mut engine = Engine::new(EngineConfig::zero_fees(), ListGate::new()).unwrap();
        // Market is closed, but the tick error wins: validation precedes state.
        let err = engine
            .place_limit(UserId(1), MARKET, OUTCOME, Side::Bid, 0, 10)
            .unwrap_err();
        assert!(matches!(err, TickbookError::InvalidTick { tick: 0 }));
    }

    #[test]
    fn closed_market_rejects_trading_but_not_cancel() {
        let mut gate = ListGate::new();
        gate.open(MARKET);
        let mut engine = Engine::new(EngineConfig::zero_fees(), gate).unwrap();
        let alice = UserId(1);
        engine.deposit_points(alice, 1_000);

        let placed = engine
            .place_limit(alice, MARKET, OUTCOME, Side::Bid, 50, 10)
            .unwrap();
        let order_id = placed.order_id.unwrap();

        engine.gate_mut().close(MARKET);
        let err = engine
            .place_limit(alice, MARKET, OUTCOME, Side::Bid, 50, 10)
            .unwrap_err();
        assert!(matches!(err, TickbookError::MarketNotTradable(m) if m == MARKET));
        let err = engine
            .take(alice, MARKET, OUTCOME, Side::Bid, 50, 10, 0)
            .unwrap_err();
        assert!(matches!(err, TickbookError::MarketNotTradable(_)));

        // Cancellation stays available in every lifecycle state.
        let cancelled = engine
            .cancel(alice, MARKET, OUTCOME, Side::Bid, order_id, &[])
            .unwrap();
        assert_eq!(cancelled, 10);
    }

    #[test]
    fn zero_and_oversized_shares_rejected() {
        let (mut engine, alice, _) = setup();
        let err = engine
            .place_limit(alice, MARKET, OUTCOME, Side::Bid, 50, 0)
            .unwrap_err();
        assert!(matches!(err, TickbookError::ZeroShares));

        let err = engine
            .place_limit(
                alice,
                MARKET,
                OUTCOME,
                Side::Bid,
                50,
                constants::MAX_ORDER_SHARES + 1,
            )
            .unwrap_err();
        assert!(matches!(err, TickbookError::OrderTooLarge { .. }));
    }

    #[test]
    fn insufficient_points_rejected_pre_mutation() {
        let mut engine = Engine::with_open_gate(EngineConfig::zero_fees()).unwrap();
        let poor = UserId(9);
        engine.deposit_points(poor, 100);

        // 10 shares at tick 50 needs 500 points.
        let err = engine
            .place_limit(poor, MARKET, OUTCOME, Side::Bid, 50, 10)
            .unwrap_err();
        assert!(matches!(
            err,
            TickbookError::InsufficientFree {
                asset: Asset::Points,
                needed: 500,
                free: 100,
            }
        ));
        // Nothing rested, no event, and the failed call did not advance
        // the id counter (it failed before allocation).
        assert!(engine.book(MARKET, OUTCOME).is_none());
        assert!(engine.events().is_empty());
        engine.deposit_points(poor, 1_000);
        let placed = engine
            .place_limit(poor, MARKET, OUTCOME, Side::Bid, 50, 10)
            .unwrap();
        assert_eq!(placed.order_id, Some(OrderId(1)));
    }

    #[test]
    fn ask_requires_share_custody() {
        let mut engine = Engine::with_open_gate(EngineConfig::zero_fees()).unwrap();
        let seller = UserId(3);
        let err = engine
            .place_limit(seller, MARKET, OUTCOME, Side::Ask, 50, 10)
            .unwrap_err();
        assert!(matches!(
            err,
            TickbookError::InsufficientFree {
                asset: Asset::Shares(_),
                ..
            }
        ));
    }

    #[test]
    fn self_matching_is_permitted() {
        let (mut engine, alice, _) = setup();
        engine
            .place_limit(alice, MARKET, OUTCOME, Side::Ask, 50, 10)
            .unwrap();
        let result = engine
            .place_limit(alice, MARKET, OUTCOME, Side::Bid, 50, 10)
            .unwrap();
        assert_eq!(result.filled_shares, 10);
        assert_eq!(result.order_id, None);
        assert_eq!(result.fills[0].maker, alice);
        assert_eq!(result.fills[0].taker, alice);

        // Net effect of a zero-fee self-match is a no-op on balances.
        let bal = engine.balances().balance(alice, Asset::Points);
        assert_eq!(bal.free, 1_000_000);
        assert_eq!(bal.reserved, 0);
        let shares = engine
            .balances()
            .balance(alice, Asset::shares(MARKET, OUTCOME));
        assert_eq!(shares.free, 10_000);
    }

    #[test]
    fn fee_exemption_zeroes_both_legs() {
        let mut engine = Engine::with_open_gate(EngineConfig::default()).unwrap();
        let maker = UserId(1);
        let taker = UserId(2);
        engine.deposit_points(taker, 1_000_000);
        engine.credit_shares(maker, MARKET, OUTCOME, 1_000);
        engine.set_fee_exempt(maker, true);
        assert!(engine.is_fee_exempt(maker));

        engine
            .place_limit(maker, MARKET, OUTCOME, Side::Ask, 50, 100)
            .unwrap();
        let result = engine
            .place_limit(taker, MARKET, OUTCOME, Side::Bid, 50, 100)
            .unwrap();
        let fill = &result.fills[0];
        assert_eq!(fill.maker_fee, 0);
        assert_eq!(fill.taker_fee, 0);
        assert_eq!(engine.fees_collected(), 0);
        // The seller receives the gross amount.
        assert_eq!(
            engine.balances().balance(maker, Asset::Points).free,
            fill.points
        );
    }

    #[test]
    fn match_walk_honors_step_ceiling() {
        let config = EngineConfig {
            max_match_steps: 3,
            ..EngineConfig::zero_fees()
        };
        let mut engine = Engine::with_open_gate(config).unwrap();
        let maker = UserId(1);
        let taker = UserId(2);
        engine.credit_shares(maker, MARKET, OUTCOME, 100);
        engine.deposit_points(taker, 100_000);
        for _ in 0..5 {
            engine
                .place_limit(maker, MARKET, OUTCOME, Side::Ask, 50, 1)
                .unwrap();
        }

        let err = engine
            .take(taker, MARKET, OUTCOME, Side::Bid, 50, 5, 0)
            .unwrap_err();
        assert!(matches!(err, TickbookError::ResourceExhausted { .. }));
        // Zero partial mutation: every maker order still rests.
        let book = engine.book(MARKET, OUTCOME).unwrap();
        assert_eq!(book.side(Side::Ask).order_count(), 5);
    }

    #[test]
    fn cancel_checks_ownership() {
        let (mut engine, alice, bob) = setup();
        let placed = engine
            .place_limit(alice, MARKET, OUTCOME, Side::Bid, 50, 10)
            .unwrap();
        let order_id = placed.order_id.unwrap();

        let err = engine
            .cancel(bob, MARKET, OUTCOME, Side::Bid, order_id, &[])
            .unwrap_err();
        assert!(matches!(err, TickbookError::NotOrderOwner(id) if id == order_id));
        // Still live.
        assert!(
            engine
                .order_remaining_and_requested(MARKET, OUTCOME, Side::Bid, order_id)
                .is_ok()
        );
    }

    #[test]
    fn cancel_candidate_cap_enforced() {
        let (mut engine, alice, _) = setup();
        let too_many = vec![OrderId(1); constants::MAX_CANCEL_CANDIDATES + 1];
        let err = engine
            .cancel(alice, MARKET, OUTCOME, Side::Bid, OrderId(1), &too_many)
            .unwrap_err();
        assert!(matches!(err, TickbookError::TooManyCandidates { .. }));
        let err = engine
            .cancel_candidates(MARKET, OUTCOME, Side::Bid, OrderId(1), 17)
            .unwrap_err();
        assert!(matches!(err, TickbookError::TooManyCandidates { .. }));
    }

    #[test]
    fn fee_floor_policy_is_floor_toward_zero() {
        // 333 points at 25 bps = 0.8325 → 0.
        assert_eq!(fee_floor(333, 25), 0);
        // 10_000 points at 25 bps = 25 exactly.
        assert_eq!(fee_floor(10_000, 25), 25);
        // 10_001 points at 25 bps = 25.0025 → 25.
        assert_eq!(fee_floor(10_001, 25), 25);
        // Zero bps charges nothing regardless of size.
        assert_eq!(fee_floor(u64::MAX, 0), 0);
        // Full-precision intermediate: no overflow at the extremes.
        assert_eq!(fee_floor(u64::MAX, 10_000), u64::MAX);
    }

    #[test]
    fn user_registry_seam() {
        let (mut engine, _, _) = setup();
        let account = tickbook_types::AccountKey::new();
        assert!(matches!(
            engine.user_id(account),
            Err(TickbookError::UnknownUser(_))
        ));
        let id = engine.resolve_user(account);
        assert_eq!(engine.resolve_user(account), id);
        assert_eq!(engine.user_id(account).unwrap(), id);
    }
}
