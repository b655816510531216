//! Fill records and operation results.
//!
//! A [`FillRecord`] is the immutable record of one maker match: the taker's
//! walk consumed `shares` from the maker's resting order at the maker's
//! tick. Records within one call are ordered; records from different calls
//! are not comparable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MarketId, OrderId, OutcomeId, Side, Tick, UserId};

/// One maker match produced by a `place_limit` or `take` walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillRecord {
    pub market: MarketId,
    pub outcome: OutcomeId,
    /// Which side the taker was on.
    pub taker_side: Side,
    pub taker: UserId,
    pub maker: UserId,
    /// The maker's resting order that was consumed.
    pub maker_order: OrderId,
    /// Execution price: the maker's tick.
    pub tick: Tick,
    /// Shares moved from maker to taker (pre-fee).
    pub shares: u64,
    /// Points exchanged at this fill: `tick × shares`, gross of fees.
    pub points: u64,
    /// Maker-leg fee withheld from the seller's Points credit.
    pub maker_fee: u64,
    /// Taker-leg fee withheld from the seller's Points credit.
    pub taker_fee: u64,
    pub executed_at: DateTime<Utc>,
}

impl FillRecord {
    /// Total fees withheld on this fill.
    #[must_use]
    pub fn fees(&self) -> u64 {
        self.maker_fee + self.taker_fee
    }

    /// Returns `true` if the taker was buying shares.
    #[must_use]
    pub fn taker_is_buyer(&self) -> bool {
        self.taker_side == Side::Bid
    }
}

impl std::fmt::Display for FillRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fill[{}/{}] {} {} @ {} = {} pts",
            self.market, self.outcome, self.taker_side, self.shares, self.tick, self.points,
        )
    }
}

/// Result of a `place_limit` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Id of the rested remainder; `None` iff nothing rests.
    pub order_id: Option<OrderId>,
    pub filled_shares: u64,
    pub points_traded: u64,
    /// One record per maker match, in execution order.
    pub fills: Vec<FillRecord>,
}

/// Result of a `take` call that met its minimum fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeResult {
    pub filled_shares: u64,
    pub points_traded: u64,
    /// One record per maker match, in execution order.
    pub fills: Vec<FillRecord>,
}
