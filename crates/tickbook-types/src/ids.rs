//! Identifiers used throughout Tickbook.
//!
//! Protocol-level ids (`MarketId`, `OutcomeId`, `UserId`, `OrderId`) are
//! integer newtypes: order ids in particular are book-scoped monotonic
//! counters starting at 1 (0 is the null link), so they cannot be random.
//! The collaborator-facing [`AccountKey`] uses UUIDv7 for time-ordered
//! lexicographic sorting.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// MarketId
// ---------------------------------------------------------------------------

/// Identifier of one prediction market. Assigned by the (external)
/// market-lifecycle collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct MarketId(pub u64);

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mkt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OutcomeId
// ---------------------------------------------------------------------------

/// Identifier of one outcome within a market (e.g. 0 = NO, 1 = YES).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OutcomeId(pub u32);

impl fmt::Display for OutcomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "out:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// UserId
// ---------------------------------------------------------------------------

/// Dense internal identifier for a trading account. Assigned lazily and
/// stably by the user registry from an [`AccountKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OrderId
// ---------------------------------------------------------------------------

/// Book-scoped order identifier. Monotonic from 1 within one
/// (market, outcome, side) book; never reused after cancellation.
/// The zero value is reserved as the null chain link and never issued,
/// which is why absent orders are modeled as `Option<OrderId>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// First id a fresh book hands out.
    pub const FIRST: Self = Self(1);

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ord:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// AccountKey
// ---------------------------------------------------------------------------

/// External identity of a trading account, as presented by collaborators
/// (bridges, signers). Mapped to a dense [`UserId`] on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountKey(pub Uuid);

impl AccountKey {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AccountKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
