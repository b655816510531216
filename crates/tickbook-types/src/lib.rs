//! # tickbook-types
//!
//! Shared types, errors, and configuration for the **Tickbook** matching core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`MarketId`], [`OutcomeId`], [`UserId`], [`OrderId`], [`AccountKey`]
//! - **Price grid**: [`Tick`] — discrete price level, Points-cents per share
//! - **Book addressing**: [`BookKey`], [`Side`]
//! - **Order model**: [`Order`]
//! - **Fill model**: [`FillRecord`], [`PlaceResult`], [`TakeResult`]
//! - **Event model**: [`EngineEvent`]
//! - **Balance model**: [`BalanceEntry`], [`Asset`]
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`TickbookError`] with `TB_ERR_` prefix codes
//! - **Constants**: tick bounds, fee denominator, traversal ceilings

pub mod balance;
pub mod book_key;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fill;
pub mod ids;
pub mod order;
pub mod side;
pub mod tick;

// Re-export all primary types at crate root for ergonomic imports:
//   use tickbook_types::{Order, Side, Tick, FillRecord, ...};

pub use balance::*;
pub use book_key::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use fill::*;
pub use ids::*;
pub use order::*;
pub use side::*;
pub use tick::*;

// Constants are accessed via `tickbook_types::constants::FOO`
// (not re-exported to avoid name collisions).
