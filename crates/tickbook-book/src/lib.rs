//! # tickbook-book
//!
//! **Pure order-book structures for Tickbook.**
//!
//! This crate owns everything inside one (market, outcome) pair's books and
//! nothing outside them. It has:
//!
//! - **Zero balance logic**: reservations live in the engine plane
//! - **O(1) best-price discovery**: a 99-bit mask per side ([`TickMask`])
//! - **Strict price-time priority**: FIFO singly linked chains per tick,
//!   never pro-rata
//! - **Hint-based removal**: predecessor candidates amortize the O(n) chain
//!   walk that cancelling a singly linked node would otherwise need

pub mod book;
pub mod level;
pub mod tick_index;

pub use book::{BookSide, HeadFill, OutcomeBook};
pub use level::Level;
pub use tick_index::TickMask;
