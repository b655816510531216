//! Tickbook matching and accounting engine.
//!
//! The stateful plane: one [`Engine`] owns every (market, outcome) book,
//! the balance ledger, the user registry, fee policy, and the event
//! journal. Market lifecycle stays outside, behind the [`MarketGate`]
//! seam; funding and share minting come in through explicit credit calls.
//!
//! The market maker is fully collateralized: a resting Bid locks
//! `tick × shares` Points, a resting Ask locks the shares themselves, so
//! no fill can ever fail for lack of funds. Every operation validates,
//! plans against a read-only view, and only then mutates — partial
//! application does not exist.

pub mod balance_ledger;
pub mod engine;
pub mod gate;
pub mod journal;
pub mod registry;

pub use balance_ledger::BalanceLedger;
pub use engine::{Engine, fee_floor};
pub use gate::{ListGate, MarketGate, OpenGate};
pub use journal::Journal;
pub use registry::UserRegistry;
