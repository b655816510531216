//! Error types for the Tickbook matching core.
//!
//! All errors use the `TB_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors (rejected pre-mutation)
//! - 2xx: Balance errors (rejected pre-mutation, never partially applied)
//! - 3xx: Lifecycle / state errors
//! - 4xx: Matching errors
//! - 5xx: Resource ceilings (abort with zero partial mutation)
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{AccountKey, Asset, MarketId, OrderId};

/// Central error enum for all Tickbook operations.
#[derive(Debug, Error)]
pub enum TickbookError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// Tick outside the `[1, 99]` grid.
    #[error("TB_ERR_100: Invalid tick: {tick} (valid range 1..=99)")]
    InvalidTick { tick: u16 },

    /// Orders must request a positive number of shares.
    #[error("TB_ERR_101: Order size must be positive")]
    ZeroShares,

    /// Order size exceeds the overflow-safe cap.
    #[error("TB_ERR_102: Order size too large: {shares}")]
    OrderTooLarge { shares: u64 },

    /// The requested order does not exist in its book.
    #[error("TB_ERR_103: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The caller does not own the order it tried to cancel.
    #[error("TB_ERR_104: Caller does not own order {0}")]
    NotOrderOwner(OrderId),

    /// More predecessor candidates than the protocol permits.
    #[error("TB_ERR_105: Too many cancel candidates: {given} (max {max})")]
    TooManyCandidates { given: usize, max: usize },

    /// The account has never been registered.
    #[error("TB_ERR_106: Unknown user: {0}")]
    UnknownUser(AccountKey),

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// Not enough free balance to reserve or debit.
    #[error("TB_ERR_200: Insufficient free balance of {asset}: need {needed}, have {free}")]
    InsufficientFree {
        asset: Asset,
        needed: u64,
        free: u64,
    },

    /// Not enough reserved balance to release or debit. Should never
    /// trigger given correct callers; kept as a defensive invariant check.
    #[error(
        "TB_ERR_201: Insufficient reserved balance of {asset}: need {needed}, have {reserved}"
    )]
    InsufficientReserved {
        asset: Asset,
        needed: u64,
        reserved: u64,
    },

    // =================================================================
    // Lifecycle / State Errors (3xx)
    // =================================================================
    /// The market's lifecycle gate rejects trading right now.
    #[error("TB_ERR_300: Market not tradable: {0}")]
    MarketNotTradable(MarketId),

    // =================================================================
    // Matching Errors (4xx)
    // =================================================================
    /// A take walk would fill less than its minimum; nothing was applied.
    #[error("TB_ERR_400: Minimum fill shortfall: filled {filled} < min {min_fill}")]
    MinFillShortfall { filled: u64, min_fill: u64 },

    /// The cancel target was not reachable from the supplied predecessor
    /// candidates. The caller should re-fetch candidates and retry; this
    /// is not a data-integrity fault.
    #[error("TB_ERR_401: Cancel target not found: {0}")]
    CancelTargetNotFound(OrderId),

    // =================================================================
    // Resource Errors (5xx)
    // =================================================================
    /// A traversal hit its step ceiling. No partial mutation committed.
    #[error("TB_ERR_500: Resource ceiling exceeded after {steps} steps")]
    ResourceExhausted { steps: u32 },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("TB_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Invalid engine configuration.
    #[error("TB_ERR_901: Configuration error: {reason}")]
    InvalidConfig { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, TickbookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = TickbookError::OrderNotFound(OrderId(7));
        let msg = format!("{err}");
        assert!(msg.starts_with("TB_ERR_103"), "Got: {msg}");
        assert!(msg.contains("ord:7"));
    }

    #[test]
    fn insufficient_free_display() {
        let err = TickbookError::InsufficientFree {
            asset: Asset::Points,
            needed: 100,
            free: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("TB_ERR_200"));
        assert!(msg.contains("POINTS"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn all_errors_have_tb_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(TickbookError::ZeroShares),
            Box::new(TickbookError::InvalidTick { tick: 0 }),
            Box::new(TickbookError::MarketNotTradable(MarketId(1))),
            Box::new(TickbookError::MinFillShortfall {
                filled: 4,
                min_fill: 10,
            }),
            Box::new(TickbookError::ResourceExhausted { steps: 512 }),
            Box::new(TickbookError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("TB_ERR_"),
                "Error missing TB_ERR_ prefix: {msg}"
            );
        }
    }
}
