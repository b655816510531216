//! System-wide constants for the Tickbook matching core.

/// Lowest valid tick (1 Point-cent per share).
pub const TICK_MIN: u16 = 1;

/// Highest valid tick (99 Point-cents per share).
pub const TICK_MAX: u16 = 99;

/// Number of discrete price levels per book side.
pub const TICK_COUNT: usize = 99;

/// Basis-point denominator for fee arithmetic.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Maximum predecessor candidates accepted by a cancel call.
pub const MAX_CANCEL_CANDIDATES: usize = 16;

/// Largest order size whose Points value cannot overflow `u64`
/// at any tick (`u64::MAX / TICK_MAX`). Enforced once at the boundary;
/// hot-path tick arithmetic is unchecked beyond this cap.
pub const MAX_ORDER_SHARES: u64 = u64::MAX / TICK_MAX as u64;

/// Default maker fee in basis points.
pub const DEFAULT_MAKER_FEE_BPS: u16 = 20;

/// Default taker fee in basis points.
pub const DEFAULT_TAKER_FEE_BPS: u16 = 50;

/// Default ceiling on maker fills visited by a single matching walk.
pub const DEFAULT_MAX_MATCH_STEPS: u32 = 512;

/// Default ceiling on chain links visited by a single predecessor
/// search or candidate scan.
pub const DEFAULT_MAX_CHAIN_STEPS: u32 = 1_024;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Tickbook";
