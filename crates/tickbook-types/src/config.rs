//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, TickbookError};

/// Configuration for one matching engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Fee charged on the maker leg of each fill, in basis points of the
    /// Points amount exchanged.
    pub maker_fee_bps: u16,
    /// Fee charged on the taker leg of each fill, in basis points.
    pub taker_fee_bps: u16,
    /// Ceiling on maker fills visited by one matching walk.
    pub max_match_steps: u32,
    /// Ceiling on chain links visited by one predecessor search or
    /// candidate scan.
    pub max_chain_steps: u32,
}

impl EngineConfig {
    /// A zero-fee configuration, mostly for tests.
    #[must_use]
    pub fn zero_fees() -> Self {
        Self {
            maker_fee_bps: 0,
            taker_fee_bps: 0,
            ..Self::default()
        }
    }

    /// Validate the configuration once, at engine construction.
    ///
    /// The combined fee rate must not exceed 100% of a fill's Points, so
    /// the seller's credit can never underflow.
    pub fn validate(&self) -> Result<()> {
        let combined = u64::from(self.maker_fee_bps) + u64::from(self.taker_fee_bps);
        if combined > constants::BPS_DENOMINATOR {
            return Err(TickbookError::InvalidConfig {
                reason: format!(
                    "combined fee {combined} bps exceeds {} bps",
                    constants::BPS_DENOMINATOR
                ),
            });
        }
        if self.max_match_steps == 0 || self.max_chain_steps == 0 {
            return Err(TickbookError::InvalidConfig {
                reason: "traversal ceilings must be positive".into(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            maker_fee_bps: constants::DEFAULT_MAKER_FEE_BPS,
            taker_fee_bps: constants::DEFAULT_TAKER_FEE_BPS,
            max_match_steps: constants::DEFAULT_MAX_MATCH_STEPS,
            max_chain_steps: constants::DEFAULT_MAX_CHAIN_STEPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::zero_fees().validate().is_ok());
    }

    #[test]
    fn combined_fee_over_100_percent_rejected() {
        let cfg = EngineConfig {
            maker_fee_bps: 6_000,
            taker_fee_bps: 6_000,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(TickbookError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn zero_ceilings_rejected() {
        let cfg = EngineConfig {
            max_match_steps: 0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = EngineConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.maker_fee_bps, cfg.maker_fee_bps);
        assert_eq!(back.max_chain_steps, cfg.max_chain_steps);
    }
}
