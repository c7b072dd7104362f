use thiserror::Error;

use crate::StrategyName;

/// Every way a voting-power evaluation can fail.
///
/// Errors are surfaced to the caller as-is. A failed read never turns into a
/// zero score, since zero is a legitimate "no holdings" result.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("invalid strategy: {0}")]
    InvalidStrategy(String),

    #[error("invalid parameters for {strategy}: {reason}")]
    InvalidParameters {
        strategy: StrategyName,
        reason: String,
    },

    #[error("chain read failed: {0}")]
    ChainRead(String),

    #[error("ENS resolution failed: {0}")]
    Resolution(String),

    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
}

pub type Result<T, E = StrategyError> = std::result::Result<T, E>;
