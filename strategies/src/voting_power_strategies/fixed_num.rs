use async_trait::async_trait;
use serde::Deserialize;

use super::VotingPowerStrategy;
use crate::Result;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FixedNumParams {
    #[serde(alias = "numVotes")]
    pub score: f64,
}

/// Constant score for hand-curated allow-lists. Never reads the chain.
pub struct FixedNum {
    params: FixedNumParams,
}

impl FixedNum {
    pub fn new(params: FixedNumParams) -> Self {
        Self { params }
    }
}

#[async_trait]
impl VotingPowerStrategy for FixedNum {
    async fn process(&self) -> Result<f64> {
        Ok(self.params.score)
    }
}
