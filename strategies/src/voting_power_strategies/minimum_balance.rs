use alloy_primitives::Address;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{non_negative, BaseArgs, VotingPowerStrategy};
use crate::{abi::IERC20, decimals::min_raw_balance, parse_block_tag, Contract, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumBalanceParams {
    pub contract: Address,
    pub decimals: u8,
    /// Threshold in whole tokens.
    #[serde(deserialize_with = "non_negative")]
    pub min_balance: Decimal,
    #[serde(alias = "numVotes")]
    pub score: f64,
    #[serde(default)]
    pub block_tag: Option<i64>,
}

/// Flat score for holding at least `min_balance` of a token.
pub struct MinimumBalance {
    base: BaseArgs,
    params: MinimumBalanceParams,
}

impl MinimumBalance {
    pub fn new(base: BaseArgs, params: MinimumBalanceParams) -> Self {
        Self { base, params }
    }
}

#[async_trait]
impl VotingPowerStrategy for MinimumBalance {
    async fn process(&self) -> Result<f64> {
        // compared in base units; a threshold finer than the token rounds up
        let threshold = min_raw_balance(self.params.min_balance, self.params.decimals)?;

        let block = parse_block_tag(self.params.block_tag);
        let token = Contract::at(self.params.contract, self.base.provider.as_ref(), block);
        let balance = token
            .call(&IERC20::balanceOfCall {
                account: self.base.account,
            })
            .await?
            ._0;

        log::debug!(
            "{} holds {balance} of {}, threshold {threshold}",
            self.base.account,
            self.params.contract
        );
        Ok(if balance >= threshold {
            self.params.score
        } else {
            0.0
        })
    }
}
