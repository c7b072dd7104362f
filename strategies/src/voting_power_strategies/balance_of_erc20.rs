use alloy_primitives::Address;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{default_multiplier, non_negative, BaseArgs, VotingPowerStrategy};
use crate::{
    abi::IERC20,
    decimals::{apply_multiplier, normalize, to_score, TokenAmount},
    parse_block_tag, Contract, Result,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOfErc20Params {
    pub contract: Address,
    pub decimals: u8,
    #[serde(default = "default_multiplier", deserialize_with = "non_negative")]
    pub multiplier: Decimal,
    #[serde(default)]
    pub block_tag: Option<i64>,
}

/// Token balance, scaled by the token's decimals and weighted.
pub struct BalanceOfErc20 {
    base: BaseArgs,
    params: BalanceOfErc20Params,
}

impl BalanceOfErc20 {
    pub fn new(base: BaseArgs, params: BalanceOfErc20Params) -> Self {
        Self { base, params }
    }

    /// Weighted balance before conversion to a score.
    pub async fn weighted_balance(&self) -> Result<TokenAmount> {
        let block = parse_block_tag(self.params.block_tag);
        let token = Contract::at(self.params.contract, self.base.provider.as_ref(), block);
        let balance = token
            .call(&IERC20::balanceOfCall {
                account: self.base.account,
            })
            .await?
            ._0;

        let balance = normalize(balance, self.params.decimals)?;
        apply_multiplier(balance, self.params.multiplier)
    }
}

#[async_trait]
impl VotingPowerStrategy for BalanceOfErc20 {
    async fn process(&self) -> Result<f64> {
        to_score(self.weighted_balance().await?)
    }
}
