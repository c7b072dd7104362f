use alloy_primitives::Address;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{default_multiplier, non_negative, BaseArgs, VotingPowerStrategy};
use crate::{
    abi::IERC721,
    decimals::{apply_multiplier, normalize, to_score},
    parse_block_tag, Contract, Result,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceOfErc721Params {
    pub contract: Address,
    #[serde(default = "default_multiplier", deserialize_with = "non_negative")]
    pub multiplier: Decimal,
    #[serde(default)]
    pub block_tag: Option<i64>,
}

/// Number of NFTs held, weighted.
pub struct BalanceOfErc721 {
    base: BaseArgs,
    params: BalanceOfErc721Params,
}

impl BalanceOfErc721 {
    pub fn new(base: BaseArgs, params: BalanceOfErc721Params) -> Self {
        Self { base, params }
    }
}

#[async_trait]
impl VotingPowerStrategy for BalanceOfErc721 {
    async fn process(&self) -> Result<f64> {
        let block = parse_block_tag(self.params.block_tag);
        let collection = Contract::at(self.params.contract, self.base.provider.as_ref(), block);
        let owned = collection
            .call(&IERC721::balanceOfCall {
                owner: self.base.account,
            })
            .await?
            ._0;

        to_score(apply_multiplier(normalize(owned, 0)?, self.params.multiplier)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use alloy_primitives::{address, U256};
    use anyhow::Result;

    use super::*;
    use crate::{provider::mock::MockChain, BlockTag};

    const NOUNS: Address = address!("9C8fF314C9Bc7F6e59A9d9225Fb22946427eDC03");
    const ACCOUNT: Address = address!("8bF1e340055c7dE62F11229A149d3A1918de3d74");

    #[tokio::test]
    async fn test_process() -> Result<()> {
        let chain = Arc::new(MockChain::default().with_call(
            NOUNS,
            IERC721::balanceOfCall { owner: ACCOUNT },
            U256::from(3u8),
        ));
        let strategy = BalanceOfErc721::new(
            BaseArgs::new(ACCOUNT, chain.clone()),
            BalanceOfErc721Params {
                contract: NOUNS,
                multiplier: Decimal::from(10),
                block_tag: Some(17_000_000),
            },
        );

        assert_eq!(strategy.process().await?, 30.0);
        assert_eq!(chain.blocks(), vec![BlockTag::Number(17_000_000)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_counts_beyond_ten_to_the_thirty_are_kept() -> Result<()> {
        let owned = U256::from(10u8).pow(U256::from(30u8));
        let chain = Arc::new(MockChain::default().with_call(
            NOUNS,
            IERC721::balanceOfCall { owner: ACCOUNT },
            owned,
        ));
        let strategy = BalanceOfErc721::new(
            BaseArgs::new(ACCOUNT, chain),
            BalanceOfErc721Params {
                contract: NOUNS,
                multiplier: Decimal::ONE,
                block_tag: None,
            },
        );

        assert_eq!(strategy.process().await?, 1e30);
        Ok(())
    }

    #[tokio::test]
    async fn test_no_tokens_scores_zero() -> Result<()> {
        let chain = Arc::new(MockChain::default());
        let strategy = BalanceOfErc721::new(
            BaseArgs::new(ACCOUNT, chain),
            BalanceOfErc721Params {
                contract: NOUNS,
                multiplier: Decimal::ONE,
                block_tag: None,
            },
        );

        assert_eq!(strategy.process().await?, 0.0);
        Ok(())
    }
}
