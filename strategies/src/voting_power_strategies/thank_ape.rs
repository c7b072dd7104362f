use std::sync::Arc;

use alloy_primitives::{address, Address};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{BalanceOfErc20, BalanceOfErc20Params, BaseArgs, VotingPowerStrategy};
use crate::{
    abi::{IApeCoinStaking, IThriveCoinVoterList},
    decimals::{normalize, TokenAmount},
    parse_block_tag, ChainReader, Contract, Result,
};

/// ApeCoin ERC-20 on mainnet.
pub const APE_COIN: Address = address!("4d224452801ACEd8B2F0aebE155379bb5D594381");
/// ApeCoin staking pool on mainnet.
pub const APE_COIN_STAKING: Address = address!("5954aB967Bc958940b7EB73ee84797Dc8a2AFbb9");

const APE_COIN_DECIMALS: u8 = 18;
const STAKED_TOTAL_DECIMALS: u8 = 15;

/// Inclusive lower bounds on total ApeCoin, highest first.
const TIERS: [(u64, f64); 6] = [
    (100_000, 80.0),
    (10_000, 40.0),
    (1_000, 20.0),
    (100, 10.0),
    (10, 5.0),
    (1, 1.0),
];

/// Score guaranteed to accounts on the ThriveCoin voter list.
const VOTER_LIST_SCORE: f64 = 5.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankApeParams {
    /// ThriveCoin voter list, on the caller's (Polygon) provider.
    pub address: Address,
    #[serde(default)]
    pub polygon_block_number: Option<i64>,
    #[serde(default)]
    pub mainnet_block_number: Option<i64>,
}

/// Tiered score over held plus staked ApeCoin, with a floor for accounts on
/// the ThriveCoin voter list.
pub struct ThankApe {
    base: BaseArgs,
    mainnet: Arc<dyn ChainReader>,
    params: ThankApeParams,
}

impl ThankApe {
    pub fn new(base: BaseArgs, mainnet: Arc<dyn ChainReader>, params: ThankApeParams) -> Self {
        Self {
            base,
            mainnet,
            params,
        }
    }
}

/// Maps total ApeCoin onto its tier.
pub fn tiered_score(total_ape_coin: TokenAmount, has_vote_right: bool) -> f64 {
    let tier = TIERS
        .iter()
        .find(|(threshold, _)| total_ape_coin >= TokenAmount::from_whole(*threshold))
        .map_or(0.0, |(_, score)| *score);

    if has_vote_right {
        tier.max(VOTER_LIST_SCORE)
    } else {
        tier
    }
}

#[async_trait]
impl VotingPowerStrategy for ThankApe {
    async fn process(&self) -> Result<f64> {
        let account = self.base.account;
        let polygon_block = parse_block_tag(self.params.polygon_block_number);
        let mainnet_block = parse_block_tag(self.params.mainnet_block_number);

        let voter_list = Contract::at(
            self.params.address,
            self.base.provider.as_ref(),
            polygon_block,
        );
        let vote_right_call = IThriveCoinVoterList::hasVoteRightCall { account };

        let staking = Contract::at(APE_COIN_STAKING, self.mainnet.as_ref(), mainnet_block);
        let staked_call = IApeCoinStaking::stakedTotalCall { _address: account };

        let ape_coin = BalanceOfErc20::new(
            BaseArgs::new(account, self.mainnet.clone()),
            BalanceOfErc20Params {
                contract: APE_COIN,
                decimals: APE_COIN_DECIMALS,
                multiplier: Decimal::ONE,
                block_tag: self.params.mainnet_block_number,
            },
        );

        let (vote_right, staked, held) = futures::try_join!(
            voter_list.call(&vote_right_call),
            staking.call(&staked_call),
            ape_coin.weighted_balance(),
        )?;

        let staked = normalize(staked._0, STAKED_TOTAL_DECIMALS)?;
        let total = staked.checked_add(held)?;

        let score = tiered_score(total, vote_right._0);
        log::debug!(
            "{account}: {held} held + {staked} staked ApeCoin, voter list {}, tier {score}",
            vote_right._0
        );
        Ok(score)
    }
}
