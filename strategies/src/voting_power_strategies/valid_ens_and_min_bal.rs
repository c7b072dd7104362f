use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{non_negative, BaseArgs, VotingPowerStrategy};
use crate::{decimals::min_raw_balance, ens, parse_block_tag, BlockTag, Result};

const NATIVE_DECIMALS: u8 = 18;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidEnsAndMinBalParams {
    /// Name the account must control. Without one, the account needs a
    /// verified primary name instead.
    #[serde(default)]
    pub ens_name: Option<String>,
    /// Minimum native balance, in ether.
    #[serde(deserialize_with = "non_negative")]
    pub min_balance: Decimal,
    #[serde(alias = "numVotes")]
    pub score: f64,
    #[serde(default)]
    pub block_tag: Option<i64>,
}

/// Scores accounts that own an ENS name and keep a minimum native balance.
pub struct ValidEnsAndMinBal {
    base: BaseArgs,
    params: ValidEnsAndMinBalParams,
}

impl ValidEnsAndMinBal {
    pub fn new(base: BaseArgs, params: ValidEnsAndMinBalParams) -> Self {
        Self { base, params }
    }

    async fn controls_name(&self, block: BlockTag) -> Result<bool> {
        let provider = self.base.provider.as_ref();
        let account = self.base.account;
        match &self.params.ens_name {
            Some(name) => Ok(ens::resolve_name(provider, name, block).await? == account),
            None => Ok(ens::lookup_address(provider, account, block).await?.is_some()),
        }
    }
}

#[async_trait]
impl VotingPowerStrategy for ValidEnsAndMinBal {
    async fn process(&self) -> Result<f64> {
        let threshold = min_raw_balance(self.params.min_balance, NATIVE_DECIMALS)?;
        let block = parse_block_tag(self.params.block_tag);
        let account = self.base.account;

        let (controls_name, balance) = futures::try_join!(
            self.controls_name(block),
            self.base.provider.get_balance(account, block),
        )?;

        log::debug!("{account}: controls name {controls_name}, balance {balance} wei");
        Ok(if controls_name && balance >= threshold {
            self.params.score
        } else {
            0.0
        })
    }
}
