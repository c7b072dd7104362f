use std::sync::Arc;

use alloy_primitives::Address;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{de::Error as _, Deserialize, Deserializer};

use crate::{ChainReader, Result};

/// Fields every strategy receives: who is being scored and where to read.
#[derive(Clone)]
pub struct BaseArgs {
    pub account: Address,
    pub provider: Arc<dyn ChainReader>,
}

impl BaseArgs {
    pub fn new(account: Address, provider: Arc<dyn ChainReader>) -> Self {
        Self { account, provider }
    }
}

/// Chains the engine reads from besides the caller's own provider.
#[derive(Clone)]
pub struct Networks {
    pub mainnet: Arc<dyn ChainReader>,
}

/// A fully parameterized scoring rule.
///
/// Building one never touches the chain; every read happens inside
/// [`process`](VotingPowerStrategy::process).
#[async_trait]
pub trait VotingPowerStrategy: Send + Sync {
    async fn process(&self) -> Result<f64>;
}

pub(crate) fn default_multiplier() -> Decimal {
    Decimal::ONE
}

/// Rejects negative weights and thresholds when the payload is parsed.
pub(crate) fn non_negative<'de, D>(deserializer: D) -> std::result::Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = <Decimal as Deserialize>::deserialize(deserializer)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(D::Error::custom(format!("{value} must not be negative")));
    }
    Ok(value)
}

mod balance_of_erc20;
mod balance_of_erc721;
mod fixed_num;
mod minimum_balance;
mod thank_ape;
mod valid_ens_and_min_bal;

pub use balance_of_erc20::{BalanceOfErc20, BalanceOfErc20Params};
pub use balance_of_erc721::{BalanceOfErc721, BalanceOfErc721Params};
pub use fixed_num::{FixedNum, FixedNumParams};
pub use minimum_balance::{MinimumBalance, MinimumBalanceParams};
pub use thank_ape::{tiered_score, ThankApe, ThankApeParams, APE_COIN, APE_COIN_STAKING};
pub use valid_ens_and_min_bal::{ValidEnsAndMinBal, ValidEnsAndMinBalParams};
