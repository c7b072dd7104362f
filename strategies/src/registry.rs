use std::{fmt, str::FromStr};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    voting_power_strategies::{
        BalanceOfErc20, BalanceOfErc20Params, BalanceOfErc721, BalanceOfErc721Params, FixedNum,
        FixedNumParams, MinimumBalance, MinimumBalanceParams, ThankApe, ThankApeParams,
        ValidEnsAndMinBal, ValidEnsAndMinBalParams,
    },
    BaseArgs, Networks, Result, StrategyError, VotingPowerStrategy,
};

/// Every strategy the engine knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyName {
    BalanceOfErc721,
    BalanceOfErc20,
    FixedNum,
    ValidEnsAndMinBal,
    ThankApe,
    MinimumBalance,
}

impl StrategyName {
    pub const ALL: [StrategyName; 6] = [
        StrategyName::BalanceOfErc721,
        StrategyName::BalanceOfErc20,
        StrategyName::FixedNum,
        StrategyName::ValidEnsAndMinBal,
        StrategyName::ThankApe,
        StrategyName::MinimumBalance,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StrategyName::BalanceOfErc721 => "balanceOfErc721",
            StrategyName::BalanceOfErc20 => "balanceOfErc20",
            StrategyName::FixedNum => "fixedNum",
            StrategyName::ValidEnsAndMinBal => "validEnsAndMinBal",
            StrategyName::ThankApe => "thankApe",
            StrategyName::MinimumBalance => "minimumBalance",
        }
    }

    /// Validates `payload` against the parameter shape of this strategy.
    pub fn parse_payload(self, payload: Value) -> Result<StrategyPayload> {
        let invalid = |reason: String| StrategyError::InvalidParameters {
            strategy: self,
            reason,
        };

        let Value::Object(fields) = &payload else {
            return Err(invalid(format!("expected a JSON object, got {payload}")));
        };
        if let Some(tag) = fields.get("strategyName") {
            if tag.as_str() != Some(self.as_str()) {
                return Err(invalid(format!("payload is tagged {tag}")));
            }
        }

        Ok(match self {
            StrategyName::BalanceOfErc721 => {
                StrategyPayload::BalanceOfErc721(params(self, payload)?)
            }
            StrategyName::BalanceOfErc20 => StrategyPayload::BalanceOfErc20(params(self, payload)?),
            StrategyName::FixedNum => StrategyPayload::FixedNum(params(self, payload)?),
            StrategyName::ValidEnsAndMinBal => {
                StrategyPayload::ValidEnsAndMinBal(params(self, payload)?)
            }
            StrategyName::ThankApe => StrategyPayload::ThankApe(params(self, payload)?),
            StrategyName::MinimumBalance => StrategyPayload::MinimumBalance(params(self, payload)?),
        })
    }
}

fn params<T: DeserializeOwned>(strategy: StrategyName, payload: Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|err| StrategyError::InvalidParameters {
        strategy,
        reason: err.to_string(),
    })
}

impl fmt::Display for StrategyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyName {
    type Err = StrategyError;

    fn from_str(name: &str) -> Result<Self> {
        StrategyName::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == name)
            .ok_or_else(|| StrategyError::InvalidStrategy(name.to_string()))
    }
}

/// Validated parameters, one variant per strategy.
#[derive(Clone, Debug, PartialEq)]
pub enum StrategyPayload {
    BalanceOfErc721(BalanceOfErc721Params),
    BalanceOfErc20(BalanceOfErc20Params),
    FixedNum(FixedNumParams),
    ValidEnsAndMinBal(ValidEnsAndMinBalParams),
    ThankApe(ThankApeParams),
    MinimumBalance(MinimumBalanceParams),
}

impl StrategyPayload {
    pub fn name(&self) -> StrategyName {
        match self {
            StrategyPayload::BalanceOfErc721(_) => StrategyName::BalanceOfErc721,
            StrategyPayload::BalanceOfErc20(_) => StrategyName::BalanceOfErc20,
            StrategyPayload::FixedNum(_) => StrategyName::FixedNum,
            StrategyPayload::ValidEnsAndMinBal(_) => StrategyName::ValidEnsAndMinBal,
            StrategyPayload::ThankApe(_) => StrategyName::ThankApe,
            StrategyPayload::MinimumBalance(_) => StrategyName::MinimumBalance,
        }
    }

    /// Builds the strategy. Performs no I/O.
    pub fn into_strategy(
        self,
        base: BaseArgs,
        networks: &Networks,
    ) -> Box<dyn VotingPowerStrategy> {
        match self {
            StrategyPayload::BalanceOfErc721(params) => {
                Box::new(BalanceOfErc721::new(base, params))
            }
            StrategyPayload::BalanceOfErc20(params) => Box::new(BalanceOfErc20::new(base, params)),
            StrategyPayload::FixedNum(params) => Box::new(FixedNum::new(params)),
            StrategyPayload::ValidEnsAndMinBal(params) => {
                Box::new(ValidEnsAndMinBal::new(base, params))
            }
            StrategyPayload::ThankApe(params) => {
                Box::new(ThankApe::new(base, networks.mainnet.clone(), params))
            }
            StrategyPayload::MinimumBalance(params) => Box::new(MinimumBalance::new(base, params)),
        }
    }
}

/// Scores `base.account` with the strategy called `name`.
pub async fn evaluate(
    name: &str,
    payload: Value,
    base: BaseArgs,
    networks: &Networks,
) -> Result<f64> {
    let name: StrategyName = name.parse()?;
    let payload = name.parse_payload(payload)?;
    let account = base.account;

    let score = payload.into_strategy(base, networks).process().await?;
    log::info!("{name} voting power for {account}: {score}");
    Ok(score)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use serde_json::json;

    use super::*;

    #[test]
    fn names_round_trip_through_their_identifiers() {
        for name in StrategyName::ALL {
            assert_eq!(name.as_str().parse::<StrategyName>().unwrap(), name);
        }
        assert!(matches!(
            "balanceOf".parse::<StrategyName>(),
            Err(StrategyError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn payload_variant_matches_its_name() {
        let payloads = [
            (
                StrategyName::BalanceOfErc721,
                json!({ "contract": "0x9C8fF314C9Bc7F6e59A9d9225Fb22946427eDC03" }),
            ),
            (
                StrategyName::BalanceOfErc20,
                json!({ "contract": "0x4d224452801ACEd8B2F0aebE155379bb5D594381", "decimals": 18 }),
            ),
            (StrategyName::FixedNum, json!({ "score": 1 })),
            (StrategyName::ValidEnsAndMinBal, json!({ "minBalance": "0.1", "numVotes": 1 })),
            (
                StrategyName::ThankApe,
                json!({ "address": "0x4d224452801ACEd8B2F0aebE155379bb5D594381" }),
            ),
            (
                StrategyName::MinimumBalance,
                json!({
                    "contract": "0x4d224452801ACEd8B2F0aebE155379bb5D594381",
                    "decimals": 18,
                    "minBalance": 10,
                    "score": 2,
                }),
            ),
        ];
        for (name, payload) in payloads {
            assert_eq!(name.parse_payload(payload).unwrap().name(), name);
        }
    }

    #[test]
    fn optional_fields_take_their_defaults() {
        let payload = StrategyName::BalanceOfErc20
            .parse_payload(json!({
                "strategyName": "balanceOfErc20",
                "contract": "0x4d224452801ACEd8B2F0aebE155379bb5D594381",
                "decimals": 18,
            }))
            .unwrap();
        assert_eq!(
            payload,
            StrategyPayload::BalanceOfErc20(BalanceOfErc20Params {
                contract: address!("4d224452801ACEd8B2F0aebE155379bb5D594381"),
                decimals: 18,
                multiplier: rust_decimal::Decimal::ONE,
                block_tag: None,
            })
        );
    }

    #[test]
    fn rejects_missing_fields_and_wrong_types() {
        let missing = StrategyName::BalanceOfErc20
            .parse_payload(json!({ "contract": "0x4d224452801ACEd8B2F0aebE155379bb5D594381" }));
        assert!(matches!(
            missing,
            Err(StrategyError::InvalidParameters {
                strategy: StrategyName::BalanceOfErc20,
                ..
            })
        ));

        let wrong_type = StrategyName::MinimumBalance.parse_payload(json!({
            "contract": "0x4d224452801ACEd8B2F0aebE155379bb5D594381",
            "decimals": "eighteen",
            "minBalance": 10,
            "score": 2,
        }));
        assert!(matches!(wrong_type, Err(StrategyError::InvalidParameters { .. })));

        assert!(StrategyName::FixedNum.parse_payload(json!([42])).is_err());
    }

    #[test]
    fn rejects_payload_tagged_for_another_strategy() {
        let result = StrategyName::FixedNum
            .parse_payload(json!({ "strategyName": "thankApe", "score": 42 }));
        assert!(matches!(result, Err(StrategyError::InvalidParameters { .. })));
    }
}
