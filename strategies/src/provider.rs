use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use async_trait::async_trait;

use crate::{BlockTag, Result, StrategyError};

/// Read-only access to one chain.
///
/// Implementations own transport concerns (pooling, rate limits). Strategies
/// only ever issue reads pinned to a [`BlockTag`].
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Executes an `eth_call` against `contract` at `block`.
    async fn call(&self, contract: Address, input: Bytes, block: BlockTag) -> Result<Bytes>;

    /// Native coin balance of `account` at `block`.
    async fn get_balance(&self, account: Address, block: BlockTag) -> Result<U256>;
}

/// A contract bound to a reader and a pinned block.
#[derive(Clone, Copy)]
pub struct Contract<'a> {
    address: Address,
    reader: &'a dyn ChainReader,
    block: BlockTag,
}

impl<'a> Contract<'a> {
    pub fn at(address: Address, reader: &'a dyn ChainReader, block: BlockTag) -> Self {
        Self {
            address,
            reader,
            block,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Encodes `call`, executes it and decodes the typed return value.
    pub async fn call<C: SolCall + Sync>(&self, call: &C) -> Result<C::Return> {
        log::debug!(
            "{} on {} at block {}",
            C::SIGNATURE,
            self.address,
            self.block
        );
        let output = self
            .reader
            .call(self.address, call.abi_encode().into(), self.block)
            .await?;
        C::abi_decode_returns(&output, true).map_err(|err| {
            StrategyError::ChainRead(format!(
                "malformed {} response from {}: {err}",
                C::SIGNATURE,
                self.address
            ))
        })
    }
}
