//! Host-side glue: serves strategy reads from alloy JSON-RPC providers.

use std::{marker::PhantomData, sync::Arc};

use alloy::{
    eips::BlockId,
    providers::{Provider, ProviderBuilder},
    rpc::types::TransactionRequest,
    transports::{
        http::{reqwest::Url, Client, Http},
        Transport,
    },
};
use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use community_strategies::{BlockTag, ChainReader, Result, StrategyError};

/// Maps a pinned block onto the RPC block identifier.
pub fn block_id(block: BlockTag) -> BlockId {
    match block {
        BlockTag::Latest => BlockId::latest(),
        BlockTag::Number(number) => BlockId::number(number),
    }
}

/// [`ChainReader`] backed by an alloy provider.
pub struct AlloyChainReader<T, P> {
    provider: P,
    _transport: PhantomData<fn() -> T>,
}

impl<T, P> AlloyChainReader<T, P>
where
    T: Transport + Clone,
    P: Provider<T>,
{
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            _transport: PhantomData,
        }
    }
}

#[async_trait]
impl<T, P> ChainReader for AlloyChainReader<T, P>
where
    T: Transport + Clone,
    P: Provider<T> + Send + Sync + 'static,
{
    async fn call(&self, contract: Address, input: Bytes, block: BlockTag) -> Result<Bytes> {
        let tx = TransactionRequest::default().to(contract).input(input.into());
        self.provider
            .call(&tx)
            .block(block_id(block))
            .await
            .map_err(|err| {
                StrategyError::ChainRead(format!("eth_call to {contract} at {block}: {err}"))
            })
    }

    async fn get_balance(&self, account: Address, block: BlockTag) -> Result<U256> {
        self.provider
            .get_balance(account)
            .block_id(block_id(block))
            .await
            .map_err(|err| {
                StrategyError::ChainRead(format!("balance of {account} at {block}: {err}"))
            })
    }
}

/// Read-only reader over plain HTTP JSON-RPC.
pub fn http_reader(rpc_url: Url) -> Arc<dyn ChainReader> {
    let provider = ProviderBuilder::new().on_http(rpc_url);
    Arc::new(AlloyChainReader::<Http<Client>, _>::new(provider))
}

#[cfg(test)]
mod tests {
    use alloy::eips::BlockNumberOrTag;

    use super::*;

    #[test]
    fn latest_and_numbered_blocks_map_to_rpc_ids() {
        assert_eq!(block_id(BlockTag::Latest), BlockId::Number(BlockNumberOrTag::Latest));
        assert_eq!(
            block_id(BlockTag::Number(17_000_000)),
            BlockId::Number(BlockNumberOrTag::Number(17_000_000))
        );
    }
}
