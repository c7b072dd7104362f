//! ENS name resolution over plain contract reads.

use alloy_primitives::{address, hex, keccak256, Address, B256};

use crate::{
    abi::{IENSRegistry, IENSResolver},
    BlockTag, ChainReader, Contract, Result, StrategyError,
};

/// Canonical ENS registry, same address on every network ENS is deployed to.
pub const ENS_REGISTRY: Address = address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e");

/// EIP-137 namehash. Labels are lower-cased; full UTS-46 normalization is
/// left to the caller.
pub fn namehash(name: &str) -> B256 {
    if name.is_empty() {
        return B256::ZERO;
    }
    name.rsplit('.').fold(B256::ZERO, |node, label| {
        let label = keccak256(label.to_lowercase().as_bytes());
        keccak256([node.as_slice(), label.as_slice()].concat())
    })
}

async fn resolver_of(
    reader: &dyn ChainReader,
    node: B256,
    block: BlockTag,
) -> Result<Option<Address>> {
    let registry = Contract::at(ENS_REGISTRY, reader, block);
    let resolver = registry.call(&IENSRegistry::resolverCall { node }).await?._0;
    Ok((!resolver.is_zero()).then_some(resolver))
}

/// Forward-resolves `name` to an address.
pub async fn resolve_name(
    reader: &dyn ChainReader,
    name: &str,
    block: BlockTag,
) -> Result<Address> {
    let node = namehash(name);
    let resolver = resolver_of(reader, node, block)
        .await?
        .ok_or_else(|| StrategyError::Resolution(format!("{name} has no resolver")))?;

    let resolved = Contract::at(resolver, reader, block)
        .call(&IENSResolver::addrCall { node })
        .await?
        ._0;
    if resolved.is_zero() {
        return Err(StrategyError::Resolution(format!("{name} has no address record")));
    }
    log::debug!("{name} resolves to {resolved}");
    Ok(resolved)
}

/// Primary ENS name of `account`, if it has one that resolves back to it.
pub async fn lookup_address(
    reader: &dyn ChainReader,
    account: Address,
    block: BlockTag,
) -> Result<Option<String>> {
    let node = namehash(&format!("{}.addr.reverse", hex::encode(account)));
    let Some(resolver) = resolver_of(reader, node, block).await? else {
        return Ok(None);
    };

    let name = Contract::at(resolver, reader, block)
        .call(&IENSResolver::nameCall { node })
        .await?
        ._0;
    if name.is_empty() {
        return Ok(None);
    }

    // reverse records are self-reported; only trust names pointing back
    match resolve_name(reader, &name, block).await {
        Ok(resolved) if resolved == account => Ok(Some(name)),
        Ok(_) | Err(StrategyError::Resolution(_)) => Ok(None),
        Err(err) => Err(err),
    }
}
