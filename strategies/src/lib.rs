//! Voting-power strategies for community funding rounds.
//!
//! Each strategy reads on-chain state at a pinned block and turns it into a
//! single `f64` score. [`evaluate`] is the entry point callers use.

pub mod abi;
mod block_tag;
pub mod decimals;
pub mod ens;
mod error;
mod provider;
mod registry;
pub mod voting_power_strategies;

pub use block_tag::{parse_block_tag, BlockTag};
pub use error::{Result, StrategyError};
pub use provider::{ChainReader, Contract};
pub use registry::{evaluate, StrategyName, StrategyPayload};
pub use voting_power_strategies::{BaseArgs, Networks, VotingPowerStrategy};
