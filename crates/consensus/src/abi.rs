// Path: crates/consensus/src/abi.rs

//! Loaded governance ABIs and call encoding helpers.

use ethabi::{Contract, Token};
use range_types::abi;
use range_types::error::{ConsensusError, ContractCallError};
use range_types::{Address, U256};

/// The governance contracts the engine calls, parsed once at start-up.
#[derive(Debug, Clone)]
pub struct GovernanceAbis {
    /// Masternode registry.
    pub masternode_registry: Contract,
    /// Block reward.
    pub block_reward: Contract,
    /// Blacklist registry.
    pub blacklist_registry: Contract,
    /// Gen2 migration contract.
    pub migration: Contract,
}

impl GovernanceAbis {
    /// Parses every ABI document.
    pub fn load() -> Result<Self, ConsensusError> {
        let parse = |name: &str, json: &str| {
            abi::load(json).map_err(|e| ConsensusError::Abi(format!("{}: {}", name, e)))
        };
        Ok(Self {
            masternode_registry: parse("MasternodeRegistry", abi::MASTERNODE_REGISTRY_ABI)?,
            block_reward: parse("BlockReward", abi::BLOCK_REWARD_ABI)?,
            blacklist_registry: parse("BlacklistRegistry", abi::BLACKLIST_REGISTRY_ABI)?,
            migration: parse("Gen2Migration", abi::GEN2_MIGRATION_ABI)?,
        })
    }
}

/// ABI-encodes a call to `method`.
pub fn encode_call(
    contract: &Contract,
    method: &'static str,
    args: &[Token],
) -> Result<Vec<u8>, ContractCallError> {
    contract
        .function(method)
        .and_then(|f| f.encode_input(args))
        .map_err(|e| ContractCallError::Encode {
            method,
            reason: e.to_string(),
        })
}

fn decode_output(
    contract: &Contract,
    method: &'static str,
    output: &[u8],
) -> Result<Vec<Token>, ContractCallError> {
    contract
        .function(method)
        .and_then(|f| f.decode_output(output))
        .map_err(|e| ContractCallError::Decode {
            method,
            reason: e.to_string(),
        })
}

/// Decodes a single `address[]` return value.
pub fn decode_addresses(
    contract: &Contract,
    method: &'static str,
    output: &[u8],
) -> Result<Vec<Address>, ContractCallError> {
    let mismatch = || ContractCallError::Decode {
        method,
        reason: "expected a single address[] value".into(),
    };
    match decode_output(contract, method, output)?.as_slice() {
        [Token::Array(items)] => items
            .iter()
            .map(|item| match item {
                Token::Address(address) => Ok(*address),
                _ => Err(mismatch()),
            })
            .collect(),
        _ => Err(mismatch()),
    }
}

/// Decodes a single `uint256` return value.
pub fn decode_uint(
    contract: &Contract,
    method: &'static str,
    output: &[u8],
) -> Result<U256, ContractCallError> {
    match decode_output(contract, method, output)?.as_slice() {
        [Token::Uint(value)] => Ok(*value),
        _ => Err(ContractCallError::Decode {
            method,
            reason: "expected a single uint256 value".into(),
        }),
    }
}
