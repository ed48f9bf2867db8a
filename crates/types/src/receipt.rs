// Path: crates/types/src/receipt.rs

//! Receipts, logs and bloom construction.

use crate::primitives::{Address, Bloom, BloomInput, H256};
use serde::{Deserialize, Serialize};

/// An event emitted during execution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Log {
    /// Emitting contract.
    pub address: Address,
    /// Indexed topics.
    pub topics: Vec<H256>,
    /// Non-indexed payload.
    pub data: Vec<u8>,
    /// Hash of the transaction that emitted the log.
    pub tx_hash: H256,
    /// Hash of the enclosing block.
    pub block_hash: H256,
    /// Position of the transaction in the block.
    pub tx_index: usize,
}

/// The outcome of one transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Receipt {
    /// Intermediate state root after the transaction.
    pub post_state: Vec<u8>,
    /// Whether execution reverted.
    pub failed: bool,
    /// Gas used by the block up to and including this transaction.
    pub cumulative_gas_used: u64,
    /// Bloom over `logs`.
    pub bloom: Bloom,
    /// Logs emitted by the transaction.
    pub logs: Vec<Log>,
    /// Hash of the transaction.
    pub tx_hash: H256,
    /// Gas used by this transaction alone.
    pub gas_used: u64,
}

impl Receipt {
    /// Creates a receipt with the given root, status and cumulative gas.
    pub fn new(post_state: &[u8], failed: bool, cumulative_gas_used: u64) -> Self {
        Self {
            post_state: post_state.to_vec(),
            failed,
            cumulative_gas_used,
            ..Default::default()
        }
    }
}

/// Builds the 2048-bit bloom over every log address and topic of `receipts`.
pub fn create_bloom(receipts: &[Receipt]) -> Bloom {
    let mut bloom = Bloom::default();
    for log in receipts.iter().flat_map(|r| r.logs.iter()) {
        bloom.accrue(BloomInput::Raw(log.address.as_bytes()));
        for topic in &log.topics {
            bloom.accrue(BloomInput::Raw(topic.as_bytes()));
        }
    }
    bloom
}
