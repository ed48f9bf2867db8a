// Path: crates/test_utils/src/chain.rs

//! A minimal in-memory chain.

use range_api::chain::{ChainConfig, ChainReader};
use range_types::header::Header;
use range_types::H256;

/// A linear chain of headers with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct TestChain {
    config: ChainConfig,
    headers: Vec<Header>,
}

impl TestChain {
    /// A chain with id 1 and empty-account deletion active from genesis.
    pub fn new() -> Self {
        Self {
            config: ChainConfig {
                chain_id: 1,
                eip158_block: Some(0),
            },
            headers: vec![Header::default()],
        }
    }

    /// Replaces the chain configuration.
    pub fn with_config(mut self, config: ChainConfig) -> Self {
        self.config = config;
        self
    }

    /// A child of the current head, with `coinbase` and a gas limit of 40M.
    pub fn next_header(&self, coinbase: range_types::Address) -> Header {
        let parent = self.headers.last().cloned().unwrap_or_default();
        Header {
            parent_hash: parent.hash(),
            coinbase,
            number: parent.number + 1,
            gas_limit: 40_000_000,
            time: parent.time + 60,
            ..Default::default()
        }
    }

    /// Appends `header` as the new head.
    pub fn push(&mut self, header: Header) {
        self.headers.push(header);
    }
}

impl ChainReader for TestChain {
    fn config(&self) -> &ChainConfig {
        &self.config
    }

    fn current_header(&self) -> Option<Header> {
        self.headers.last().cloned()
    }

    fn header_by_hash(&self, hash: &H256) -> Option<Header> {
        self.headers.iter().find(|h| h.hash() == *hash).cloned()
    }
}
