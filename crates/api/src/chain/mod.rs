// Path: crates/api/src/chain/mod.rs
//! Read access to the canonical chain.

use range_types::header::Header;
use range_types::H256;

/// Chain-level rule switches relevant to finalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainConfig {
    /// Chain identifier used for replay protection.
    pub chain_id: u64,
    /// Height from which empty accounts are deleted when computing
    /// intermediate roots. `None` means never.
    pub eip158_block: Option<u64>,
}

impl ChainConfig {
    /// Whether empty-account deletion is active at `number`.
    pub fn is_eip158(&self, number: u64) -> bool {
        self.eip158_block.is_some_and(|fork| number >= fork)
    }
}

/// The subset of chain access the engine needs.
pub trait ChainReader: Send + Sync {
    /// Chain configuration.
    fn config(&self) -> &ChainConfig;

    /// The current head, if any block has been imported.
    fn current_header(&self) -> Option<Header>;

    /// Looks up a header by hash.
    fn header_by_hash(&self, hash: &H256) -> Option<Header>;
}
