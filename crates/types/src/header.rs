// Path: crates/types/src/header.rs

//! Block headers and blocks.

use crate::codec::canonical_hash;
use crate::params::MIGRATION_CONTRACT;
use crate::primitives::{Address, H256};
use crate::transaction::Transaction;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A block header as seen by the finalization layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct Header {
    /// Hash of the parent header.
    pub parent_hash: H256,
    /// Block producer; the migration contract address on the migration block.
    pub coinbase: Address,
    /// State root after finalization.
    pub root: H256,
    /// Block height.
    pub number: u64,
    /// Gas limit of the block.
    pub gas_limit: u64,
    /// Gas used by user transactions before finalization.
    pub gas_used: u64,
    /// Unix timestamp in seconds.
    pub time: u64,
    /// Free-form extra data.
    pub extra: Vec<u8>,
    /// Producer seal over [`Header::seal_hash`]. Empty until sealed.
    pub signature: Vec<u8>,
}

impl Header {
    /// The block hash: Keccak-256 of the canonical encoding.
    pub fn hash(&self) -> H256 {
        canonical_hash(self)
    }

    /// The digest a producer signs: the hash with the seal cleared.
    pub fn seal_hash(&self) -> H256 {
        let mut unsealed = self.clone();
        unsealed.signature.clear();
        canonical_hash(&unsealed)
    }

    /// True iff this header marks the one-time Gen2 migration block.
    pub fn is_gen2_migration(&self) -> bool {
        self.coinbase == MIGRATION_CONTRACT
    }
}

/// A header together with its transaction list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct Block {
    /// The block header.
    pub header: Header,
    /// Transactions in block order.
    pub transactions: Vec<Transaction>,
}

/// Extra data written into the migration block header.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct MigrationExtra {
    /// Packed protocol version, see [`crate::params::protocol_version`].
    pub version: u32,
    /// Engine identifier.
    pub engine: Vec<u8>,
    /// Hash string of the legacy chain snapshot.
    pub snapshot_hash: Vec<u8>,
}
