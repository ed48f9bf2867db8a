// Path: crates/test_utils/src/fixtures.rs

//! Builders for Gen2 snapshot documents.

use range_types::primitives::keccak256;
use range_types::Address;
use serde_json::{json, Value};

/// Version byte of Gen2 pay-to-pubkey-hash addresses.
pub const LEGACY_P2PKH_VERSION: u8 = 0x21;

/// Encodes `address` as a Gen2 Base58 address: version byte, the 20 address
/// bytes, then a 4-byte checksum.
pub fn encode_legacy_address(version: u8, address: &Address) -> String {
    let mut payload = Vec::with_capacity(25);
    payload.push(version);
    payload.extend_from_slice(address.as_bytes());
    let checksum = keccak256(&payload);
    payload.extend(checksum.as_bytes().iter().take(4));
    bs58::encode(payload).into_string()
}

/// Accumulates entries of a snapshot document.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    utxos: Vec<Value>,
    blacklist: Vec<String>,
    hash: String,
}

impl SnapshotBuilder {
    /// Starts a document with the given snapshot hash.
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            ..Default::default()
        }
    }

    /// Adds a balance of `amount` Gen2 units owned by `owner`.
    pub fn utxo(mut self, owner: &Address, amount: u64) -> Self {
        self.utxos.push(json!({
            "owner": encode_legacy_address(LEGACY_P2PKH_VERSION, owner),
            "amount": amount,
            "type": "pubkeyhash",
        }));
        self
    }

    /// Adds a raw, possibly malformed, owner string.
    pub fn raw_utxo(mut self, owner: &str, amount: u64) -> Self {
        self.utxos.push(json!({
            "owner": owner,
            "amount": amount,
            "type": "pubkeyhash",
        }));
        self
    }

    /// Adds a blacklisted Gen2 address.
    pub fn blacklisted(mut self, owner: &Address) -> Self {
        self.blacklist
            .push(encode_legacy_address(LEGACY_P2PKH_VERSION, owner));
        self
    }

    /// The document as a JSON value.
    pub fn to_value(&self) -> Value {
        json!({
            "snapshot_utxos": self.utxos,
            "snapshot_blacklist": self.blacklist,
            "snapshot_hash": self.hash,
        })
    }

    /// The document as a JSON string.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}
