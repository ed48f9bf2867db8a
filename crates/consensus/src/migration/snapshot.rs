// Path: crates/consensus/src/migration/snapshot.rs

//! The Gen2 balance snapshot document.

use super::legacy_address::decode_legacy_address;
use range_types::error::MigrationError;
use range_types::params::{GAS_PER_MIGRATION_ENTRY, MIGRATION_AMOUNT_SCALE};
use range_types::{Address, U256};
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One legacy balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotItem {
    /// Gen2 Base58 owner address.
    pub owner: String,
    /// Balance in Gen2 units (8 decimals). Any non-negative JSON integer
    /// that fits 256 bits is accepted.
    #[serde(
        deserialize_with = "deserialize_amount",
        serialize_with = "serialize_amount"
    )]
    pub amount: U256,
    /// Gen2 output type.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Reads the literal JSON number so integers wider than 64 bits keep every
/// digit. Strings, signs, fractions and exponents are rejected.
fn deserialize_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    let literal = raw.get();
    if literal.is_empty() || !literal.bytes().all(|b| b.is_ascii_digit()) {
        return Err(D::Error::custom(format!(
            "amount must be a non-negative integer, got {}",
            literal
        )));
    }
    U256::from_dec_str(literal)
        .map_err(|e| D::Error::custom(format!("amount {} out of range: {:?}", literal, e)))
}

fn serialize_amount<S: Serializer>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    RawValue::from_string(amount.to_string())
        .map_err(S::Error::custom)?
        .serialize(serializer)
}

/// The legacy chain's final state, as exported by the Gen2 node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// Balances.
    #[serde(rename = "snapshot_utxos")]
    pub utxos: Vec<SnapshotItem>,
    /// Gen2 addresses that were frozen.
    #[serde(rename = "snapshot_blacklist")]
    pub blacklist: Vec<String>,
    /// Hash identifying the snapshot.
    #[serde(rename = "snapshot_hash")]
    pub hash: String,
}

impl Snapshot {
    /// Parses a snapshot document. Unknown fields at any level are rejected.
    pub fn parse<R: Read>(reader: R) -> Result<Self, MigrationError> {
        serde_json::from_reader(reader).map_err(|e| MigrationError::Snapshot(e.to_string()))
    }

    /// Reads and parses the snapshot document at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MigrationError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| MigrationError::Io(format!("{}: {}", path.display(), e)))?;
        Self::parse(BufReader::new(file))
    }
}

/// Arguments of `setSnapshot`, derived deterministically from a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotParams {
    /// Gen3 owner addresses, in document order.
    pub owners: Vec<Address>,
    /// Amounts in Gen3 units, aligned with `owners`.
    pub amounts: Vec<U256>,
    /// Gen3 forms of the blacklisted addresses.
    pub blacklist: Vec<Address>,
}

impl SnapshotParams {
    /// Converts every address and scales every amount. A single undecodable
    /// address fails the whole snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, MigrationError> {
        let scale = U256::from(MIGRATION_AMOUNT_SCALE);
        let mut params = Self {
            owners: Vec::with_capacity(snapshot.utxos.len()),
            amounts: Vec::with_capacity(snapshot.utxos.len()),
            blacklist: Vec::with_capacity(snapshot.blacklist.len()),
        };
        for item in &snapshot.utxos {
            params.owners.push(decode_legacy_address(&item.owner)?);
            let amount = item.amount.checked_mul(scale).ok_or_else(|| {
                MigrationError::Snapshot(format!("amount {} overflows after scaling", item.amount))
            })?;
            params.amounts.push(amount);
        }
        for owner in &snapshot.blacklist {
            params.blacklist.push(decode_legacy_address(owner)?);
        }
        Ok(params)
    }

    /// Sum of all migrated amounts.
    pub fn total_amount(&self) -> U256 {
        self.amounts
            .iter()
            .fold(U256::zero(), |acc, amount| acc.saturating_add(*amount))
    }

    /// Gas limit of the migration block.
    pub fn gas_limit(&self) -> u64 {
        GAS_PER_MIGRATION_ENTRY.saturating_mul(self.owners.len() as u64)
    }
}
