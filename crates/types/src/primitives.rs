// Path: crates/types/src/primitives.rs

//! Hash, address and amount primitives.
//!
//! The fixed-width types come from `ethereum-types` so that they interoperate
//! directly with `ethabi` tokens. Hashing is Keccak-256 throughout.

pub use ethereum_types::{Address, Bloom, BloomInput, H256, U256};
use sha3::{Digest, Keccak256};

/// Computes the Keccak-256 digest of `data`.
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    let digest = Keccak256::digest(data.as_ref());
    H256::from_slice(digest.as_slice())
}

/// Interprets `bytes` as an address, keeping the trailing 20 bytes of longer
/// inputs and left-padding shorter ones with zeroes.
pub fn bytes_to_address(bytes: &[u8]) -> Address {
    let mut out = [0u8; 20];
    let take = bytes.len().min(20);
    let (_, tail) = bytes.split_at(bytes.len() - take);
    let (_, dst) = out.split_at_mut(20 - take);
    dst.copy_from_slice(tail);
    Address::from(out)
}

/// Returns the 32-byte storage key of an address: the address left-padded
/// with zeroes.
pub fn address_key(address: &Address) -> H256 {
    let mut out = [0u8; 32];
    let (_, dst) = out.split_at_mut(12);
    dst.copy_from_slice(address.as_bytes());
    H256::from(out)
}

/// Recovers the address stored in a left-padded 32-byte word.
pub fn key_to_address(key: &H256) -> Address {
    bytes_to_address(key.as_bytes())
}

/// Encodes an amount as a big-endian 32-byte word.
pub fn u256_to_h256(value: U256) -> H256 {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    H256::from(out)
}

/// Decodes a big-endian 32-byte word into an amount.
pub fn h256_to_u256(value: &H256) -> U256 {
    U256::from_big_endian(value.as_bytes())
}
