// Path: crates/types/src/codec.rs

//! The canonical, deterministic binary codec for consensus-critical data.
//!
//! Headers, transactions and migration extra-data are encoded with
//! `parity-scale-codec` (SCALE). Hashes of those structures are always taken
//! over this encoding so every component agrees on the same bytes.

use crate::primitives::{keccak256, H256};
use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into its canonical byte representation.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Vec<u8> {
    v.encode()
}

/// Decodes a value from its canonical byte representation.
///
/// Trailing bytes are rejected.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}

/// Keccak-256 over the canonical encoding of `v`.
pub fn canonical_hash<T: Encode>(v: &T) -> H256 {
    keccak256(v.encode())
}
