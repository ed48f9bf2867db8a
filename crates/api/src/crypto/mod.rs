// Path: crates/api/src/crypto/mod.rs
//! Seal signature recovery.

use range_types::error::SignerError;
use range_types::{Address, H256};

/// Recovers the signer of a header seal.
///
/// Implementations wrap the node's signature scheme; the engine only needs
/// the recovered address to compare against the coinbase.
pub trait SealRecovery: Send + Sync {
    /// Returns the address that produced `signature` over `hash`.
    fn recover(&self, hash: &H256, signature: &[u8]) -> Result<Address, SignerError>;
}
