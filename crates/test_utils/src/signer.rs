// Path: crates/test_utils/src/signer.rs

//! Deterministic signing for tests.
//!
//! A test signature is 65 bytes: the signer address left-padded to 32 bytes,
//! a 32-byte Keccak-256 tag over `digest ‖ address`, and a zero recovery byte.
//! Recovery reads the address back and checks the tag, which is enough to
//! exercise every code path that compares a recovered signer.

use range_api::crypto::SealRecovery;
use range_api::transaction::{SignerFn, TxSigner};
use range_types::codec::canonical_hash;
use range_types::error::SignerError;
use range_types::primitives::{address_key, bytes_to_address, keccak256};
use range_types::transaction::{SignatureValues, Transaction, TxAuthorization};
use range_types::{Address, H256, U256};
use std::any::Any;
use std::sync::Arc;

const SIGNATURE_LEN: usize = 65;

fn tag(digest: &[u8], account: &Address) -> H256 {
    let mut preimage = digest.to_vec();
    preimage.extend_from_slice(account.as_bytes());
    keccak256(preimage)
}

/// Produces the test signature of `account` over `digest`.
pub fn test_signature(account: &Address, digest: &[u8]) -> Vec<u8> {
    let mut sig = Vec::with_capacity(SIGNATURE_LEN);
    sig.extend_from_slice(address_key(account).as_bytes());
    sig.extend_from_slice(tag(digest, account).as_bytes());
    sig.push(0);
    sig
}

/// Recovers the signer of a test signature over `digest`.
pub fn recover_test_signature(digest: &[u8], signature: &[u8]) -> Result<Address, SignerError> {
    if signature.len() != SIGNATURE_LEN {
        return Err(SignerError::InvalidSignature(format!(
            "expected {} bytes, got {}",
            SIGNATURE_LEN,
            signature.len()
        )));
    }
    let (r, rest) = signature.split_at(32);
    let (s, _) = rest.split_at(32);
    let account = bytes_to_address(r);
    if tag(digest, &account).as_bytes() != s {
        return Err(SignerError::InvalidSignature("tag mismatch".into()));
    }
    Ok(account)
}

/// A key store that signs for any account.
pub fn test_signer_fn() -> SignerFn {
    Arc::new(|account: &Address, payload: &[u8]| Ok(test_signature(account, payload)))
}

/// A key store whose backend is unavailable.
pub fn failing_signer_fn() -> SignerFn {
    Arc::new(|_: &Address, _: &[u8]| Err(SignerError::SigningFailed("key store locked".into())))
}

/// Signer for user transactions using the test signature scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestSigner;

impl TxSigner for TestSigner {
    fn sender(&self, tx: &Transaction) -> Result<Address, SignerError> {
        match &tx.authorization {
            TxAuthorization::UserSubmitted(values) => {
                let mut sig = [0u8; SIGNATURE_LEN];
                let (r, rest) = sig.split_at_mut(32);
                let (s, _) = rest.split_at_mut(32);
                values.r.to_big_endian(r);
                values.s.to_big_endian(s);
                recover_test_signature(self.hash(tx).as_bytes(), &sig)
            }
            TxAuthorization::ConsensusSynthesized { .. } | TxAuthorization::Unsigned => Err(
                SignerError::InvalidSignature("transaction carries no user signature".into()),
            ),
        }
    }

    fn signature_values(
        &self,
        _tx: &Transaction,
        signature: &[u8],
    ) -> Result<SignatureValues, SignerError> {
        if signature.len() != SIGNATURE_LEN {
            return Err(SignerError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LEN,
                signature.len()
            )));
        }
        let (r, rest) = signature.split_at(32);
        let (s, v) = rest.split_at(32);
        let v = v.first().copied().unwrap_or_default();
        Ok(SignatureValues {
            r: U256::from_big_endian(r),
            s: U256::from_big_endian(s),
            v: U256::from(u64::from(v) + 27),
        })
    }

    fn hash(&self, tx: &Transaction) -> H256 {
        let mut unsigned = tx.clone();
        unsigned.authorization = TxAuthorization::Unsigned;
        canonical_hash(&unsigned)
    }

    fn equal(&self, other: &dyn TxSigner) -> bool {
        other.as_any().is::<TestSigner>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Seal recovery using the test signature scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestSealRecovery;

impl SealRecovery for TestSealRecovery {
    fn recover(&self, hash: &H256, signature: &[u8]) -> Result<Address, SignerError> {
        recover_test_signature(hash.as_bytes(), signature)
    }
}
