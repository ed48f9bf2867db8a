// Path: crates/api/src/transaction/mod.rs
//! Transaction signers and the producer key store.

use range_types::error::SignerError;
use range_types::transaction::{Message, SignatureValues, Transaction};
use range_types::{Address, H256};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Resolves senders and signing digests for transactions.
pub trait TxSigner: Send + Sync + Debug {
    /// The sender of `tx`.
    fn sender(&self, tx: &Transaction) -> Result<Address, SignerError>;

    /// Splits a raw signature into the values stored on a transaction.
    fn signature_values(
        &self,
        tx: &Transaction,
        signature: &[u8],
    ) -> Result<SignatureValues, SignerError>;

    /// The digest a key signs to authorize `tx`.
    fn hash(&self, tx: &Transaction) -> H256;

    /// Whether `other` applies the same signing rules.
    fn equal(&self, other: &dyn TxSigner) -> bool;

    /// Upcast for [`TxSigner::equal`] implementations.
    fn as_any(&self) -> &dyn Any;
}

/// The producer key store: signs `payload` with the key of `account`.
pub type SignerFn = Arc<dyn Fn(&Address, &[u8]) -> Result<Vec<u8>, SignerError> + Send + Sync>;

/// Signer-dependent conversions on [`Transaction`].
pub trait TransactionExt: Sized {
    /// Resolves the sender through `signer` and builds an execution message.
    fn as_message(&self, signer: &dyn TxSigner) -> Result<Message, SignerError>;

    /// Attaches a raw `signature` interpreted by `signer`.
    fn with_signature(self, signer: &dyn TxSigner, signature: &[u8]) -> Result<Self, SignerError>;
}

impl TransactionExt for Transaction {
    fn as_message(&self, signer: &dyn TxSigner) -> Result<Message, SignerError> {
        let from = signer.sender(self)?;
        Ok(Message::from_transaction(self, from))
    }

    fn with_signature(self, signer: &dyn TxSigner, signature: &[u8]) -> Result<Self, SignerError> {
        let values = signer.signature_values(&self, signature)?;
        Ok(self.with_signature_values(values))
    }
}
