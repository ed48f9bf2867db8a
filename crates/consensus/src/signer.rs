// Path: crates/consensus/src/signer.rs

//! The signer for engine-synthesized transactions.

use range_api::transaction::TxSigner;
use range_types::error::SignerError;
use range_types::transaction::{SignatureValues, Transaction, TxAuthorization};
use range_types::{Address, H256};
use std::any::Any;

/// Resolves the sender of consensus-synthesized transactions.
///
/// The sender is taken from the transaction's authorization; no signature is
/// ever recovered. User transactions are rejected, so this signer cannot be
/// used to execute a transaction under an asserted identity unless the
/// engine built it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsensusSigner;

impl TxSigner for ConsensusSigner {
    fn sender(&self, tx: &Transaction) -> Result<Address, SignerError> {
        match tx.authorization {
            TxAuthorization::ConsensusSynthesized { sender } => Ok(sender),
            TxAuthorization::UserSubmitted(_) | TxAuthorization::Unsigned => {
                Err(SignerError::NotConsensusTransaction)
            }
        }
    }

    fn signature_values(
        &self,
        _tx: &Transaction,
        _signature: &[u8],
    ) -> Result<SignatureValues, SignerError> {
        Err(SignerError::NotSupported)
    }

    fn hash(&self, _tx: &Transaction) -> H256 {
        H256::zero()
    }

    fn equal(&self, other: &dyn TxSigner) -> bool {
        other.as_any().is::<ConsensusSigner>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use range_api::transaction::TransactionExt;
    use range_types::params::SYSTEM_FAUCET;
    use range_types::U256;

    fn sample() -> Transaction {
        Transaction::new_call(4, Address::repeat_byte(1), U256::one(), 50_000, vec![7])
    }

    #[test]
    fn sender_is_asserted_consensus_sender() {
        let tx = sample().with_consensus_sender(SYSTEM_FAUCET);
        assert_eq!(ConsensusSigner.sender(&tx).unwrap(), SYSTEM_FAUCET);

        let msg = tx.as_message(&ConsensusSigner).unwrap();
        assert_eq!(msg.from, SYSTEM_FAUCET);
        assert_eq!(msg.nonce, 4);
    }

    #[test]
    fn user_transactions_are_rejected() {
        let unsigned = sample();
        assert_eq!(
            ConsensusSigner.sender(&unsigned),
            Err(SignerError::NotConsensusTransaction)
        );
        let signed = sample().with_signature_values(SignatureValues::default());
        assert_eq!(
            signed.as_message(&ConsensusSigner),
            Err(SignerError::NotConsensusTransaction)
        );
    }

    #[test]
    fn signing_is_not_supported() {
        assert_eq!(
            ConsensusSigner.signature_values(&sample(), &[0u8; 65]),
            Err(SignerError::NotSupported)
        );
        assert_eq!(
            sample().with_signature(&ConsensusSigner, &[0u8; 65]),
            Err(SignerError::NotSupported)
        );
        assert_eq!(ConsensusSigner.hash(&sample()), H256::zero());
    }

    #[test]
    fn equality_is_by_type() {
        #[derive(Debug)]
        struct Other;
        impl TxSigner for Other {
            fn sender(&self, _: &Transaction) -> Result<Address, SignerError> {
                Err(SignerError::NotSupported)
            }
            fn signature_values(
                &self,
                _: &Transaction,
                _: &[u8],
            ) -> Result<SignatureValues, SignerError> {
                Err(SignerError::NotSupported)
            }
            fn hash(&self, _: &Transaction) -> H256 {
                H256::zero()
            }
            fn equal(&self, other: &dyn TxSigner) -> bool {
                other.as_any().is::<Other>()
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        assert!(ConsensusSigner.equal(&ConsensusSigner));
        assert!(!ConsensusSigner.equal(&Other));
        assert!(!Other.equal(&ConsensusSigner));
    }
}
