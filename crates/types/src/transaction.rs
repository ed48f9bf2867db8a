// Path: crates/types/src/transaction.rs

//! Transactions and execution messages.
//!
//! A transaction is either submitted by a user (and carries signature values)
//! or synthesized by the engine during finalization (and carries the sender
//! address directly). The distinction is a closed enum so that every consumer
//! must handle both cases explicitly.

use crate::codec::canonical_hash;
use crate::primitives::{Address, H256, U256};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Recovered ECDSA signature components.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, Encode, Decode)]
pub struct SignatureValues {
    /// The `r` component.
    pub r: U256,
    /// The `s` component.
    pub s: U256,
    /// The recovery id, possibly chain-id adjusted.
    pub v: U256,
}

/// How a transaction is authorized.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub enum TxAuthorization {
    /// Not yet signed.
    Unsigned,
    /// Signed by an external account.
    UserSubmitted(SignatureValues),
    /// Constructed by the engine; the sender is asserted, not recovered.
    ConsensusSynthesized {
        /// The account the engine executes the transaction as.
        sender: Address,
    },
}

/// A chain transaction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Transaction {
    /// Sender nonce.
    pub nonce: u64,
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    /// Transferred amount.
    pub value: U256,
    /// Gas limit.
    pub gas: u64,
    /// Gas price.
    pub gas_price: U256,
    /// Call data.
    pub data: Vec<u8>,
    /// Authorization.
    pub authorization: TxAuthorization,
}

impl Transaction {
    /// Creates an unsigned call transaction with a zero gas price.
    pub fn new_call(nonce: u64, to: Address, value: U256, gas: u64, data: Vec<u8>) -> Self {
        Self {
            nonce,
            to: Some(to),
            value,
            gas,
            gas_price: U256::zero(),
            data,
            authorization: TxAuthorization::Unsigned,
        }
    }

    /// Marks this transaction as engine-synthesized on behalf of `sender`.
    pub fn with_consensus_sender(mut self, sender: Address) -> Self {
        self.authorization = TxAuthorization::ConsensusSynthesized { sender };
        self
    }

    /// Attaches user signature values.
    pub fn with_signature_values(mut self, values: SignatureValues) -> Self {
        self.authorization = TxAuthorization::UserSubmitted(values);
        self
    }

    /// The asserted sender of an engine-synthesized transaction.
    pub fn consensus_sender(&self) -> Option<Address> {
        match self.authorization {
            TxAuthorization::ConsensusSynthesized { sender } => Some(sender),
            TxAuthorization::UserSubmitted(_) | TxAuthorization::Unsigned => None,
        }
    }

    /// The call payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Transaction hash: Keccak-256 of the canonical encoding.
    pub fn hash(&self) -> H256 {
        canonical_hash(self)
    }
}

/// A transaction reduced to what the execution engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Resolved sender.
    pub from: Address,
    /// Recipient; `None` for contract creation.
    pub to: Option<Address>,
    /// Sender nonce.
    pub nonce: u64,
    /// Transferred amount.
    pub value: U256,
    /// Gas limit.
    pub gas: u64,
    /// Gas price.
    pub gas_price: U256,
    /// Call data.
    pub data: Vec<u8>,
    /// Whether the executor must verify `nonce` against state.
    pub check_nonce: bool,
}

impl Message {
    /// A read-only style call: zero price, no nonce check.
    pub fn call(from: Address, to: Address, value: U256, gas: u64, data: Vec<u8>) -> Self {
        Self {
            from,
            to: Some(to),
            nonce: 0,
            value,
            gas,
            gas_price: U256::zero(),
            data,
            check_nonce: false,
        }
    }

    /// Builds a message from a transaction and an already resolved sender.
    pub fn from_transaction(tx: &Transaction, from: Address) -> Self {
        Self {
            from,
            to: tx.to,
            nonce: tx.nonce,
            value: tx.value,
            gas: tx.gas,
            gas_price: tx.gas_price,
            data: tx.data.clone(),
            check_nonce: true,
        }
    }
}
