// Path: crates/types/src/error/mod.rs
//! Core error types for the Range kernel.

use crate::primitives::{Address, H256};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised by a state database backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// An error occurred in the state backend.
    #[error("State backend error: {0}")]
    Backend(String),
    /// The requested state root is not known or has been pruned.
    #[error("Unknown state root: {0:?}")]
    UnknownRoot(H256),
    /// Stored data could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ErrorCode for StateError {
    fn code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "STATE_BACKEND_ERROR",
            Self::UnknownRoot(_) => "STATE_UNKNOWN_ROOT",
            Self::Decode(_) => "STATE_DECODE_ERROR",
        }
    }
}

/// Errors that abort message execution before any result is produced.
///
/// A reverted call is not an error; it is reported through the `failed`
/// flag of the execution result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The gas pool cannot cover the message's gas limit.
    #[error("Gas limit reached: requested {requested}, available {available}")]
    GasLimitReached {
        /// Gas left in the pool.
        available: u64,
        /// Gas the message asked for.
        requested: u64,
    },
    /// The sender cannot cover the transferred value.
    #[error("Insufficient balance for transfer from {address:?}")]
    InsufficientBalance {
        /// The sender.
        address: Address,
    },
    /// The message nonce does not match the sender's account nonce.
    #[error("Nonce mismatch: expected {expected}, got {got}")]
    NonceMismatch {
        /// Account nonce in state.
        expected: u64,
        /// Nonce carried by the message.
        got: u64,
    },
    /// The executor does not support the requested operation.
    #[error("Unsupported execution: {0}")]
    Unsupported(String),
    /// The state backend failed during execution.
    #[error("State error during execution: {0}")]
    State(#[from] StateError),
}

impl ErrorCode for ExecutionError {
    fn code(&self) -> &'static str {
        match self {
            Self::GasLimitReached { .. } => "EXEC_GAS_LIMIT_REACHED",
            Self::InsufficientBalance { .. } => "EXEC_INSUFFICIENT_BALANCE",
            Self::NonceMismatch { .. } => "EXEC_NONCE_MISMATCH",
            Self::Unsupported(_) => "EXEC_UNSUPPORTED",
            Self::State(_) => "EXEC_STATE_ERROR",
        }
    }
}

/// Failure of a governance contract call at one of its three stages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractCallError {
    /// Call data could not be ABI-encoded.
    #[error("Failed to encode {method}() call: {reason}")]
    Encode {
        /// Contract method name.
        method: &'static str,
        /// Encoder message.
        reason: String,
    },
    /// The executor refused to run the call.
    #[error("{method}() execution failed: {source}")]
    Execute {
        /// Contract method name.
        method: &'static str,
        /// Underlying execution error.
        #[source]
        source: ExecutionError,
    },
    /// The call ran but reverted.
    #[error("{method}() reverted")]
    Reverted {
        /// Contract method name.
        method: &'static str,
    },
    /// Return data could not be ABI-decoded.
    #[error("Failed to decode {method}() output: {reason}")]
    Decode {
        /// Contract method name.
        method: &'static str,
        /// Decoder message.
        reason: String,
    },
}

impl ErrorCode for ContractCallError {
    fn code(&self) -> &'static str {
        match self {
            Self::Encode { .. } => "CALL_ENCODE_FAILED",
            Self::Execute { .. } => "CALL_EXECUTE_FAILED",
            Self::Reverted { .. } => "CALL_REVERTED",
            Self::Decode { .. } => "CALL_DECODE_FAILED",
        }
    }
}

/// Errors from transaction signers and the producer key store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// A consensus-only operation was given a user transaction.
    #[error("Transaction is not a consensus transaction")]
    NotConsensusTransaction,
    /// The signer does not implement the requested operation.
    #[error("Operation not supported by this signer")]
    NotSupported,
    /// A required signing component has not been configured.
    #[error("Signer not configured: {0}")]
    NotConfigured(&'static str),
    /// The key store failed to produce a signature.
    #[error("Signing failed: {0}")]
    SigningFailed(String),
    /// A signature is malformed or does not recover.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

impl ErrorCode for SignerError {
    fn code(&self) -> &'static str {
        match self {
            Self::NotConsensusTransaction => "SIGNER_NOT_CONSENSUS_TX",
            Self::NotSupported => "SIGNER_NOT_SUPPORTED",
            Self::NotConfigured(_) => "SIGNER_NOT_CONFIGURED",
            Self::SigningFailed(_) => "SIGNER_SIGNING_FAILED",
            Self::InvalidSignature(_) => "SIGNER_INVALID_SIGNATURE",
        }
    }
}

/// Errors specific to the Gen2 migration block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// The migration block must hold exactly the expected number of transactions.
    #[error("Migration block must contain {expected} transactions, found {got}")]
    WrongTxCount {
        /// Required transaction count.
        expected: usize,
        /// Actual transaction count.
        got: usize,
    },
    /// The snapshot document is malformed.
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
    /// A legacy address could not be decoded.
    #[error("Invalid legacy address {address}: {reason}")]
    AddressDecode {
        /// The offending Base58 string.
        address: String,
        /// What went wrong.
        reason: String,
    },
    /// The migration transaction payload differs from the re-derived call data.
    #[error("Migration payload does not match the snapshot")]
    DataMismatch,
    /// The snapshot file could not be read.
    #[error("Snapshot I/O error: {0}")]
    Io(String),
}

impl ErrorCode for MigrationError {
    fn code(&self) -> &'static str {
        match self {
            Self::WrongTxCount { .. } => "MIGRATION_WRONG_TX_COUNT",
            Self::Snapshot(_) => "MIGRATION_INVALID_SNAPSHOT",
            Self::AddressDecode { .. } => "MIGRATION_ADDRESS_DECODE",
            Self::DataMismatch => "MIGRATION_DATA_MISMATCH",
            Self::Io(_) => "MIGRATION_IO",
        }
    }
}

/// The top-level error returned by every engine entry point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    /// A governance contract call failed.
    #[error("Contract call failed: {0}")]
    ContractCall(#[from] ContractCallError),
    /// Signing or sender resolution failed.
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),
    /// Migration integrity check failed.
    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
    /// The block producer is blacklisted in the parent state.
    #[error("Coinbase {0:?} is blacklisted")]
    BlacklistedCoinbase(Address),
    /// The header seal was not produced by the coinbase.
    #[error("Invalid seal: expected {expected:?}, recovered {recovered:?}")]
    InvalidSeal {
        /// The header coinbase.
        expected: Address,
        /// The address recovered from the seal.
        recovered: Address,
    },
    /// The header carries no seal.
    #[error("Header is missing its signature")]
    MissingSignature,
    /// The state backend failed.
    #[error("State error: {0}")]
    State(#[from] StateError),
    /// A governance ABI document failed to load.
    #[error("ABI error: {0}")]
    Abi(String),
}

impl ErrorCode for ConsensusError {
    fn code(&self) -> &'static str {
        match self {
            Self::ContractCall(e) => e.code(),
            Self::Signer(e) => e.code(),
            Self::Migration(e) => e.code(),
            Self::BlacklistedCoinbase(_) => "CONSENSUS_BLACKLISTED_COINBASE",
            Self::InvalidSeal { .. } => "CONSENSUS_INVALID_SEAL",
            Self::MissingSignature => "CONSENSUS_MISSING_SIGNATURE",
            Self::State(e) => e.code(),
            Self::Abi(_) => "CONSENSUS_ABI_ERROR",
        }
    }
}
