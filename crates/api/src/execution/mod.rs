// Path: crates/api/src/execution/mod.rs
//! The contract execution engine interface.

use crate::chain::ChainReader;
use crate::state::StateDatabase;
use range_types::error::ExecutionError;
use range_types::header::Header;
use range_types::transaction::Message;

/// The block-level environment a message executes in.
#[derive(Clone, Copy)]
pub struct ExecutionContext<'a> {
    /// Chain access for block-hash lookups and rule switches.
    pub chain: &'a dyn ChainReader,
    /// The header of the block being finalized.
    pub header: &'a Header,
}

/// The outcome of a message that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionResult {
    /// Return data, or revert data when `failed`.
    pub output: Vec<u8>,
    /// Gas consumed.
    pub gas_used: u64,
    /// Whether the call reverted. Value transfers and storage writes of a
    /// reverted call are rolled back by the executor; the nonce bump is not.
    pub failed: bool,
}

/// Tracks the gas available to the messages of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasPool(u64);

impl GasPool {
    /// Creates a pool holding `gas`.
    pub fn new(gas: u64) -> Self {
        Self(gas)
    }

    /// Gas left in the pool.
    pub fn gas(&self) -> u64 {
        self.0
    }

    /// Returns unused gas to the pool.
    pub fn add_gas(&mut self, gas: u64) {
        self.0 = self.0.saturating_add(gas);
    }

    /// Reserves `gas` from the pool.
    pub fn sub_gas(&mut self, gas: u64) -> Result<(), ExecutionError> {
        match self.0.checked_sub(gas) {
            Some(rest) => {
                self.0 = rest;
                Ok(())
            }
            None => Err(ExecutionError::GasLimitReached {
                available: self.0,
                requested: gas,
            }),
        }
    }
}

/// A contract execution engine.
///
/// `apply_message` runs `msg` against `state`, mutating it. Callers that want
/// a read-only call wrap `state` in a [`crate::state::StateCheckpoint`].
pub trait ContractExecutor: Send + Sync {
    /// Executes `msg` in `ctx`, drawing gas from `gas_pool`.
    fn apply_message(
        &self,
        msg: &Message,
        ctx: ExecutionContext<'_>,
        state: &mut dyn StateDatabase,
        gas_pool: &mut GasPool,
    ) -> Result<ExecutionResult, ExecutionError>;
}
