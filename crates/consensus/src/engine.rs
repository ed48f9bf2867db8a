// Path: crates/consensus/src/engine.rs

//! The finalization engine.

use crate::abi::GovernanceAbis;
use crate::signer::ConsensusSigner;
use range_api::chain::ChainReader;
use range_api::crypto::SealRecovery;
use range_api::execution::{ContractExecutor, ExecutionContext, ExecutionResult, GasPool};
use range_api::state::{StateCheckpoint, StateDatabase};
use range_api::transaction::{SignerFn, TransactionExt};
use range_telemetry::time::Timer;
use range_types::config::EngineConfig;
use range_types::error::{ConsensusError, ContractCallError};
use range_types::header::Header;
use range_types::receipt::{create_bloom, Receipt};
use range_types::transaction::{Message, Transaction};
use range_types::{Address, U256};
use std::sync::{Arc, RwLock};
use tracing::{error, warn};

/// The transaction and receipt lists of a block after finalization.
pub type FinalizedLists = (Vec<Transaction>, Vec<Receipt>);

/// A read-only governance call.
pub(crate) struct GovernanceCall {
    pub from: Address,
    pub to: Address,
    pub gas: u64,
    pub method: &'static str,
    pub data: Vec<u8>,
}

/// Governance finalization engine.
///
/// The engine holds configuration, parsed ABIs and its collaborators, but no
/// per-block state. One finalization runs against one
/// `&mut dyn StateDatabase`; independent blocks may be finalized concurrently
/// on independent state handles.
pub struct RangeEngine {
    config: EngineConfig,
    abis: GovernanceAbis,
    executor: Arc<dyn ContractExecutor>,
    recovery: Arc<dyn SealRecovery>,
    signer_fn: RwLock<Option<SignerFn>>,
}

impl std::fmt::Debug for RangeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeEngine")
            .field("config", &self.config)
            .field("authorized", &self.signer_fn().is_some())
            .finish_non_exhaustive()
    }
}

impl RangeEngine {
    /// Creates an engine, loading every governance ABI.
    pub fn new(
        config: EngineConfig,
        executor: Arc<dyn ContractExecutor>,
        recovery: Arc<dyn SealRecovery>,
    ) -> Result<Self, ConsensusError> {
        let abis = GovernanceAbis::load().map_err(|e| {
            error!(target: "consensus", "Failed to load governance ABIs: {}", e);
            e
        })?;
        Ok(Self {
            config,
            abis,
            executor,
            recovery,
            signer_fn: RwLock::new(None),
        })
    }

    /// Installs the producer key store used to sign the migration transaction.
    pub fn authorize(&self, signer_fn: SignerFn) {
        let mut slot = self
            .signer_fn
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(signer_fn);
    }

    pub(crate) fn signer_fn(&self) -> Option<SignerFn> {
        self.signer_fn
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Parsed governance ABIs.
    pub fn abis(&self) -> &GovernanceAbis {
        &self.abis
    }

    pub(crate) fn recovery(&self) -> &dyn SealRecovery {
        self.recovery.as_ref()
    }

    /// Runs every finalization step in order: masternode sync, blacklist
    /// sync, draining, block reward, migration. The first error aborts.
    pub fn finalize(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        txs: Vec<Transaction>,
        receipts: Vec<Receipt>,
    ) -> Result<FinalizedLists, ConsensusError> {
        let _timer = Timer::new("finalize");
        self.process_masternodes(chain, header, state)?;
        self.process_blacklists(chain, header, state)?;
        let (txs, receipts) = self.process_drainable(chain, header, state, txs, receipts)?;
        let (txs, receipts) = self.process_block_rewards(chain, header, state, txs, receipts)?;
        self.finalize_migration(chain, header, state, &txs)?;
        Ok((txs, receipts))
    }

    /// Executes a governance call whose state effects are always discarded.
    pub(crate) fn call_readonly(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        call: GovernanceCall,
    ) -> Result<ExecutionResult, ContractCallError> {
        let GovernanceCall {
            from,
            to,
            gas,
            method,
            data,
        } = call;
        let mut checkpoint = StateCheckpoint::new(state);
        let msg = Message::call(from, to, U256::zero(), gas, data);
        let ctx = ExecutionContext { chain, header };
        let result = self
            .executor
            .apply_message(&msg, ctx, &mut *checkpoint, &mut GasPool::new(gas))
            .map_err(|source| ContractCallError::Execute { method, source })?;
        if result.failed {
            return Err(ContractCallError::Reverted { method });
        }
        Ok(result)
    }

    /// Executes a consensus-synthesized transaction for real and appends it,
    /// with its receipt, to the block lists.
    ///
    /// A reverted execution still produces a receipt with the failed status;
    /// only an executor error aborts.
    pub(crate) fn apply_consensus_tx(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        tx: Transaction,
        method: &'static str,
        lists: &mut FinalizedLists,
    ) -> Result<ExecutionResult, ConsensusError> {
        let result = self.execute_consensus_tx(chain, header, state, &tx, method, lists.0.len())?;
        self.append_consensus_tx(chain, header, state, tx, &result, lists)?;
        Ok(result)
    }

    /// Executes a consensus-synthesized transaction as the `tx_index`-th
    /// transaction of the block without recording it.
    pub(crate) fn execute_consensus_tx(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        tx: &Transaction,
        method: &'static str,
        tx_index: usize,
    ) -> Result<ExecutionResult, ConsensusError> {
        let tx_hash = tx.hash();
        state.prepare(tx_hash, header.hash(), tx_index);

        let msg = tx.as_message(&ConsensusSigner)?;
        let ctx = ExecutionContext { chain, header };
        let result = self
            .executor
            .apply_message(&msg, ctx, state, &mut GasPool::new(msg.gas))
            .map_err(|source| {
                error!(target: "consensus", "Consensus transaction {}() failed to execute: {}", method, source);
                ContractCallError::Execute { method, source }
            })?;
        if result.failed {
            warn!(target: "consensus", tx = ?tx_hash, "Consensus transaction {}() reverted", method);
        }
        Ok(result)
    }

    /// Appends an executed transaction and its receipt. The receipt root is
    /// the current intermediate root.
    pub(crate) fn append_consensus_tx(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        tx: Transaction,
        result: &ExecutionResult,
        lists: &mut FinalizedLists,
    ) -> Result<(), ConsensusError> {
        let (txs, receipts) = lists;
        let tx_hash = tx.hash();
        let root = state.intermediate_root(chain.config().is_eip158(header.number))?;
        let mut receipt = Receipt::new(root.as_bytes(), result.failed, header.gas_used);
        receipt.tx_hash = tx_hash;
        receipt.gas_used = result.gas_used;
        receipt.logs = state.logs(&tx_hash);
        receipt.bloom = create_bloom(std::slice::from_ref(&receipt));

        txs.push(tx);
        receipts.push(receipt);
        Ok(())
    }
}
