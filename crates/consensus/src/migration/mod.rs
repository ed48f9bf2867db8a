// Path: crates/consensus/src/migration/mod.rs

//! The one-time Gen2 to Gen3 migration.
//!
//! The migration block is produced by the migration signer with the
//! migration contract as coinbase. Its first transaction installs the legacy
//! snapshot through `setSnapshot`; finalization then funds the migration
//! contract with the snapshot total so owners can claim their balances.

pub mod legacy_address;
pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotItem, SnapshotParams};

use crate::abi::{decode_uint, encode_call, GovernanceAbis};
use crate::engine::{GovernanceCall, RangeEngine};
use ethabi::Token;
use range_api::chain::ChainReader;
use range_api::state::StateDatabase;
use range_api::transaction::{TransactionExt, TxSigner};
use range_types::codec::to_bytes_canonical;
use range_types::error::{ConsensusError, MigrationError, SignerError};
use range_types::header::{Block, Header, MigrationExtra};
use range_types::params::{protocol_version, ENGINE_TAG, MIGRATION_CONTRACT, SYSTEM_FAUCET};
use range_types::transaction::Transaction;
use range_types::U256;
use std::path::Path;
use tracing::{error, info, warn};

/// Transactions in the migration block: the snapshot installation and the
/// block reward.
pub const MIGRATION_TX_COUNT: usize = 2;

/// Encodes `setSnapshot(owners, amounts, blacklist)`.
pub fn migration_call_data(
    abis: &GovernanceAbis,
    params: &SnapshotParams,
) -> Result<Vec<u8>, ConsensusError> {
    let owners = params.owners.iter().copied().map(Token::Address).collect();
    let amounts = params.amounts.iter().copied().map(Token::Uint).collect();
    let blacklist = params.blacklist.iter().copied().map(Token::Address).collect();
    let data = encode_call(
        &abis.migration,
        "setSnapshot",
        &[
            Token::Array(owners),
            Token::Array(amounts),
            Token::Array(blacklist),
        ],
    )?;
    Ok(data)
}

/// Checks a migration block against an already parsed snapshot.
pub fn validate_migration_snapshot(
    abis: &GovernanceAbis,
    block: &Block,
    snapshot: &Snapshot,
) -> Result<(), ConsensusError> {
    let params = SnapshotParams::from_snapshot(snapshot)?;
    let call_data = migration_call_data(abis, &params)?;

    let txs = &block.transactions;
    let wrong_count = MigrationError::WrongTxCount {
        expected: MIGRATION_TX_COUNT,
        got: txs.len(),
    };
    if txs.len() != MIGRATION_TX_COUNT {
        return Err(wrong_count.into());
    }
    let first = txs.first().ok_or(wrong_count)?;
    if first.data() != call_data.as_slice() {
        return Err(MigrationError::DataMismatch.into());
    }
    Ok(())
}

/// Checks that the first transaction of `block` carries exactly the
/// `setSnapshot` call data re-derived from the snapshot at `path`.
pub fn validate_migration(
    abis: &GovernanceAbis,
    block: &Block,
    path: impl AsRef<Path>,
) -> Result<(), ConsensusError> {
    let snapshot = Snapshot::from_file(path)?;
    validate_migration_snapshot(abis, block, &snapshot)
}

impl RangeEngine {
    /// Funds the migration contract with the snapshot total.
    ///
    /// Does nothing unless `header` is the migration block.
    pub fn finalize_migration(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        txs: &[Transaction],
    ) -> Result<(), ConsensusError> {
        if !header.is_gen2_migration() {
            return Ok(());
        }
        if txs.len() != MIGRATION_TX_COUNT {
            error!(target: "consensus", count = txs.len(), "Wrong number of migration block txs");
            return Err(MigrationError::WrongTxCount {
                expected: MIGRATION_TX_COUNT,
                got: txs.len(),
            }
            .into());
        }

        let contract = &self.abis().migration;
        let data = encode_call(contract, "totalAmount", &[]).map_err(|e| {
            error!(target: "consensus", "Fail to prepare totalAmount() call: {}", e);
            e
        })?;
        let result = self
            .call_readonly(
                chain,
                header,
                state,
                GovernanceCall {
                    from: SYSTEM_FAUCET,
                    to: MIGRATION_CONTRACT,
                    gas: self.config().call_gas,
                    method: "totalAmount",
                    data,
                },
            )
            .map_err(|e| {
                error!(target: "consensus", "Failed in totalAmount() call: {}", e);
                e
            })?;
        let total = decode_uint(contract, "totalAmount", &result.output).map_err(|e| {
            error!(target: "consensus", "Failed to unpack totalAmount() call: {}", e);
            e
        })?;

        state.set_balance(&MIGRATION_CONTRACT, total)?;
        warn!(target: "consensus", balance = %total, "Setting Gen2 migration balance");
        Ok(())
    }

    /// Builds and signs the migration transaction for `snapshot`, and writes
    /// the migration gas limit and extra data into `header`.
    ///
    /// The header is only modified when the transaction is built
    /// successfully.
    pub fn migration_tx(
        &self,
        signer: &dyn TxSigner,
        header: &mut Header,
        snapshot: &Snapshot,
    ) -> Result<Transaction, ConsensusError> {
        let signer_fn = self
            .signer_fn()
            .ok_or(SignerError::NotConfigured("signer function"))?;
        let account = self
            .config()
            .migration_signer
            .ok_or(SignerError::NotConfigured("migration signer"))?;

        let params = SnapshotParams::from_snapshot(snapshot).map_err(|e| {
            error!(target: "consensus", "Failed to parse migration snapshot: {}", e);
            e
        })?;
        let data = migration_call_data(self.abis(), &params)?;
        let gas_limit = params.gas_limit();

        let tx = Transaction::new_call(0, MIGRATION_CONTRACT, U256::zero(), gas_limit, data);
        let digest = signer.hash(&tx);
        let signature = signer_fn(&account, digest.as_bytes()).map_err(|e| {
            error!(target: "consensus", "Failed to sign migration transaction: {}", e);
            e
        })?;
        let tx = tx.with_signature(signer, &signature)?;

        header.gas_limit = gas_limit;
        header.extra = to_bytes_canonical(&MigrationExtra {
            version: protocol_version(),
            engine: ENGINE_TAG.as_bytes().to_vec(),
            snapshot_hash: snapshot.hash.as_bytes().to_vec(),
        });
        info!(
            target: "consensus",
            owners = params.owners.len(),
            blacklisted = params.blacklist.len(),
            gas_limit,
            "Built Gen2 migration transaction"
        );
        Ok(tx)
    }

    /// [`RangeEngine::migration_tx`] for the snapshot document at `path`.
    pub fn migration_tx_from_file(
        &self,
        signer: &dyn TxSigner,
        header: &mut Header,
        path: impl AsRef<Path>,
    ) -> Result<Transaction, ConsensusError> {
        let snapshot = Snapshot::from_file(path)?;
        self.migration_tx(signer, header, &snapshot)
    }

    /// [`validate_migration`] with the engine's ABIs.
    pub fn validate_migration(
        &self,
        block: &Block,
        path: impl AsRef<Path>,
    ) -> Result<(), ConsensusError> {
        validate_migration(self.abis(), block, path)
    }
}
