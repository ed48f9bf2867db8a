// Path: crates/consensus/src/blacklist.rs

//! Blacklist and whitelist enforcement.
//!
//! The blacklist registry decides which accounts are frozen and which frozen
//! accounts are to be drained. The engine mirrors the frozen set into the
//! Blacklist account, keeps the Whitelist account equal to the fixed set of
//! system contracts, and moves the whole balance of every drainable account
//! to the Treasury.

use crate::abi::{decode_addresses, encode_call};
use crate::engine::{FinalizedLists, GovernanceCall, RangeEngine};
use crate::registry::mirror_addresses;
use range_api::chain::ChainReader;
use range_api::state::{StateDatabase, TemporaryBalance};
use range_api::transfer::{is_blacklisted, is_whitelisted};
use range_types::error::ConsensusError;
use range_types::header::Header;
use range_types::params::{
    BLACKLIST, BLACKLIST_REGISTRY, SYSTEM_CONTRACTS, SYSTEM_FAUCET, TREASURY, WHITELIST,
};
use range_types::receipt::Receipt;
use range_types::transaction::Transaction;
use range_types::{Address, U256};
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

impl RangeEngine {
    fn query_registry(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        method: &'static str,
    ) -> Result<Vec<Address>, ConsensusError> {
        let registry = &self.abis().blacklist_registry;
        let data = encode_call(registry, method, &[]).map_err(|e| {
            error!(target: "consensus", "Fail to prepare {}() call: {}", method, e);
            e
        })?;
        let result = self
            .call_readonly(
                chain,
                header,
                state,
                GovernanceCall {
                    from: BLACKLIST_REGISTRY,
                    to: BLACKLIST_REGISTRY,
                    gas: self.config().unlimited_gas,
                    method,
                    data,
                },
            )
            .map_err(|e| {
                error!(target: "consensus", "Failed in {}() call: {}", method, e);
                e
            })?;
        if result.gas_used > self.config().call_gas {
            warn!(
                target: "consensus",
                gas_used = result.gas_used,
                call_gas = self.config().call_gas,
                "BlacklistRegistry::{}() took excessive gas", method
            );
        }
        let addresses = decode_addresses(registry, method, &result.output).map_err(|e| {
            error!(target: "consensus", "Failed to unpack {}() call: {}", method, e);
            e
        })?;
        Ok(addresses)
    }

    /// Mirrors the registry's blocked set into the Blacklist account and the
    /// system contract set into the Whitelist account. Both are full
    /// reconciliations.
    pub fn process_blacklists(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
    ) -> Result<(), ConsensusError> {
        let blocked = self.query_registry(chain, header, state, "enumerateBlocked")?;
        let blacklist = mirror_addresses(state, &BLACKLIST, &blocked, |addr| {
            info!(target: "consensus", address = ?addr, "Address blacklisted");
        })?;
        let whitelist = mirror_addresses(state, &WHITELIST, SYSTEM_CONTRACTS.iter(), |_| {})?;
        debug!(
            target: "consensus",
            blacklisted = blocked.len(),
            unblocked = blacklist.removed,
            whitelist_added = whitelist.added,
            "Blacklist synchronized"
        );
        Ok(())
    }

    /// Drains every drainable account to the Treasury.
    ///
    /// For each address the registry reports as drainable that is blacklisted,
    /// not whitelisted and holds a balance, the balance is debited directly
    /// and a consensus transaction from the system faucet credits the same
    /// amount to the Treasury. If that transfer reverts, the debit is undone
    /// before the receipt is taken, so value is never destroyed. The faucet
    /// is funded only for the duration of this call. Returns the lists
    /// unchanged when nothing is drained.
    pub fn process_drainable(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        txs: Vec<Transaction>,
        receipts: Vec<Receipt>,
    ) -> Result<FinalizedLists, ConsensusError> {
        let mut faucet = TemporaryBalance::new(&mut *state, SYSTEM_FAUCET, U256::MAX >> 1)?;
        let drainable = self.query_registry(chain, header, &mut *faucet, "enumerateDrainable")?;

        let mut lists = (txs, receipts);
        let mut seen = HashSet::with_capacity(drainable.len());
        for address in drainable {
            if !seen.insert(address) {
                continue;
            }
            if !is_blacklisted(&*faucet, &address)? || is_whitelisted(&*faucet, &address)? {
                continue;
            }
            let balance = faucet.balance(&address)?;
            if balance.is_zero() {
                continue;
            }

            faucet.set_balance(&address, U256::zero())?;
            let tx = Transaction::new_call(
                faucet.nonce(&SYSTEM_FAUCET)?,
                TREASURY,
                balance,
                self.config().xfer_gas,
                Vec::new(),
            )
            .with_consensus_sender(SYSTEM_FAUCET);
            let result =
                self.execute_consensus_tx(chain, header, &mut *faucet, &tx, "drain", lists.0.len())?;
            if result.failed {
                // The Treasury never received the value; the account keeps it.
                faucet.set_balance(&address, balance)?;
                warn!(target: "consensus", address = ?address, amount = %balance, "Drain transfer reverted, balance restored");
            } else {
                info!(target: "consensus", address = ?address, amount = %balance, "Drained blacklisted balance");
            }
            self.append_consensus_tx(chain, header, &mut *faucet, tx, &result, &mut lists)?;
        }
        Ok(lists)
    }
}
