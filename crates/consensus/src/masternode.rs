// Path: crates/consensus/src/masternode.rs

//! Masternode list synchronization.

use crate::abi::{decode_addresses, encode_call};
use crate::engine::{GovernanceCall, RangeEngine};
use crate::registry::mirror_addresses;
use range_api::chain::ChainReader;
use range_api::state::StateDatabase;
use range_types::error::ConsensusError;
use range_types::header::Header;
use range_types::params::{MASTERNODE_LIST, MASTERNODE_REGISTRY};
use tracing::{debug, error, warn};

impl RangeEngine {
    /// Rebuilds the Masternode List account from the registry's active set.
    ///
    /// The registry is queried in a reverted checkpoint. The list is a full
    /// reconciliation: addresses absent from the current active set are
    /// removed, so the result depends only on the registry state and never on
    /// what a previous block wrote.
    pub fn process_masternodes(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
    ) -> Result<(), ConsensusError> {
        const METHOD: &str = "enumerateActive";
        let registry = &self.abis().masternode_registry;

        let data = encode_call(registry, METHOD, &[]).map_err(|e| {
            error!(target: "consensus", "Fail to prepare {}() call: {}", METHOD, e);
            e
        })?;
        let result = self
            .call_readonly(
                chain,
                header,
                state,
                GovernanceCall {
                    from: MASTERNODE_REGISTRY,
                    to: MASTERNODE_REGISTRY,
                    gas: self.config().unlimited_gas,
                    method: METHOD,
                    data,
                },
            )
            .map_err(|e| {
                error!(target: "consensus", "Failed in {}() call: {}", METHOD, e);
                e
            })?;

        if result.gas_used > self.config().call_gas {
            warn!(
                target: "consensus",
                gas_used = result.gas_used,
                call_gas = self.config().call_gas,
                "MasternodeRegistry::{}() took excessive gas", METHOD
            );
        }

        let active = decode_addresses(registry, METHOD, &result.output).map_err(|e| {
            error!(target: "consensus", "Failed to unpack {}() call: {}", METHOD, e);
            e
        })?;

        let delta = mirror_addresses(state, &MASTERNODE_LIST, &active, |mn| {
            debug!(target: "consensus", masternode = ?mn, "Masternode is active");
        })?;
        debug!(
            target: "consensus",
            active = active.len(),
            added = delta.added,
            removed = delta.removed,
            "Masternode list synchronized"
        );
        Ok(())
    }
}
