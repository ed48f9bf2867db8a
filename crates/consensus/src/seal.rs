// Path: crates/consensus/src/seal.rs

//! Header seal verification.

use crate::engine::RangeEngine;
use range_api::state::StateDatabase;
use range_api::transfer::is_blacklisted;
use range_types::error::{ConsensusError, SignerError};
use range_types::header::Header;
use range_types::H256;
use tracing::warn;

/// The digest a block producer signs: Keccak-256 of the canonical header
/// encoding with the signature cleared.
pub fn signature_hash(header: &Header) -> H256 {
    header.seal_hash()
}

impl RangeEngine {
    /// Checks that `header` is sealed by its coinbase, or by the configured
    /// migration signer on the migration block, and that the coinbase is not
    /// blacklisted in `parent_state`.
    pub fn verify_seal(
        &self,
        header: &Header,
        parent_state: &dyn StateDatabase,
    ) -> Result<(), ConsensusError> {
        if header.signature.is_empty() {
            return Err(ConsensusError::MissingSignature);
        }
        let recovered = self
            .recovery()
            .recover(&signature_hash(header), &header.signature)?;

        let expected = if header.is_gen2_migration() {
            self.config()
                .migration_signer
                .ok_or(SignerError::NotConfigured("migration signer"))?
        } else {
            header.coinbase
        };
        if recovered != expected {
            return Err(ConsensusError::InvalidSeal {
                expected,
                recovered,
            });
        }

        if is_blacklisted(parent_state, &header.coinbase)? {
            warn!(target: "consensus", coinbase = ?header.coinbase, number = header.number, "Rejecting block from blacklisted coinbase");
            return Err(ConsensusError::BlacklistedCoinbase(header.coinbase));
        }
        Ok(())
    }
}
