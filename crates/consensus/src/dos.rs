// Path: crates/consensus/src/dos.rs

//! Stake-based block production throttle.

use crate::engine::RangeEngine;
use range_api::chain::ChainReader;
use range_types::error::ConsensusError;
use range_types::header::Header;

impl RangeEngine {
    /// Accepts every header.
    ///
    /// A throttle keyed by (coinbase, parent hash) used to limit how often a
    /// producer may extend the same parent. It rejected legitimate blocks
    /// around chain splits and is disabled until a fork-aware rule exists.
    pub fn check_dos(
        &self,
        _chain: &dyn ChainReader,
        _header: &Header,
        _parent: &Header,
    ) -> Result<(), ConsensusError> {
        Ok(())
    }
}
