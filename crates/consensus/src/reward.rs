// Path: crates/consensus/src/reward.rs

//! Block reward minting.

use crate::abi::{decode_uint, encode_call};
use crate::engine::{FinalizedLists, GovernanceCall, RangeEngine};
use ethabi::Token;
use range_api::chain::ChainReader;
use range_api::state::{StateDatabase, TemporaryBalance};
use range_types::error::ConsensusError;
use range_types::header::Header;
use range_types::params::{BLOCK_REWARD, SYSTEM_FAUCET};
use range_types::receipt::Receipt;
use range_types::transaction::Transaction;
use range_types::U256;
use tracing::{error, trace};

impl RangeEngine {
    /// Mints the block reward through a consensus transaction.
    ///
    /// The system faucet is credited with half of the maximum amount for the
    /// duration of the call and reset to zero on every exit path. The reward
    /// amount comes from `getReward(number)`, evaluated in a reverted
    /// checkpoint; the faucet then sends exactly that amount to `reward()`.
    /// Exactly one transaction and one receipt are appended.
    pub fn process_block_rewards(
        &self,
        chain: &dyn ChainReader,
        header: &Header,
        state: &mut dyn StateDatabase,
        txs: Vec<Transaction>,
        receipts: Vec<Receipt>,
    ) -> Result<FinalizedLists, ConsensusError> {
        let contract = &self.abis().block_reward;
        let mut faucet = TemporaryBalance::new(&mut *state, SYSTEM_FAUCET, U256::MAX >> 1)?;

        let data = encode_call(contract, "getReward", &[Token::Uint(header.number.into())])
            .map_err(|e| {
                error!(target: "consensus", "Fail to prepare getReward() call: {}", e);
                e
            })?;
        let result = self
            .call_readonly(
                chain,
                header,
                &mut *faucet,
                GovernanceCall {
                    from: SYSTEM_FAUCET,
                    to: BLOCK_REWARD,
                    gas: self.config().call_gas,
                    method: "getReward",
                    data,
                },
            )
            .map_err(|e| {
                error!(target: "consensus", "Failed in getReward() call: {}", e);
                e
            })?;
        let total = decode_uint(contract, "getReward", &result.output).map_err(|e| {
            error!(target: "consensus", "Failed to unpack getReward() call: {}", e);
            e
        })?;
        trace!(target: "consensus", number = header.number, reward = %total, "Block reward");

        let data = encode_call(contract, "reward", &[]).map_err(|e| {
            error!(target: "consensus", "Fail to prepare reward() call: {}", e);
            e
        })?;
        let tx = Transaction::new_call(
            faucet.nonce(&SYSTEM_FAUCET)?,
            BLOCK_REWARD,
            total,
            self.config().xfer_gas,
            data,
        )
        .with_consensus_sender(SYSTEM_FAUCET);

        let mut lists = (txs, receipts);
        self.apply_consensus_tx(chain, header, &mut *faucet, tx, "reward", &mut lists)?;
        Ok(lists)
    }
}
