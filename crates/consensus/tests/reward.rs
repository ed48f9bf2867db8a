// Path: crates/consensus/tests/reward.rs

mod common;

use common::{Harness, PRODUCER};
use range_api::chain::ChainConfig;
use range_api::state::StateDatabase;
use range_test_utils::governance::{coin, default_block_reward};
use range_test_utils::{GovernanceEmulator, TestChain};
use range_types::config::EngineConfig;
use range_types::error::{ConsensusError, ContractCallError};
use range_types::params::{BLOCK_REWARD, SYSTEM_FAUCET, TREASURY};
use range_types::primitives::keccak256;
use range_types::receipt::Receipt;
use range_types::transaction::Transaction;
use range_types::{Address, Bloom, U256};

fn reward(
    h: &mut Harness,
    txs: Vec<Transaction>,
    receipts: Vec<Receipt>,
) -> Result<range_consensus::FinalizedLists, ConsensusError> {
    h.engine
        .process_block_rewards(&h.chain, &h.header, &mut h.state, txs, receipts)
}

#[test]
fn each_call_appends_one_transaction_and_receipt() {
    let mut h = Harness::new();
    let mut txs = Vec::new();
    let mut receipts = Vec::new();
    for round in 0..5u64 {
        assert_eq!(h.balance(&SYSTEM_FAUCET), U256::zero());
        let (next_txs, next_receipts) = reward(&mut h, txs, receipts).unwrap();
        txs = next_txs;
        receipts = next_receipts;
        assert_eq!(txs.len() as u64, round + 1);
        assert_eq!(receipts.len(), txs.len());
        assert_eq!(h.balance(&SYSTEM_FAUCET), U256::zero());
    }
    for (nonce, tx) in txs.iter().enumerate() {
        assert_eq!(tx.nonce, nonce as u64);
        assert_eq!(tx.consensus_sender(), Some(SYSTEM_FAUCET));
        assert_eq!(tx.to, Some(BLOCK_REWARD));
        assert_eq!(tx.value, default_block_reward());
    }
    assert_eq!(h.balance(&TREASURY), default_block_reward() * 5u64);
}

#[test]
fn receipt_carries_reward_logs_and_bloom() {
    let mut h = Harness::new();
    h.header.gas_used = 123_456;
    let (txs, receipts) = reward(&mut h, Vec::new(), Vec::new()).unwrap();
    let (tx, receipt) = (&txs[0], &receipts[0]);

    assert!(!receipt.failed);
    assert_eq!(receipt.tx_hash, tx.hash());
    assert_eq!(receipt.cumulative_gas_used, 123_456);
    assert_eq!(receipt.post_state.len(), 32);
    assert_eq!(receipt.logs.len(), 1);
    let log = &receipt.logs[0];
    assert_eq!(log.address, BLOCK_REWARD);
    assert_eq!(log.topics, vec![keccak256(b"Reward(uint256)")]);
    assert_eq!(log.tx_hash, tx.hash());
    assert_eq!(log.block_hash, h.header.hash());
    assert_ne!(receipt.bloom, Bloom::default());
}

#[test]
fn existing_lists_are_preserved() {
    let mut h = Harness::new();
    let (txs, receipts) = reward(&mut h, Vec::new(), Vec::new()).unwrap();
    let first = txs[0].clone();
    let (txs, receipts) = reward(&mut h, txs, receipts).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(receipts.len(), 2);
    assert_eq!(txs[0], first);
}

#[test]
fn reward_amount_follows_the_contract() {
    let emulator = GovernanceEmulator::new()
        .unwrap()
        .with_block_reward(coin() * 7u64);
    let mut h = Harness::with_emulator(EngineConfig::default(), emulator);
    let (txs, _) = reward(&mut h, Vec::new(), Vec::new()).unwrap();
    assert_eq!(txs[0].value, coin() * 7u64);
    assert_eq!(h.balance(&TREASURY), coin() * 7u64);
}

#[test]
fn failed_reward_query_aborts_and_resets_the_faucet() {
    let mut h = Harness::with_config(EngineConfig {
        call_gas: 1_000,
        ..EngineConfig::default()
    });
    let root = h.state.intermediate_root(true).unwrap();
    let err = reward(&mut h, Vec::new(), Vec::new()).unwrap_err();
    assert_eq!(
        err,
        ConsensusError::ContractCall(ContractCallError::Reverted {
            method: "getReward"
        })
    );
    assert_eq!(h.balance(&SYSTEM_FAUCET), U256::zero());
    assert_eq!(h.balance(&TREASURY), U256::zero());
    assert_eq!(h.state.intermediate_root(true).unwrap(), root);
}

#[test]
fn receipt_root_keeps_empty_accounts_before_eip158() {
    let mut legacy = Harness::new();
    legacy.chain = TestChain::new().with_config(ChainConfig {
        chain_id: 1,
        eip158_block: None,
    });
    legacy.header = legacy.chain.next_header(PRODUCER);
    let mut modern = Harness::new();

    let mut roots = Vec::new();
    for (h, delete_empty) in [(&mut legacy, false), (&mut modern, true)] {
        h.state
            .set_balance(&Address::repeat_byte(0x99), U256::zero())
            .unwrap();
        let (_, receipts) = reward(h, Vec::new(), Vec::new()).unwrap();
        let root = h.state.intermediate_root(delete_empty).unwrap();
        assert_eq!(receipts[0].post_state, root.as_bytes().to_vec());
        roots.push(receipts[0].post_state.clone());
    }
    assert_ne!(roots[0], roots[1]);
}
