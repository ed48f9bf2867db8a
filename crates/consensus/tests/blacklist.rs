// Path: crates/consensus/tests/blacklist.rs

mod common;

use common::{coins, Harness};
use range_api::execution::{ContractExecutor, ExecutionContext, ExecutionResult, GasPool};
use range_api::state::StateDatabase;
use range_api::transfer::{can_transfer, is_blacklisted, is_whitelisted};
use range_consensus::FinalizedLists;
use range_test_utils::{GovernanceEmulator, StateStore};
use range_types::config::EngineConfig;
use range_types::error::ExecutionError;
use range_types::transaction::Message;
use range_types::params::{
    BLACKLIST, SYSTEM_CONTRACTS, SYSTEM_FAUCET, TREASURY, TREASURY_V1, WHITELIST,
};
use range_types::{Address, U256};
use std::sync::Arc;

const ALICE: Address = Address::repeat_byte(0xa1);
const BOB: Address = Address::repeat_byte(0xb0);

fn drain(h: &mut Harness) -> FinalizedLists {
    h.engine
        .process_drainable(&h.chain, &h.header, &mut h.state, Vec::new(), Vec::new())
        .unwrap()
}

#[test]
fn accepted_proposal_freezes_the_target() {
    let mut h = Harness::new();
    h.fund(&ALICE, coins(50));
    h.blacklist(ALICE);
    assert!(!is_blacklisted(&h.state, &ALICE).unwrap());

    h.process_blacklists();
    assert!(is_blacklisted(&h.state, &ALICE).unwrap());
    assert!(!can_transfer(&h.state, &ALICE, coins(1)).unwrap());
    assert!(can_transfer(&h.state, &ALICE, U256::zero()).unwrap());
    assert!(!is_blacklisted(&h.state, &BOB).unwrap());
}

#[test]
fn whitelist_holds_exactly_the_system_contracts() {
    let mut h = Harness::new();
    h.process_blacklists();
    let entries = h.state.storage_entries(&WHITELIST).unwrap();
    assert_eq!(entries.len(), SYSTEM_CONTRACTS.len());
    for contract in SYSTEM_CONTRACTS.iter() {
        assert!(is_whitelisted(&h.state, contract).unwrap());
    }
    assert!(!is_whitelisted(&h.state, &ALICE).unwrap());
}

#[test]
fn rejected_proposal_unblocks() {
    let mut h = Harness::new();
    let proposal = h.blacklist(ALICE);
    h.process_blacklists();
    assert!(is_blacklisted(&h.state, &ALICE).unwrap());

    h.vote(proposal, false);
    h.process_blacklists();
    assert!(!is_blacklisted(&h.state, &ALICE).unwrap());
    assert!(h.state.storage_entries(&BLACKLIST).unwrap().is_empty());
}

#[test]
fn nothing_is_drained_without_a_drain_proposal() {
    let mut h = Harness::new();
    h.fund(&ALICE, coins(50));
    h.blacklist(ALICE);
    h.process_blacklists();

    let (txs, receipts) = drain(&mut h);
    assert!(txs.is_empty());
    assert!(receipts.is_empty());
    assert_eq!(h.balance(&ALICE), coins(50));
    assert_eq!(h.balance(&SYSTEM_FAUCET), U256::zero());
}

#[test]
fn drainable_balance_moves_to_treasury_once() {
    let mut h = Harness::new();
    h.fund(&ALICE, coins(50));
    h.blacklist(ALICE);
    h.process_blacklists();
    h.propose_drain(ALICE);
    let treasury_before = h.balance(&TREASURY);

    let (txs, receipts) = drain(&mut h);
    assert_eq!(txs.len(), 1);
    assert_eq!(receipts.len(), 1);
    let tx = &txs[0];
    assert_eq!(tx.consensus_sender(), Some(SYSTEM_FAUCET));
    assert_eq!(tx.to, Some(TREASURY));
    assert_eq!(tx.value, coins(50));
    assert!(!receipts[0].failed);
    assert_eq!(receipts[0].tx_hash, tx.hash());

    assert_eq!(h.balance(&ALICE), U256::zero());
    assert_eq!(h.balance(&TREASURY), treasury_before + coins(50));
    assert_eq!(h.balance(&SYSTEM_FAUCET), U256::zero());

    let (txs, receipts) = drain(&mut h);
    assert!(txs.is_empty());
    assert!(receipts.is_empty());
    assert_eq!(h.balance(&TREASURY), treasury_before + coins(50));
}

#[test]
fn drain_requires_the_mirrored_blacklist() {
    let mut h = Harness::new();
    h.fund(&ALICE, coins(50));
    h.blacklist(ALICE);
    h.process_blacklists();
    h.propose_drain(ALICE);

    // Clear the mirror; the registry still reports the address as drainable.
    h.state
        .cleanup_storage(&BLACKLIST, &Default::default())
        .unwrap();
    let (txs, _) = drain(&mut h);
    assert!(txs.is_empty());
    assert_eq!(h.balance(&ALICE), coins(50));
}

#[test]
fn whitelisted_contract_is_never_drained() {
    let mut h = Harness::new();
    h.fund(&TREASURY_V1, coins(500));
    h.blacklist(TREASURY_V1);
    h.process_blacklists();
    h.propose_drain(TREASURY_V1);
    assert!(is_blacklisted(&h.state, &TREASURY_V1).unwrap());

    let (txs, _) = drain(&mut h);
    assert!(txs.is_empty());
    assert_eq!(h.balance(&TREASURY_V1), coins(500));
}

#[test]
fn every_drained_address_gets_its_own_transaction() {
    let mut h = Harness::new();
    for (address, amount) in [(ALICE, 7), (BOB, 11)] {
        h.fund(&address, coins(amount));
        h.blacklist(address);
    }
    h.process_blacklists();
    h.propose_drain(ALICE);
    h.propose_drain(BOB);
    let treasury_before = h.balance(&TREASURY);

    let (txs, receipts) = drain(&mut h);
    assert_eq!(txs.len(), 2);
    assert_eq!(receipts.len(), 2);
    assert_ne!(txs[0].nonce, txs[1].nonce);
    let total = txs.iter().fold(U256::zero(), |acc, tx| acc + tx.value);
    assert_eq!(total, coins(18));
    assert_eq!(h.balance(&TREASURY), treasury_before + coins(18));
}

/// Rejects every plain value transfer into the Treasury.
struct RevertingTreasury(Arc<GovernanceEmulator>);

impl ContractExecutor for RevertingTreasury {
    fn apply_message(
        &self,
        msg: &Message,
        ctx: ExecutionContext<'_>,
        state: &mut dyn StateDatabase,
        gas_pool: &mut GasPool,
    ) -> Result<ExecutionResult, ExecutionError> {
        if msg.to == Some(TREASURY) && msg.data.is_empty() {
            let nonce = state.nonce(&msg.from)?;
            state.set_nonce(&msg.from, nonce + 1)?;
            return Ok(ExecutionResult {
                output: Vec::new(),
                gas_used: msg.gas,
                failed: true,
            });
        }
        self.0.apply_message(msg, ctx, state, gas_pool)
    }
}

#[test]
fn reverted_drain_keeps_the_balance() {
    let emulator = Arc::new(GovernanceEmulator::new().unwrap());
    let mut h = Harness::with_executor(
        EngineConfig::default(),
        emulator.clone(),
        Arc::new(RevertingTreasury(emulator)),
    );
    h.fund(&ALICE, coins(50));
    h.blacklist(ALICE);
    h.process_blacklists();
    h.propose_drain(ALICE);
    let treasury_before = h.balance(&TREASURY);

    let (txs, receipts) = drain(&mut h);
    assert_eq!(txs.len(), 1);
    assert!(receipts[0].failed);
    assert_eq!(h.balance(&ALICE), coins(50));
    assert_eq!(h.balance(&TREASURY), treasury_before);
    assert_eq!(h.balance(&SYSTEM_FAUCET), U256::zero());
}

#[test]
fn enforcement_survives_reference_and_dereference() {
    let mut h = Harness::new();
    let store = StateStore::new();
    h.fund(&ALICE, coins(5));
    h.fund(&BOB, coins(1));
    h.blacklist(ALICE);
    h.process_blacklists();
    let root = store.commit(&mut h.state);

    store.reference(&root).unwrap();
    h.state = store.open(&root).unwrap();
    h.process_blacklists();
    assert_eq!(store.commit(&mut h.state), root);
    assert!(!store.dereference(&root));
    assert!(!store.dereference(&root));
    assert!(store.contains(&root));

    let state = store.open(&root).unwrap();
    assert!(can_transfer(&state, &ALICE, U256::zero()).unwrap());
    assert!(!can_transfer(&state, &ALICE, U256::one()).unwrap());
    assert!(can_transfer(&state, &BOB, U256::one()).unwrap());

    assert!(store.dereference(&root));
    assert!(!store.contains(&root));
}

#[test]
fn whitelisted_contract_funded_later_is_not_drained() {
    let mut h = Harness::new();
    h.blacklist(TREASURY_V1);
    h.blacklist(ALICE);
    h.process_blacklists();
    h.propose_drain(TREASURY_V1);
    h.propose_drain(ALICE);
    h.fund(&TREASURY_V1, coins(500));
    h.fund(&ALICE, coins(3));

    let (txs, _) = drain(&mut h);
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].value, coins(3));
    assert_eq!(h.balance(&ALICE), U256::zero());
    assert_eq!(h.balance(&TREASURY_V1), coins(500));
    assert!(is_blacklisted(&h.state, &TREASURY_V1).unwrap());
    assert!(can_transfer(&h.state, &TREASURY_V1, coins(500)).unwrap());
    assert!(!can_transfer(&h.state, &ALICE, U256::one()).unwrap());
}
