// Path: crates/consensus/tests/finalize.rs

mod common;

use common::{coins, Harness, PRODUCER};
use range_api::chain::ChainReader;
use range_api::state::StateDatabase;
use range_api::transfer::is_blacklisted;
use range_consensus::seal::signature_hash;
use range_test_utils::governance::default_block_reward;
use range_test_utils::signer::test_signature;
use range_types::config::EngineConfig;
use range_types::error::{ConsensusError, ContractCallError, SignerError};
use range_types::header::Header;
use range_types::params::{
    BLOCK_REWARD, MASTERNODE_LIST, MIGRATION_CONTRACT, SYSTEM_FAUCET, TREASURY,
};
use range_types::{Address, U256};

const ALICE: Address = Address::repeat_byte(0xa1);
const SIGNER: Address = Address::repeat_byte(0x5a);

fn sealed(mut header: Header, by: &Address) -> Header {
    header.signature = test_signature(by, signature_hash(&header).as_bytes());
    header
}

#[test]
fn finalize_runs_every_step_in_order() {
    let mut h = Harness::new();
    let owner = Address::repeat_byte(0x01);
    let masternode = Address::repeat_byte(0x02);
    h.deposit_collateral(owner, coins(10_000));
    assert!(!h.announce(owner, masternode).failed);

    h.fund(&ALICE, coins(50));
    h.blacklist(ALICE);
    // Only the registry needs to know the target is blocked.
    h.propose_drain(ALICE);

    let (txs, receipts) = h
        .engine
        .finalize(&h.chain, &h.header, &mut h.state, Vec::new(), Vec::new())
        .unwrap();

    assert_eq!(txs.len(), 2);
    assert_eq!(receipts.len(), 2);
    assert_eq!(txs[0].to, Some(TREASURY));
    assert_eq!(txs[0].value, coins(50));
    assert_eq!(txs[1].to, Some(BLOCK_REWARD));
    assert_eq!(txs[1].nonce, txs[0].nonce + 1);
    assert!(receipts.iter().all(|r| !r.failed));

    assert!(!h.masternode_slot(&masternode).is_zero());
    assert_eq!(h.state.storage_entries(&MASTERNODE_LIST).unwrap().len(), 1);
    assert!(is_blacklisted(&h.state, &ALICE).unwrap());
    assert_eq!(h.balance(&ALICE), U256::zero());
    assert_eq!(h.balance(&TREASURY), coins(50) + default_block_reward());
    assert_eq!(h.balance(&SYSTEM_FAUCET), U256::zero());
}

#[test]
fn finalize_appends_after_block_transactions() {
    let mut h = Harness::new();
    let (txs, receipts) = h
        .engine
        .finalize(&h.chain, &h.header, &mut h.state, Vec::new(), Vec::new())
        .unwrap();
    let (txs, receipts) = h
        .engine
        .finalize(&h.chain, &h.header, &mut h.state, txs, receipts)
        .unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(receipts.len(), 2);
    assert!(txs.iter().all(|tx| tx.consensus_sender() == Some(SYSTEM_FAUCET)));
}

#[test]
fn finalize_stops_at_the_first_error() {
    let mut h = Harness::with_config(EngineConfig {
        call_gas: 1_000,
        ..EngineConfig::default()
    });
    let err = h
        .engine
        .finalize(&h.chain, &h.header, &mut h.state, Vec::new(), Vec::new())
        .unwrap_err();
    assert_eq!(
        err,
        ConsensusError::ContractCall(ContractCallError::Reverted {
            method: "getReward"
        })
    );
    assert_eq!(h.balance(&TREASURY), U256::zero());
}

#[test]
fn seal_by_coinbase_is_accepted() {
    let h = Harness::new();
    let header = sealed(h.header.clone(), &PRODUCER);
    assert_eq!(signature_hash(&header), signature_hash(&h.header));
    h.engine.verify_seal(&header, &h.state).unwrap();
}

#[test]
fn missing_seal_is_rejected() {
    let h = Harness::new();
    assert_eq!(
        h.engine.verify_seal(&h.header, &h.state),
        Err(ConsensusError::MissingSignature)
    );
}

#[test]
fn seal_by_another_key_is_rejected() {
    let h = Harness::new();
    let header = sealed(h.header.clone(), &ALICE);
    assert_eq!(
        h.engine.verify_seal(&header, &h.state),
        Err(ConsensusError::InvalidSeal {
            expected: PRODUCER,
            recovered: ALICE
        })
    );
}

#[test]
fn seal_over_modified_header_is_rejected() {
    let h = Harness::new();
    let mut header = sealed(h.header.clone(), &PRODUCER);
    header.gas_used += 1;
    assert!(matches!(
        h.engine.verify_seal(&header, &h.state),
        Err(ConsensusError::Signer(SignerError::InvalidSignature(_)))
    ));
}

#[test]
fn blacklisted_coinbase_is_rejected() {
    let mut h = Harness::new();
    h.blacklist(PRODUCER);
    h.process_blacklists();
    let header = sealed(h.header.clone(), &PRODUCER);
    assert_eq!(
        h.engine.verify_seal(&header, &h.state),
        Err(ConsensusError::BlacklistedCoinbase(PRODUCER))
    );
}

#[test]
fn migration_block_is_sealed_by_the_migration_signer() {
    let h = Harness::with_config(EngineConfig {
        migration_signer: Some(SIGNER),
        ..EngineConfig::default()
    });
    let header = h.chain.next_header(MIGRATION_CONTRACT);

    h.engine
        .verify_seal(&sealed(header.clone(), &SIGNER), &h.state)
        .unwrap();
    assert_eq!(
        h.engine
            .verify_seal(&sealed(header, &MIGRATION_CONTRACT), &h.state),
        Err(ConsensusError::InvalidSeal {
            expected: SIGNER,
            recovered: MIGRATION_CONTRACT
        })
    );
}

#[test]
fn migration_seal_needs_a_configured_signer() {
    let h = Harness::new();
    let header = sealed(h.chain.next_header(MIGRATION_CONTRACT), &SIGNER);
    assert_eq!(
        h.engine.verify_seal(&header, &h.state),
        Err(ConsensusError::Signer(SignerError::NotConfigured(
            "migration signer"
        )))
    );
}

#[test]
fn dos_check_accepts_every_header() {
    let mut h = Harness::new();
    let parent = h.chain.current_header().unwrap();
    for coinbase in [PRODUCER, ALICE, MIGRATION_CONTRACT] {
        let header = h.chain.next_header(coinbase);
        h.engine.check_dos(&h.chain, &header, &parent).unwrap();
    }
    h.chain.push(h.header.clone());
    let sibling = h.chain.next_header(PRODUCER);
    h.engine.check_dos(&h.chain, &sibling, &h.header).unwrap();
}
