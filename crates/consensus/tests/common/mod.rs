// Path: crates/consensus/tests/common/mod.rs
#![allow(dead_code)]

use ethabi::{ParamType, Token};
use range_api::execution::{ContractExecutor, ExecutionContext, ExecutionResult, GasPool};
use range_api::state::StateDatabase;
use range_consensus::RangeEngine;
use range_test_utils::governance::{blacklist_proposal_fee, coin, drain_proposal_fee};
use range_test_utils::{GovernanceEmulator, MemoryState, TestChain, TestSealRecovery};
use range_types::config::EngineConfig;
use range_types::header::Header;
use range_types::params::{
    BLACKLIST_REGISTRY, MASTERNODE_LIST, MASTERNODE_REGISTRY, MASTERNODE_TOKEN,
};
use range_types::primitives::address_key;
use range_types::transaction::Message;
use range_types::{Address, H256, U256};
use std::sync::Arc;

pub const PRODUCER: Address = Address::repeat_byte(0xcb);

/// An engine wired to the governance emulator, plus a chain and state.
pub struct Harness {
    pub engine: RangeEngine,
    pub emulator: Arc<GovernanceEmulator>,
    pub chain: TestChain,
    pub header: Header,
    pub state: MemoryState,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_emulator(config, GovernanceEmulator::new().unwrap())
    }

    pub fn with_emulator(config: EngineConfig, emulator: GovernanceEmulator) -> Self {
        let emulator = Arc::new(emulator);
        Self::with_executor(config, emulator.clone(), emulator)
    }

    /// The engine runs on `executor`; direct user calls still go to `emulator`.
    pub fn with_executor(
        config: EngineConfig,
        emulator: Arc<GovernanceEmulator>,
        executor: Arc<dyn ContractExecutor>,
    ) -> Self {
        let engine = RangeEngine::new(config, executor, Arc::new(TestSealRecovery)).unwrap();
        let chain = TestChain::new();
        let header = chain.next_header(PRODUCER);
        Self {
            engine,
            emulator,
            chain,
            header,
            state: MemoryState::new(),
        }
    }

    /// Executes a user call directly against the emulator.
    pub fn exec(&mut self, from: Address, to: Address, value: U256, data: Vec<u8>) -> ExecutionResult {
        self.apply(&Message::call(from, to, value, 10_000_000, data))
    }

    pub fn apply(&mut self, msg: &Message) -> ExecutionResult {
        let ctx = ExecutionContext {
            chain: &self.chain,
            header: &self.header,
        };
        self.emulator
            .apply_message(msg, ctx, &mut self.state, &mut GasPool::new(u64::MAX))
            .unwrap()
    }

    pub fn encode(&self, target: &Address, name: &str, args: &[Token]) -> Vec<u8> {
        self.emulator.encode_call(target, name, args).unwrap()
    }

    pub fn fund(&mut self, address: &Address, amount: U256) {
        self.state.add_balance(address, amount).unwrap();
    }

    pub fn balance(&self, address: &Address) -> U256 {
        self.state.balance(address).unwrap()
    }

    pub fn deposit_collateral(&mut self, owner: Address, amount: U256) {
        self.fund(&owner, amount);
        let data = self.encode(&MASTERNODE_TOKEN, "depositCollateral", &[]);
        let res = self.exec(owner, MASTERNODE_TOKEN, amount, data);
        assert!(!res.failed, "depositCollateral reverted");
    }

    pub fn announce(&mut self, owner: Address, masternode: Address) -> ExecutionResult {
        let data = self.encode(
            &MASTERNODE_REGISTRY,
            "announce",
            &[
                Token::Address(masternode),
                Token::Uint(U256::from(0x7f00_0001u64)),
                Token::FixedArray(vec![
                    Token::FixedBytes(vec![0x11; 32]),
                    Token::FixedBytes(vec![0x22; 32]),
                ]),
            ],
        );
        self.exec(owner, MASTERNODE_REGISTRY, U256::zero(), data)
    }

    pub fn denounce(&mut self, owner: Address, masternode: Address) -> ExecutionResult {
        let data = self.encode(&MASTERNODE_REGISTRY, "denounce", &[Token::Address(masternode)]);
        self.exec(owner, MASTERNODE_REGISTRY, U256::zero(), data)
    }

    pub fn masternode_slot(&self, address: &Address) -> H256 {
        self.state
            .storage(&MASTERNODE_LIST, &address_key(address))
            .unwrap()
    }

    fn create_proposal(&mut self, method: &str, target: Address, fee: U256) -> Address {
        let proposer = Address::repeat_byte(0xee);
        self.fund(&proposer, fee);
        let data = self.encode(&BLACKLIST_REGISTRY, method, &[Token::Address(target)]);
        let res = self.exec(proposer, BLACKLIST_REGISTRY, fee, data);
        assert!(!res.failed, "{} reverted", method);
        match ethabi::decode(&[ParamType::Address], &res.output)
            .unwrap()
            .as_slice()
        {
            [Token::Address(proposal)] => *proposal,
            other => panic!("unexpected proposal output {:?}", other),
        }
    }

    pub fn vote(&mut self, proposal: Address, accept: bool) {
        let method = if accept { "voteAccept" } else { "voteReject" };
        let data = self.encode(&proposal, method, &[]);
        let res = self.exec(Address::repeat_byte(0xdd), proposal, U256::zero(), data);
        assert!(!res.failed, "{} reverted", method);
    }

    /// Proposes and accepts a blacklist entry; returns the proposal.
    pub fn blacklist(&mut self, target: Address) -> Address {
        let proposal = self.create_proposal("propose", target, blacklist_proposal_fee());
        self.vote(proposal, true);
        proposal
    }

    /// Proposes and accepts draining a blacklisted address.
    pub fn propose_drain(&mut self, target: Address) -> Address {
        let proposal = self.create_proposal("proposeDrain", target, drain_proposal_fee());
        self.vote(proposal, true);
        proposal
    }

    pub fn process_masternodes(&mut self) {
        self.engine
            .process_masternodes(&self.chain, &self.header, &mut self.state)
            .unwrap();
    }

    pub fn process_blacklists(&mut self) {
        self.engine
            .process_blacklists(&self.chain, &self.header, &mut self.state)
            .unwrap();
    }
}

pub fn coins(n: u64) -> U256 {
    coin() * n
}
