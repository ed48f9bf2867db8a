// Path: crates/test_utils/src/governance.rs

//! A native emulation of the governance contracts.
//!
//! The emulator implements [`ContractExecutor`] by dispatching on the target
//! system address and the ABI selector of the call. All contract data lives
//! in account storage of the state database, so journal snapshots and
//! reverts behave exactly as they would for bytecode execution.
//!
//! Storage layouts:
//! - token: `owner -> collateral`
//! - masternode registry: `masternode -> owner`
//! - blacklist registry: `proposal -> kind | accepted | target`
//! - migration: `owner -> amount`, plus the total and an init flag

use ethabi::{Contract, Function, Token};
use range_api::execution::{ContractExecutor, ExecutionContext, ExecutionResult, GasPool};
use range_api::state::StateDatabase;
use range_api::transfer::can_transfer;
use range_types::abi;
use range_types::error::{ExecutionError, StateError};
use range_types::params::{
    BLACKLIST_REGISTRY, BLOCK_REWARD, MASTERNODE_REGISTRY, MASTERNODE_TOKEN, MIGRATION_CONTRACT,
    STORAGE_MARKER, TREASURY,
};
use range_types::primitives::{
    address_key, bytes_to_address, h256_to_u256, key_to_address, keccak256, u256_to_h256,
};
use range_types::receipt::Log;
use range_types::transaction::Message;
use range_types::{Address, H256, U256};
use std::collections::BTreeSet;

const TX_BASE_GAS: u64 = 21_000;
const PER_ITEM_GAS: u64 = 5_000;
const SSTORE_GAS: u64 = 20_000;

const KIND_BLOCK: u8 = 1;
const KIND_DRAIN: u8 = 2;

/// One whole coin in base units.
pub fn coin() -> U256 {
    U256::exp10(18)
}

/// Fee for a blacklist proposal.
pub fn blacklist_proposal_fee() -> U256 {
    coin() * 1_000u64
}

/// Fee for a drain proposal.
pub fn drain_proposal_fee() -> U256 {
    coin() * 100u64
}

/// Reward returned by `getReward` unless overridden.
pub fn default_block_reward() -> U256 {
    coin() * 2_280u64 / 1_000u64
}

fn migration_total_slot() -> H256 {
    keccak256(b"migration.totalAmount")
}

fn migration_init_slot() -> H256 {
    keccak256(b"migration.initialized")
}

enum CallError {
    Revert(String),
    State(StateError),
}

impl From<StateError> for CallError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

fn revert<T>(reason: impl Into<String>) -> Result<T, CallError> {
    Err(CallError::Revert(reason.into()))
}

struct Outcome {
    output: Vec<u8>,
    gas: u64,
}

impl Outcome {
    fn empty(gas: u64) -> Self {
        Self {
            output: Vec::new(),
            gas,
        }
    }

    fn tokens(tokens: &[Token], gas: u64) -> Self {
        Self {
            output: ethabi::encode(tokens),
            gas,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProposalRecord {
    kind: u8,
    accepted: bool,
    target: Address,
}

impl ProposalRecord {
    fn decode(word: &H256) -> Option<Self> {
        if word.is_zero() {
            return None;
        }
        let bytes = word.as_bytes();
        Some(Self {
            kind: bytes.first().copied().unwrap_or_default(),
            accepted: bytes.get(1).copied().unwrap_or_default() != 0,
            target: key_to_address(word),
        })
    }

    fn encode(&self) -> H256 {
        let mut word = address_key(&self.target);
        let bytes = word.as_bytes_mut();
        if let Some(kind) = bytes.first_mut() {
            *kind = self.kind;
        }
        if let Some(accepted) = bytes.get_mut(1) {
            *accepted = u8::from(self.accepted);
        }
        word
    }
}

/// Emulates the masternode, reward, blacklist, proposal and migration
/// contracts at their system addresses.
#[derive(Debug, Clone)]
pub struct GovernanceEmulator {
    registry: Contract,
    token: Contract,
    block_reward: Contract,
    blacklist: Contract,
    proposal: Contract,
    migration: Contract,
    reward_amount: U256,
}

impl GovernanceEmulator {
    /// Loads the contract ABIs.
    pub fn new() -> Result<Self, ethabi::Error> {
        Ok(Self {
            registry: abi::load(abi::MASTERNODE_REGISTRY_ABI)?,
            token: abi::load(abi::MASTERNODE_TOKEN_ABI)?,
            block_reward: abi::load(abi::BLOCK_REWARD_ABI)?,
            blacklist: abi::load(abi::BLACKLIST_REGISTRY_ABI)?,
            proposal: abi::load(abi::PROPOSAL_ABI)?,
            migration: abi::load(abi::GEN2_MIGRATION_ABI)?,
            reward_amount: default_block_reward(),
        })
    }

    /// Overrides the amount `getReward` returns.
    pub fn with_block_reward(mut self, amount: U256) -> Self {
        self.reward_amount = amount;
        self
    }

    /// ABI-encodes a call to `name` on the contract deployed at `target`.
    /// Any address other than the system contracts is treated as a proposal.
    pub fn encode_call(
        &self,
        target: &Address,
        name: &str,
        args: &[Token],
    ) -> Result<Vec<u8>, ethabi::Error> {
        self.contract_at(target).function(name)?.encode_input(args)
    }

    fn contract_at(&self, target: &Address) -> &Contract {
        [
            (MASTERNODE_REGISTRY, &self.registry),
            (MASTERNODE_TOKEN, &self.token),
            (BLOCK_REWARD, &self.block_reward),
            (BLACKLIST_REGISTRY, &self.blacklist),
            (MIGRATION_CONTRACT, &self.migration),
        ]
        .into_iter()
        .find(|(address, _)| address == target)
        .map(|(_, contract)| contract)
        .unwrap_or(&self.proposal)
    }

    fn decode_call<'c>(
        contract: &'c Contract,
        data: &[u8],
    ) -> Result<(&'c Function, Vec<Token>), CallError> {
        let (selector, args) = match (data.get(..4), data.get(4..)) {
            (Some(selector), Some(args)) => (selector, args),
            _ => return revert("call data shorter than a selector"),
        };
        let function = match contract
            .functions()
            .find(|f| f.short_signature().as_slice() == selector)
        {
            Some(function) => function,
            None => return revert("unknown selector"),
        };
        match function.decode_input(args) {
            Ok(tokens) => Ok((function, tokens)),
            Err(e) => revert(format!("bad arguments for {}: {}", function.name, e)),
        }
    }

    fn dispatch(
        &self,
        msg: &Message,
        to: &Address,
        state: &mut dyn StateDatabase,
    ) -> Result<Outcome, CallError> {
        if msg.data.is_empty() {
            return Ok(Outcome::empty(TX_BASE_GAS));
        }
        if *to == MASTERNODE_TOKEN {
            self.token_call(msg, state)
        } else if *to == MASTERNODE_REGISTRY {
            self.registry_call(msg, state)
        } else if *to == BLOCK_REWARD {
            self.reward_call(msg, state)
        } else if *to == BLACKLIST_REGISTRY {
            self.blacklist_call(msg, state)
        } else if *to == MIGRATION_CONTRACT {
            self.migration_call(msg, state)
        } else {
            let record = state.storage(&BLACKLIST_REGISTRY, &address_key(to))?;
            if record.is_zero() {
                return revert("no contract code at target");
            }
            self.proposal_call(msg, to, state)
        }
    }

    fn token_call(&self, msg: &Message, state: &mut dyn StateDatabase) -> Result<Outcome, CallError> {
        let (function, args) = Self::decode_call(&self.token, &msg.data)?;
        let key = address_key(&msg.from);
        match (function.name.as_str(), args.as_slice()) {
            ("depositCollateral", []) => {
                if msg.value.is_zero() {
                    return revert("zero collateral");
                }
                let current = h256_to_u256(&state.storage(&MASTERNODE_TOKEN, &key)?);
                state.set_storage(&MASTERNODE_TOKEN, key, u256_to_h256(current.saturating_add(msg.value)))?;
                Ok(Outcome::empty(TX_BASE_GAS + SSTORE_GAS))
            }
            ("withdrawCollateral", [Token::Uint(amount)]) => {
                let current = h256_to_u256(&state.storage(&MASTERNODE_TOKEN, &key)?);
                if current < *amount {
                    return revert("not enough collateral");
                }
                state.set_storage(&MASTERNODE_TOKEN, key, u256_to_h256(current - *amount))?;
                state.sub_balance(&MASTERNODE_TOKEN, *amount)?;
                state.add_balance(&msg.from, *amount)?;
                Ok(Outcome::empty(TX_BASE_GAS + SSTORE_GAS))
            }
            ("balanceOf", [Token::Address(owner)]) => {
                let balance = h256_to_u256(&state.storage(&MASTERNODE_TOKEN, &address_key(owner))?);
                Ok(Outcome::tokens(&[Token::Uint(balance)], TX_BASE_GAS))
            }
            _ => revert("unsupported token call"),
        }
    }

    fn registry_call(
        &self,
        msg: &Message,
        state: &mut dyn StateDatabase,
    ) -> Result<Outcome, CallError> {
        let (function, args) = Self::decode_call(&self.registry, &msg.data)?;
        match (function.name.as_str(), args.as_slice()) {
            ("announce", [Token::Address(masternode), _, _]) => {
                let collateral =
                    h256_to_u256(&state.storage(&MASTERNODE_TOKEN, &address_key(&msg.from))?);
                if collateral.is_zero() {
                    return revert("owner has no collateral");
                }
                let key = address_key(masternode);
                if !state.storage(&MASTERNODE_REGISTRY, &key)?.is_zero() {
                    return revert("masternode already active");
                }
                state.set_storage(&MASTERNODE_REGISTRY, key, address_key(&msg.from))?;
                Ok(Outcome::empty(TX_BASE_GAS + 2 * SSTORE_GAS))
            }
            ("denounce", [Token::Address(masternode)]) => {
                let key = address_key(masternode);
                let owner = state.storage(&MASTERNODE_REGISTRY, &key)?;
                if owner.is_zero() || key_to_address(&owner) != msg.from {
                    return revert("not the masternode owner");
                }
                state.set_storage(&MASTERNODE_REGISTRY, key, H256::zero())?;
                Ok(Outcome::empty(TX_BASE_GAS + SSTORE_GAS))
            }
            ("enumerateActive", []) => {
                let active: Vec<Token> = state
                    .storage_entries(&MASTERNODE_REGISTRY)?
                    .iter()
                    .map(|(key, _)| Token::Address(key_to_address(key)))
                    .collect();
                let gas = TX_BASE_GAS + PER_ITEM_GAS * active.len() as u64;
                Ok(Outcome::tokens(&[Token::Array(active)], gas))
            }
            _ => revert("unsupported registry call"),
        }
    }

    fn reward_call(&self, msg: &Message, state: &mut dyn StateDatabase) -> Result<Outcome, CallError> {
        let (function, args) = Self::decode_call(&self.block_reward, &msg.data)?;
        match (function.name.as_str(), args.as_slice()) {
            ("getReward", [Token::Uint(_)]) => Ok(Outcome::tokens(
                &[Token::Uint(self.reward_amount)],
                TX_BASE_GAS,
            )),
            ("reward", []) => {
                state.sub_balance(&BLOCK_REWARD, msg.value)?;
                state.add_balance(&TREASURY, msg.value)?;
                state.add_log(Log {
                    address: BLOCK_REWARD,
                    topics: vec![keccak256(b"Reward(uint256)")],
                    data: ethabi::encode(&[Token::Uint(msg.value)]),
                    ..Default::default()
                });
                Ok(Outcome::empty(TX_BASE_GAS + 2 * PER_ITEM_GAS))
            }
            _ => revert("unsupported reward call"),
        }
    }

    fn proposals(state: &dyn StateDatabase) -> Result<Vec<ProposalRecord>, StateError> {
        Ok(state
            .storage_entries(&BLACKLIST_REGISTRY)?
            .iter()
            .filter_map(|(_, word)| ProposalRecord::decode(word))
            .collect())
    }

    fn accepted_targets(
        records: &[ProposalRecord],
        kind: u8,
    ) -> BTreeSet<Address> {
        records
            .iter()
            .filter(|r| r.kind == kind && r.accepted)
            .map(|r| r.target)
            .collect()
    }

    fn blocked(state: &dyn StateDatabase) -> Result<BTreeSet<Address>, StateError> {
        Ok(Self::accepted_targets(&Self::proposals(state)?, KIND_BLOCK))
    }

    fn create_proposal(
        state: &mut dyn StateDatabase,
        kind: u8,
        target: Address,
    ) -> Result<Outcome, CallError> {
        let nonce = state.nonce(&BLACKLIST_REGISTRY)?;
        let mut preimage = BLACKLIST_REGISTRY.as_bytes().to_vec();
        preimage.extend_from_slice(&nonce.to_be_bytes());
        let proposal = bytes_to_address(keccak256(preimage).as_bytes());
        state.set_nonce(&BLACKLIST_REGISTRY, nonce + 1)?;
        let record = ProposalRecord {
            kind,
            accepted: false,
            target,
        };
        state.set_storage(&BLACKLIST_REGISTRY, address_key(&proposal), record.encode())?;
        Ok(Outcome::tokens(
            &[Token::Address(proposal)],
            TX_BASE_GAS + 2 * SSTORE_GAS,
        ))
    }

    fn blacklist_call(
        &self,
        msg: &Message,
        state: &mut dyn StateDatabase,
    ) -> Result<Outcome, CallError> {
        let (function, args) = Self::decode_call(&self.blacklist, &msg.data)?;
        match (function.name.as_str(), args.as_slice()) {
            ("propose", [Token::Address(target)]) => {
                if msg.value < blacklist_proposal_fee() {
                    return revert("proposal fee not paid");
                }
                Self::create_proposal(state, KIND_BLOCK, *target)
            }
            ("proposeDrain", [Token::Address(target)]) => {
                if msg.value < drain_proposal_fee() {
                    return revert("proposal fee not paid");
                }
                if !Self::blocked(state)?.contains(target) {
                    return revert("target is not blacklisted");
                }
                Self::create_proposal(state, KIND_DRAIN, *target)
            }
            ("enumerateBlocked", []) => {
                let blocked: Vec<Token> = Self::blocked(state)?
                    .into_iter()
                    .map(Token::Address)
                    .collect();
                let gas = TX_BASE_GAS + PER_ITEM_GAS * blocked.len() as u64;
                Ok(Outcome::tokens(&[Token::Array(blocked)], gas))
            }
            ("enumerateDrainable", []) => {
                let records = Self::proposals(state)?;
                let blocked = Self::accepted_targets(&records, KIND_BLOCK);
                let drainable: Vec<Token> = Self::accepted_targets(&records, KIND_DRAIN)
                    .into_iter()
                    .filter(|target| blocked.contains(target))
                    .map(Token::Address)
                    .collect();
                let gas = TX_BASE_GAS + PER_ITEM_GAS * drainable.len() as u64;
                Ok(Outcome::tokens(&[Token::Array(drainable)], gas))
            }
            ("isBlacklisted", [Token::Address(target)]) => {
                let blocked = Self::blocked(state)?.contains(target);
                Ok(Outcome::tokens(&[Token::Bool(blocked)], TX_BASE_GAS))
            }
            _ => revert("unsupported blacklist registry call"),
        }
    }

    fn proposal_call(
        &self,
        msg: &Message,
        proposal: &Address,
        state: &mut dyn StateDatabase,
    ) -> Result<Outcome, CallError> {
        let (function, _) = Self::decode_call(&self.proposal, &msg.data)?;
        let key = address_key(proposal);
        let word = state.storage(&BLACKLIST_REGISTRY, &key)?;
        let Some(mut record) = ProposalRecord::decode(&word) else {
            return revert("unknown proposal");
        };
        match function.name.as_str() {
            "voteAccept" | "voteReject" => {
                record.accepted = function.name == "voteAccept";
                state.set_storage(&BLACKLIST_REGISTRY, key, record.encode())?;
                Ok(Outcome::empty(TX_BASE_GAS + SSTORE_GAS))
            }
            "isAccepted" => Ok(Outcome::tokens(&[Token::Bool(record.accepted)], TX_BASE_GAS)),
            _ => revert("unsupported proposal call"),
        }
    }

    fn migration_call(
        &self,
        msg: &Message,
        state: &mut dyn StateDatabase,
    ) -> Result<Outcome, CallError> {
        let (function, args) = Self::decode_call(&self.migration, &msg.data)?;
        match (function.name.as_str(), args.as_slice()) {
            (
                "setSnapshot",
                [Token::Array(owners), Token::Array(amounts), Token::Array(_blacklist)],
            ) => {
                if !state.storage(&MIGRATION_CONTRACT, &migration_init_slot())?.is_zero() {
                    return revert("snapshot already set");
                }
                if owners.len() != amounts.len() {
                    return revert("owners and amounts differ in length");
                }
                let mut total = U256::zero();
                for (owner, amount) in owners.iter().zip(amounts) {
                    let (Token::Address(owner), Token::Uint(amount)) = (owner, amount) else {
                        return revert("malformed snapshot entry");
                    };
                    let key = address_key(owner);
                    let current = h256_to_u256(&state.storage(&MIGRATION_CONTRACT, &key)?);
                    state.set_storage(&MIGRATION_CONTRACT, key, u256_to_h256(current.saturating_add(*amount)))?;
                    total = total.saturating_add(*amount);
                }
                state.set_storage(&MIGRATION_CONTRACT, migration_total_slot(), u256_to_h256(total))?;
                state.set_storage(&MIGRATION_CONTRACT, migration_init_slot(), STORAGE_MARKER)?;
                Ok(Outcome::empty(
                    TX_BASE_GAS + SSTORE_GAS * (owners.len() as u64 + 2),
                ))
            }
            ("totalAmount", []) => {
                let total = h256_to_u256(&state.storage(&MIGRATION_CONTRACT, &migration_total_slot())?);
                Ok(Outcome::tokens(&[Token::Uint(total)], TX_BASE_GAS))
            }
            _ => revert("unsupported migration call"),
        }
    }
}

impl ContractExecutor for GovernanceEmulator {
    fn apply_message(
        &self,
        msg: &Message,
        _ctx: ExecutionContext<'_>,
        state: &mut dyn StateDatabase,
        gas_pool: &mut GasPool,
    ) -> Result<ExecutionResult, ExecutionError> {
        gas_pool.sub_gas(msg.gas)?;
        let nonce = state.nonce(&msg.from)?;
        if msg.check_nonce && nonce != msg.nonce {
            gas_pool.add_gas(msg.gas);
            return Err(ExecutionError::NonceMismatch {
                expected: nonce,
                got: msg.nonce,
            });
        }
        if !can_transfer(&*state, &msg.from, msg.value)? {
            gas_pool.add_gas(msg.gas);
            return Err(ExecutionError::InsufficientBalance { address: msg.from });
        }
        state.set_nonce(&msg.from, nonce + 1)?;

        let Some(to) = msg.to else {
            gas_pool.add_gas(msg.gas);
            return Err(ExecutionError::Unsupported("contract creation".into()));
        };
        let snapshot = state.snapshot();
        state.sub_balance(&msg.from, msg.value)?;
        state.add_balance(&to, msg.value)?;

        let (output, gas_used, failed) = match self.dispatch(msg, &to, state) {
            Ok(outcome) if outcome.gas <= msg.gas => (outcome.output, outcome.gas, false),
            Ok(_) => {
                state.revert_to_snapshot(snapshot);
                (Vec::new(), msg.gas, true)
            }
            Err(CallError::Revert(reason)) => {
                state.revert_to_snapshot(snapshot);
                (reason.into_bytes(), msg.gas, true)
            }
            Err(CallError::State(e)) => {
                state.revert_to_snapshot(snapshot);
                return Err(e.into());
            }
        };
        gas_pool.add_gas(msg.gas - gas_used);
        Ok(ExecutionResult {
            output,
            gas_used,
            failed,
        })
    }
}
