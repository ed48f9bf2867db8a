// Path: crates/test_utils/src/state.rs

//! A journaled, in-memory implementation of [`StateDatabase`].
//!
//! Every mutation is recorded in a journal so that snapshots can be reverted
//! exactly. Committed states are kept in a [`StateStore`] keyed by root, with
//! reference counting so tests can exercise pruning of unreferenced roots.

use parity_scale_codec::Encode;
use range_api::state::StateDatabase;
use range_types::error::StateError;
use range_types::primitives::keccak256;
use range_types::receipt::Log;
use range_types::{Address, H256, U256};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq, Eq, Encode)]
struct Account {
    balance: U256,
    nonce: u64,
    storage: BTreeMap<H256, H256>,
}

impl Account {
    fn is_empty(&self) -> bool {
        self.balance.is_zero() && self.nonce == 0 && self.storage.is_empty()
    }
}

type Accounts = BTreeMap<Address, Account>;

#[derive(Debug, Clone)]
enum JournalEntry {
    Created { address: Address },
    Balance { address: Address, prev: U256 },
    Nonce { address: Address, prev: u64 },
    Storage { address: Address, key: H256, prev: H256 },
    Log { tx_hash: H256 },
}

#[derive(Debug, Clone, Copy, Default)]
struct TxContext {
    tx_hash: H256,
    block_hash: H256,
    tx_index: usize,
}

/// A journaled in-memory account state.
#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    accounts: Accounts,
    journal: Vec<JournalEntry>,
    logs: BTreeMap<H256, Vec<Log>>,
    context: TxContext,
}

impl MemoryState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_accounts(accounts: Accounts) -> Self {
        Self {
            accounts,
            ..Default::default()
        }
    }

    /// Drops the journal and logs, making every change permanent.
    pub fn finalise(&mut self) {
        self.journal.clear();
        self.logs.clear();
    }

    fn account_mut(&mut self, address: &Address) -> &mut Account {
        if !self.accounts.contains_key(address) {
            self.journal.push(JournalEntry::Created { address: *address });
        }
        self.accounts.entry(*address).or_default()
    }

    fn root_of(accounts: &Accounts, delete_empty_objects: bool) -> H256 {
        let live: Vec<(&Address, &Account)> = accounts
            .iter()
            .filter(|(_, account)| !(delete_empty_objects && account.is_empty()))
            .collect();
        keccak256(live.encode())
    }

    fn undo(&mut self, entry: JournalEntry) {
        match entry {
            JournalEntry::Created { address } => {
                self.accounts.remove(&address);
            }
            JournalEntry::Balance { address, prev } => {
                if let Some(account) = self.accounts.get_mut(&address) {
                    account.balance = prev;
                }
            }
            JournalEntry::Nonce { address, prev } => {
                if let Some(account) = self.accounts.get_mut(&address) {
                    account.nonce = prev;
                }
            }
            JournalEntry::Storage { address, key, prev } => {
                if let Some(account) = self.accounts.get_mut(&address) {
                    if prev.is_zero() {
                        account.storage.remove(&key);
                    } else {
                        account.storage.insert(key, prev);
                    }
                }
            }
            JournalEntry::Log { tx_hash } => {
                if let Some(logs) = self.logs.get_mut(&tx_hash) {
                    logs.pop();
                    if logs.is_empty() {
                        self.logs.remove(&tx_hash);
                    }
                }
            }
        }
    }
}

impl StateDatabase for MemoryState {
    fn balance(&self, address: &Address) -> Result<U256, StateError> {
        Ok(self
            .accounts
            .get(address)
            .map(|a| a.balance)
            .unwrap_or_default())
    }

    fn set_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError> {
        let account = self.account_mut(address);
        let prev = std::mem::replace(&mut account.balance, amount);
        self.journal.push(JournalEntry::Balance {
            address: *address,
            prev,
        });
        Ok(())
    }

    fn nonce(&self, address: &Address) -> Result<u64, StateError> {
        Ok(self.accounts.get(address).map(|a| a.nonce).unwrap_or(0))
    }

    fn set_nonce(&mut self, address: &Address, nonce: u64) -> Result<(), StateError> {
        let account = self.account_mut(address);
        let prev = std::mem::replace(&mut account.nonce, nonce);
        self.journal.push(JournalEntry::Nonce {
            address: *address,
            prev,
        });
        Ok(())
    }

    fn storage(&self, address: &Address, key: &H256) -> Result<H256, StateError> {
        Ok(self
            .accounts
            .get(address)
            .and_then(|a| a.storage.get(key).copied())
            .unwrap_or_default())
    }

    fn set_storage(
        &mut self,
        address: &Address,
        key: H256,
        value: H256,
    ) -> Result<(), StateError> {
        let account = self.account_mut(address);
        let replaced = if value.is_zero() {
            account.storage.remove(&key)
        } else {
            account.storage.insert(key, value)
        };
        let prev = replaced.unwrap_or_default();
        self.journal.push(JournalEntry::Storage {
            address: *address,
            key,
            prev,
        });
        Ok(())
    }

    fn storage_entries(&self, address: &Address) -> Result<Vec<(H256, H256)>, StateError> {
        Ok(self
            .accounts
            .get(address)
            .map(|a| a.storage.iter().map(|(k, v)| (*k, *v)).collect())
            .unwrap_or_default())
    }

    fn snapshot(&mut self) -> usize {
        self.journal.len()
    }

    fn revert_to_snapshot(&mut self, id: usize) {
        while self.journal.len() > id {
            if let Some(entry) = self.journal.pop() {
                self.undo(entry);
            }
        }
    }

    fn intermediate_root(&mut self, delete_empty_objects: bool) -> Result<H256, StateError> {
        Ok(Self::root_of(&self.accounts, delete_empty_objects))
    }

    fn prepare(&mut self, tx_hash: H256, block_hash: H256, tx_index: usize) {
        self.context = TxContext {
            tx_hash,
            block_hash,
            tx_index,
        };
    }

    fn add_log(&mut self, mut log: Log) {
        let TxContext {
            tx_hash,
            block_hash,
            tx_index,
        } = self.context;
        log.tx_hash = tx_hash;
        log.block_hash = block_hash;
        log.tx_index = tx_index;
        self.logs.entry(tx_hash).or_default().push(log);
        self.journal.push(JournalEntry::Log { tx_hash });
    }

    fn logs(&self, tx_hash: &H256) -> Vec<Log> {
        self.logs.get(tx_hash).cloned().unwrap_or_default()
    }
}

#[derive(Debug)]
struct StoredRoot {
    accounts: Arc<Accounts>,
    refs: usize,
    persisted: bool,
}

#[derive(Debug, Default)]
struct StoreInner {
    roots: HashMap<H256, StoredRoot>,
}

/// A shared store of committed state roots.
///
/// A committed root starts with one reference held by the committer. Roots
/// that are neither referenced nor persisted are pruned on the last
/// [`StateStore::dereference`].
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl StateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Finalises `state` and stores it under its root, which is returned.
    pub fn commit(&self, state: &mut MemoryState) -> H256 {
        state.finalise();
        state.accounts.retain(|_, account| !account.is_empty());
        let root = MemoryState::root_of(&state.accounts, true);
        let mut inner = self.lock();
        let entry = inner.roots.entry(root).or_insert_with(|| StoredRoot {
            accounts: Arc::new(state.accounts.clone()),
            refs: 0,
            persisted: false,
        });
        entry.refs += 1;
        root
    }

    /// Opens a fresh, journal-free state at `root`.
    pub fn open(&self, root: &H256) -> Result<MemoryState, StateError> {
        let inner = self.lock();
        let stored = inner.roots.get(root).ok_or(StateError::UnknownRoot(*root))?;
        Ok(MemoryState::from_accounts((*stored.accounts).clone()))
    }

    /// Adds a reference to `root`.
    pub fn reference(&self, root: &H256) -> Result<(), StateError> {
        let mut inner = self.lock();
        let stored = inner
            .roots
            .get_mut(root)
            .ok_or(StateError::UnknownRoot(*root))?;
        stored.refs += 1;
        Ok(())
    }

    /// Drops a reference to `root`. Returns true if the root was pruned.
    pub fn dereference(&self, root: &H256) -> bool {
        let mut inner = self.lock();
        let prune = match inner.roots.get_mut(root) {
            Some(stored) => {
                stored.refs = stored.refs.saturating_sub(1);
                stored.refs == 0 && !stored.persisted
            }
            None => false,
        };
        if prune {
            inner.roots.remove(root);
        }
        prune
    }

    /// Marks `root` as flushed to disk; persisted roots are never pruned.
    pub fn persist(&self, root: &H256) -> Result<(), StateError> {
        let mut inner = self.lock();
        let stored = inner
            .roots
            .get_mut(root)
            .ok_or(StateError::UnknownRoot(*root))?;
        stored.persisted = true;
        Ok(())
    }

    /// Whether `root` is still available.
    pub fn contains(&self, root: &H256) -> bool {
        self.lock().roots.contains_key(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revert_restores_every_kind_of_change() {
        let mut state = MemoryState::new();
        let addr = Address::repeat_byte(1);
        state.set_balance(&addr, U256::from(5u64)).unwrap();
        let before = state.intermediate_root(false).unwrap();

        let id = state.snapshot();
        state.set_balance(&addr, U256::from(9u64)).unwrap();
        state.set_nonce(&addr, 3).unwrap();
        state
            .set_storage(&addr, H256::repeat_byte(2), H256::repeat_byte(3))
            .unwrap();
        state
            .set_balance(&Address::repeat_byte(7), U256::one())
            .unwrap();
        state.add_log(Log::default());
        state.revert_to_snapshot(id);

        assert_eq!(state.balance(&addr).unwrap(), U256::from(5u64));
        assert_eq!(state.nonce(&addr).unwrap(), 0);
        assert!(state.storage_entries(&addr).unwrap().is_empty());
        assert!(state.logs(&H256::zero()).is_empty());
        assert_eq!(state.intermediate_root(false).unwrap(), before);
    }

    #[test]
    fn nested_snapshots_revert_independently() {
        let mut state = MemoryState::new();
        let addr = Address::repeat_byte(1);
        let outer = state.snapshot();
        state.set_balance(&addr, U256::one()).unwrap();
        let inner = state.snapshot();
        state.set_balance(&addr, U256::from(2u64)).unwrap();

        state.revert_to_snapshot(inner);
        assert_eq!(state.balance(&addr).unwrap(), U256::one());
        state.revert_to_snapshot(outer);
        assert_eq!(state.balance(&addr).unwrap(), U256::zero());
    }

    #[test]
    fn zero_write_deletes_slot() {
        let mut state = MemoryState::new();
        let addr = Address::repeat_byte(1);
        state
            .set_storage(&addr, H256::repeat_byte(1), H256::repeat_byte(1))
            .unwrap();
        state
            .set_storage(&addr, H256::repeat_byte(1), H256::zero())
            .unwrap();
        assert!(state.storage_entries(&addr).unwrap().is_empty());
    }

    #[test]
    fn empty_accounts_only_count_without_deletion() {
        let mut state = MemoryState::new();
        let empty = state.intermediate_root(true).unwrap();
        state.set_nonce(&Address::repeat_byte(1), 0).unwrap();
        assert_eq!(state.intermediate_root(true).unwrap(), empty);
        assert_ne!(state.intermediate_root(false).unwrap(), empty);
    }

    #[test]
    fn store_prunes_unreferenced_roots_only() {
        let store = StateStore::new();
        let mut state = MemoryState::new();
        state
            .set_balance(&Address::repeat_byte(1), U256::one())
            .unwrap();
        let root = store.commit(&mut state);

        store.reference(&root).unwrap();
        assert!(!store.dereference(&root));
        assert!(store.dereference(&root));
        assert!(!store.contains(&root));
        assert_eq!(store.open(&root).unwrap_err(), StateError::UnknownRoot(root));

        let root = store.commit(&mut state);
        store.persist(&root).unwrap();
        assert!(!store.dereference(&root));
        assert_eq!(
            store
                .open(&root)
                .unwrap()
                .balance(&Address::repeat_byte(1))
                .unwrap(),
            U256::one()
        );
    }
}
