// Path: crates/api/src/state/database.rs
//! Defines the `StateDatabase` trait for account-state operations.

use range_types::error::StateError;
use range_types::receipt::Log;
use range_types::{Address, H256, U256};
use std::collections::HashSet;

/// Storage keys that survive a [`StateDatabase::cleanup_storage`] pass.
pub type KeepStorage = HashSet<H256>;

/// A dyn-safe interface to a journaled account-state database.
///
/// Writing a zero storage value deletes the slot. Snapshots are identified by
/// the value returned from [`StateDatabase::snapshot`]; reverting to one
/// discards every change made after it, including logs.
pub trait StateDatabase: Send {
    /// Balance of `address`; zero for unknown accounts.
    fn balance(&self, address: &Address) -> Result<U256, StateError>;

    /// Overwrites the balance of `address`.
    fn set_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError>;

    /// Credits `amount` to `address`, saturating at the maximum.
    fn add_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError> {
        let current = self.balance(address)?;
        self.set_balance(address, current.saturating_add(amount))
    }

    /// Debits `amount` from `address`, saturating at zero.
    fn sub_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError> {
        let current = self.balance(address)?;
        self.set_balance(address, current.saturating_sub(amount))
    }

    /// Nonce of `address`.
    fn nonce(&self, address: &Address) -> Result<u64, StateError>;

    /// Overwrites the nonce of `address`.
    fn set_nonce(&mut self, address: &Address, nonce: u64) -> Result<(), StateError>;

    /// Reads a storage slot; zero when unset.
    fn storage(&self, address: &Address, key: &H256) -> Result<H256, StateError>;

    /// Writes a storage slot. A zero value deletes the slot.
    fn set_storage(&mut self, address: &Address, key: H256, value: H256)
        -> Result<(), StateError>;

    /// Every non-zero slot of `address`, in key order.
    fn storage_entries(&self, address: &Address) -> Result<Vec<(H256, H256)>, StateError>;

    /// Deletes every slot of `address` whose key is not in `keep`, returning
    /// how many were removed.
    fn cleanup_storage(
        &mut self,
        address: &Address,
        keep: &KeepStorage,
    ) -> Result<usize, StateError> {
        let stale: Vec<H256> = self
            .storage_entries(address)?
            .into_iter()
            .map(|(key, _)| key)
            .filter(|key| !keep.contains(key))
            .collect();
        for key in &stale {
            self.set_storage(address, *key, H256::zero())?;
        }
        Ok(stale.len())
    }

    /// Takes a journal snapshot.
    fn snapshot(&mut self) -> usize;

    /// Discards every change made after snapshot `id`.
    fn revert_to_snapshot(&mut self, id: usize);

    /// Computes the current state root.
    fn intermediate_root(&mut self, delete_empty_objects: bool) -> Result<H256, StateError>;

    /// Sets the transaction context that subsequent logs are attributed to.
    fn prepare(&mut self, tx_hash: H256, block_hash: H256, tx_index: usize);

    /// Records a log under the current transaction context.
    fn add_log(&mut self, log: Log);

    /// Logs recorded for `tx_hash`.
    fn logs(&self, tx_hash: &H256) -> Vec<Log>;
}

// Blanket implementation to allow `StateDatabase` to be used behind a `Box` trait object.
impl<T: StateDatabase + ?Sized> StateDatabase for Box<T> {
    fn balance(&self, address: &Address) -> Result<U256, StateError> {
        (**self).balance(address)
    }

    fn set_balance(&mut self, address: &Address, amount: U256) -> Result<(), StateError> {
        (**self).set_balance(address, amount)
    }

    fn nonce(&self, address: &Address) -> Result<u64, StateError> {
        (**self).nonce(address)
    }

    fn set_nonce(&mut self, address: &Address, nonce: u64) -> Result<(), StateError> {
        (**self).set_nonce(address, nonce)
    }

    fn storage(&self, address: &Address, key: &H256) -> Result<H256, StateError> {
        (**self).storage(address, key)
    }

    fn set_storage(
        &mut self,
        address: &Address,
        key: H256,
        value: H256,
    ) -> Result<(), StateError> {
        (**self).set_storage(address, key, value)
    }

    fn storage_entries(&self, address: &Address) -> Result<Vec<(H256, H256)>, StateError> {
        (**self).storage_entries(address)
    }

    fn cleanup_storage(
        &mut self,
        address: &Address,
        keep: &KeepStorage,
    ) -> Result<usize, StateError> {
        (**self).cleanup_storage(address, keep)
    }

    fn snapshot(&mut self) -> usize {
        (**self).snapshot()
    }

    fn revert_to_snapshot(&mut self, id: usize) {
        (**self).revert_to_snapshot(id)
    }

    fn intermediate_root(&mut self, delete_empty_objects: bool) -> Result<H256, StateError> {
        (**self).intermediate_root(delete_empty_objects)
    }

    fn prepare(&mut self, tx_hash: H256, block_hash: H256, tx_index: usize) {
        (**self).prepare(tx_hash, block_hash, tx_index)
    }

    fn add_log(&mut self, log: Log) {
        (**self).add_log(log)
    }

    fn logs(&self, tx_hash: &H256) -> Vec<Log> {
        (**self).logs(tx_hash)
    }
}
