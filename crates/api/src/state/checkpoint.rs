// Path: crates/api/src/state/checkpoint.rs

//! Scoped guards over a [`StateDatabase`].
//!
//! Every read-only governance call runs inside a [`StateCheckpoint`], and the
//! system faucet is only ever funded through a [`TemporaryBalance`]. Both
//! restore state in `Drop`, so early returns and `?` cannot skip the restore.

use crate::state::StateDatabase;
use range_types::error::StateError;
use range_types::{Address, U256};
use std::ops::{Deref, DerefMut};

/// An RAII guard that snapshots state on creation and reverts to that
/// snapshot on drop.
///
/// The guard dereferences to the wrapped database, so calls made through it
/// are rolled back when it goes out of scope.
#[must_use = "StateCheckpoint must be bound to a variable, otherwise the revert happens immediately"]
pub struct StateCheckpoint<'a, S: StateDatabase + ?Sized> {
    state: &'a mut S,
    id: usize,
}

impl<'a, S: StateDatabase + ?Sized> StateCheckpoint<'a, S> {
    /// Takes a snapshot of `state`.
    pub fn new(state: &'a mut S) -> Self {
        let id = state.snapshot();
        Self { state, id }
    }

    /// The journal snapshot this guard reverts to.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<S: StateDatabase + ?Sized> Deref for StateCheckpoint<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.state
    }
}

impl<S: StateDatabase + ?Sized> DerefMut for StateCheckpoint<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.state
    }
}

impl<S: StateDatabase + ?Sized> Drop for StateCheckpoint<'_, S> {
    fn drop(&mut self) {
        self.state.revert_to_snapshot(self.id);
    }
}

/// An RAII guard that credits an account on creation and sets its balance
/// to zero on drop.
#[must_use = "TemporaryBalance must be bound to a variable, otherwise the balance is released immediately"]
pub struct TemporaryBalance<'a, S: StateDatabase + ?Sized> {
    state: &'a mut S,
    address: Address,
}

impl<'a, S: StateDatabase + ?Sized> TemporaryBalance<'a, S> {
    /// Sets the balance of `address` to `amount` until the guard is dropped.
    pub fn new(state: &'a mut S, address: Address, amount: U256) -> Result<Self, StateError> {
        state.set_balance(&address, amount)?;
        Ok(Self { state, address })
    }
}

impl<S: StateDatabase + ?Sized> Deref for TemporaryBalance<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.state
    }
}

impl<S: StateDatabase + ?Sized> DerefMut for TemporaryBalance<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.state
    }
}

impl<S: StateDatabase + ?Sized> Drop for TemporaryBalance<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.state.set_balance(&self.address, U256::zero()) {
            tracing::error!(
                target: "state",
                address = ?self.address,
                error = %e,
                "Failed to release temporary balance"
            );
        }
    }
}
