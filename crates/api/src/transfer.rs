// Path: crates/api/src/transfer.rs

//! Blacklist and whitelist queries.
//!
//! Both sets live in the storage of dedicated system accounts, keyed by the
//! left-padded address. The executor consults [`can_transfer`] before moving
//! value, and the engine uses the same queries when draining.

use crate::state::StateDatabase;
use range_types::error::StateError;
use range_types::params::{BLACKLIST, WHITELIST};
use range_types::primitives::address_key;
use range_types::{Address, U256};

/// Whether `address` is in the consensus blacklist.
pub fn is_blacklisted<S: StateDatabase + ?Sized>(
    state: &S,
    address: &Address,
) -> Result<bool, StateError> {
    Ok(!state.storage(&BLACKLIST, &address_key(address))?.is_zero())
}

/// Whether `address` is in the consensus whitelist.
pub fn is_whitelisted<S: StateDatabase + ?Sized>(
    state: &S,
    address: &Address,
) -> Result<bool, StateError> {
    Ok(!state.storage(&WHITELIST, &address_key(address))?.is_zero())
}

/// Whether `address` may send `amount`.
///
/// The balance must cover the amount. A blacklisted sender may only move a
/// zero amount unless it is also whitelisted.
pub fn can_transfer<S: StateDatabase + ?Sized>(
    state: &S,
    address: &Address,
    amount: U256,
) -> Result<bool, StateError> {
    if state.balance(address)? < amount {
        return Ok(false);
    }
    if amount.is_zero() {
        return Ok(true);
    }
    Ok(!is_blacklisted(state, address)? || is_whitelisted(state, address)?)
}
