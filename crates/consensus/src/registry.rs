// Path: crates/consensus/src/registry.rs

//! Mirroring of governance address sets into consensus storage.

use range_api::state::{KeepStorage, StateDatabase};
use range_types::error::StateError;
use range_types::params::STORAGE_MARKER;
use range_types::primitives::address_key;
use range_types::Address;

/// Counts of a mirror pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MirrorDelta {
    pub added: usize,
    pub removed: usize,
}

/// Makes the storage of `account` hold exactly the marker for each address
/// in `members`, deleting every other slot. Newly added addresses are passed
/// to `on_added`.
pub(crate) fn mirror_addresses<'a>(
    state: &mut dyn StateDatabase,
    account: &Address,
    members: impl IntoIterator<Item = &'a Address>,
    mut on_added: impl FnMut(&Address),
) -> Result<MirrorDelta, StateError> {
    let mut keep = KeepStorage::new();
    let mut delta = MirrorDelta::default();
    for member in members {
        let key = address_key(member);
        if !keep.insert(key) {
            continue;
        }
        if state.storage(account, &key)? != STORAGE_MARKER {
            state.set_storage(account, key, STORAGE_MARKER)?;
            delta.added += 1;
            on_added(member);
        }
    }
    delta.removed = state.cleanup_storage(account, &keep)?;
    Ok(delta)
}
