// Path: crates/types/src/params.rs

//! Protocol constants.
//!
//! System contract addresses are fixed at compile time and never reassigned.
//! Two address sets exist: the current proxies (`0x300..0x30C`) and the V1
//! implementations (`0x310..0x319`). Both sets are whitelisted.

use crate::primitives::{Address, H256};
use ethereum_types::H160;

const fn system_address(id: u16) -> Address {
    let [hi, lo] = id.to_be_bytes();
    H160([0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, hi, lo])
}

/// Block reward proxy; receives the per-block `reward()` call.
pub const BLOCK_REWARD: Address = system_address(0x300);
/// Treasury proxy; receives drained balances.
pub const TREASURY: Address = system_address(0x301);
/// Masternode registry proxy.
pub const MASTERNODE_REGISTRY: Address = system_address(0x302);
/// Staker reward proxy.
pub const STAKER_REWARD: Address = system_address(0x303);
/// Backbone reward proxy.
pub const BACKBONE_REWARD: Address = system_address(0x304);
/// Spork registry proxy.
pub const SPORK_REGISTRY: Address = system_address(0x305);
/// Checkpoint registry proxy.
pub const CHECKPOINT_REGISTRY: Address = system_address(0x306);
/// Blacklist registry proxy; source of blocked and drainable addresses.
pub const BLACKLIST_REGISTRY: Address = system_address(0x307);
/// Gen2 migration contract. A header whose coinbase equals this address
/// marks the migration block.
pub const MIGRATION_CONTRACT: Address = system_address(0x308);
/// Masternode collateral token proxy.
pub const MASTERNODE_TOKEN: Address = system_address(0x309);
/// Consensus-side storage account mirroring blacklisted addresses.
pub const BLACKLIST: Address = system_address(0x30A);
/// Consensus-side storage account mirroring whitelisted addresses.
pub const WHITELIST: Address = system_address(0x30B);
/// Consensus-side storage account mirroring active masternodes.
pub const MASTERNODE_LIST: Address = system_address(0x30C);

/// Block reward V1 implementation.
pub const BLOCK_REWARD_V1: Address = system_address(0x310);
/// Treasury V1 implementation.
pub const TREASURY_V1: Address = system_address(0x311);
/// Masternode registry V1 implementation.
pub const MASTERNODE_REGISTRY_V1: Address = system_address(0x312);
/// Staker reward V1 implementation.
pub const STAKER_REWARD_V1: Address = system_address(0x313);
/// Backbone reward V1 implementation.
pub const BACKBONE_REWARD_V1: Address = system_address(0x314);
/// Spork registry V1 implementation.
pub const SPORK_REGISTRY_V1: Address = system_address(0x315);
/// Checkpoint registry V1 implementation.
pub const CHECKPOINT_REGISTRY_V1: Address = system_address(0x316);
/// Blacklist registry V1 implementation.
pub const BLACKLIST_REGISTRY_V1: Address = system_address(0x317);
/// Compensation fund V1 implementation.
pub const COMPENSATION_FUND_V1: Address = system_address(0x318);
/// Masternode token V1 implementation.
pub const MASTERNODE_TOKEN_V1: Address = system_address(0x319);

/// Sender of every consensus-synthesized transaction. Holds a balance only
/// for the duration of a single finalization step.
pub const SYSTEM_FAUCET: Address = system_address(0x320);
/// Scratch account for throwaway execution ("Ephemeral" in ASCII).
pub const EPHEMERAL: Address = H160([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x45, 0x70, 0x68, 0x65, 0x6d, 0x65, 0x72, 0x61, 0x6c,
]);

/// Every system contract address of both generations. This is the fixed
/// protocol whitelist mirrored into [`WHITELIST`].
pub const SYSTEM_CONTRACTS: [Address; 23] = [
    BLOCK_REWARD,
    TREASURY,
    MASTERNODE_REGISTRY,
    STAKER_REWARD,
    BACKBONE_REWARD,
    SPORK_REGISTRY,
    CHECKPOINT_REGISTRY,
    BLACKLIST_REGISTRY,
    MIGRATION_CONTRACT,
    MASTERNODE_TOKEN,
    BLACKLIST,
    WHITELIST,
    MASTERNODE_LIST,
    BLOCK_REWARD_V1,
    TREASURY_V1,
    MASTERNODE_REGISTRY_V1,
    STAKER_REWARD_V1,
    BACKBONE_REWARD_V1,
    SPORK_REGISTRY_V1,
    CHECKPOINT_REGISTRY_V1,
    BLACKLIST_REGISTRY_V1,
    COMPENSATION_FUND_V1,
    MASTERNODE_TOKEN_V1,
];

/// Value stored in registry mirror slots for present entries.
pub const STORAGE_MARKER: H256 = H256([
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
]);

/// Gas reserved per snapshot owner in the migration block.
pub const GAS_PER_MIGRATION_ENTRY: u64 = 100_000;

/// Gen2 amounts carry 8 decimals, Gen3 amounts carry 18.
pub const MIGRATION_AMOUNT_SCALE: u64 = 10_000_000_000;

/// Engine identifier written into the migration header's extra data.
pub const ENGINE_TAG: &str = "range3";

/// The protocol version as `major << 16 | minor << 8 | patch`.
pub fn protocol_version() -> u32 {
    let part = |s: &str| s.parse::<u32>().unwrap_or(0);
    let major = part(env!("CARGO_PKG_VERSION_MAJOR"));
    let minor = part(env!("CARGO_PKG_VERSION_MINOR"));
    let patch = part(env!("CARGO_PKG_VERSION_PATCH"));
    (major << 16) | (minor << 8) | patch
}
