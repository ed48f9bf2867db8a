// Path: crates/consensus/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! Governance finalization for the Range consensus engine.
//!
//! After the user transactions of a block have executed, [`RangeEngine`]
//! synchronizes governance contract state into consensus-visible accounts,
//! drains blacklisted balances, mints the block reward and, on the one
//! migration block, installs the Gen2 balance snapshot. Every step that
//! creates value does so through a consensus-synthesized transaction so the
//! effect is visible in the block's transaction and receipt lists.

pub mod abi;
pub mod blacklist;
pub mod dos;
pub mod engine;
pub mod masternode;
pub mod migration;
mod registry;
pub mod reward;
pub mod seal;
pub mod signer;

pub use abi::GovernanceAbis;
pub use engine::{FinalizedLists, RangeEngine};
pub use signer::ConsensusSigner;
