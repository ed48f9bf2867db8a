// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Range Kernel Test Utilities
//!
//! In-memory collaborators for testing the finalization engine: a journaled
//! state database with a reference-counted root store, a governance contract
//! emulator, a minimal chain, deterministic test signers and snapshot fixtures.

pub mod chain;
pub mod fixtures;
pub mod governance;
pub mod signer;
pub mod state;

pub use chain::TestChain;
pub use governance::GovernanceEmulator;
pub use signer::{TestSealRecovery, TestSigner};
pub use state::{MemoryState, StateStore};
