// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
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

//! # Range Kernel Types
//!
//! This crate is the foundational library for the Range kernel, containing the
//! chain primitives, the fixed system contract address registry, the governance
//! contract ABIs, error types and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `range-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This structure prevents
//! circular dependencies and provides a stable, canonical definition for shared
//! types like `Header`, `Transaction`, `Receipt` and the error enums.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::ConsensusError> = std::result::Result<T, E>;

/// JSON ABIs of the governance contracts the engine talks to.
pub mod abi;
/// The canonical, deterministic binary codec for consensus-critical data.
pub mod codec;
/// Engine configuration loaded from TOML.
pub mod config;
/// A unified set of all error types used across the kernel.
pub mod error;
/// Block headers and blocks.
pub mod header;
/// Protocol constants: system contract addresses, gas figures and versioning.
pub mod params;
/// Hash, address and amount primitives plus Keccak-256 helpers.
pub mod primitives;
/// Receipts, logs and bloom construction.
pub mod receipt;
/// Transactions, their authorization kinds and execution messages.
pub mod transaction;

pub use primitives::{Address, Bloom, H256, U256};
