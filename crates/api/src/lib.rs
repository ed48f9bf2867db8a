// Path: crates/api/src/lib.rs

//! # Range Kernel API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
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
#![deny(missing_docs)]
//! # Range Kernel API
//!
//! Traits for the collaborators the finalization engine drives: the state
//! database, the contract execution engine, chain access, transaction signers
//! and seal recovery. Also hosts the scoped state guards and the
//! transfer-ability queries shared by the engine and the executor.

/// Chain access and chain-level configuration.
pub mod chain;
/// Seal signature recovery.
pub mod crypto;
/// Re-exports all core error types from the central `range-types` crate.
pub mod error;
/// The contract execution engine interface.
pub mod execution;
/// The state database interface and scoped guards over it.
pub mod state;
/// Transaction signers and the producer key store.
pub mod transaction;
/// Blacklist and whitelist queries gating value transfers.
pub mod transfer;
