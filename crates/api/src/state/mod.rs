// Path: crates/api/src/state/mod.rs
//! Core traits for state management.
//!
//! This module defines the interface to the account state database and the
//! RAII guards the engine uses to scope speculative changes:
//! - `StateDatabase`: account balances, nonces, storage, journaling and logs.
//! - `StateCheckpoint`: snapshot on creation, revert on drop.
//! - `TemporaryBalance`: credit an account for one step, zero it on drop.

mod checkpoint;
mod database;

pub use checkpoint::{StateCheckpoint, TemporaryBalance};
pub use database::{KeepStorage, StateDatabase};
