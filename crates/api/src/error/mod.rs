// Path: crates/api/src/error/mod.rs
//! Re-exports all core error types from the central `range-types` crate.

pub use range_types::error::*;
