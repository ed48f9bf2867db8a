// Path: crates/types/src/config/mod.rs

//! Engine configuration.
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration for a non-producing node.

use crate::primitives::Address;
use serde::{Deserialize, Serialize};

fn default_call_gas() -> u64 {
    1_000_000
}

fn default_xfer_gas() -> u64 {
    2_000_000
}

fn default_unlimited_gas() -> u64 {
    40_000_000
}

/// Configuration for the governance finalization engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Key the migration transaction is signed with. Required only on the
    /// node producing the migration block.
    #[serde(default)]
    pub migration_signer: Option<Address>,
    /// Expected upper bound for read-only governance calls. Exceeding it is
    /// logged, never enforced.
    #[serde(default = "default_call_gas")]
    pub call_gas: u64,
    /// Gas limit of synthesized value-transfer transactions.
    #[serde(default = "default_xfer_gas")]
    pub xfer_gas: u64,
    /// Gas given to calls that must not run out, such as registry enumeration.
    #[serde(default = "default_unlimited_gas")]
    pub unlimited_gas: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            migration_signer: None,
            call_gas: default_call_gas(),
            xfer_gas: default_xfer_gas(),
            unlimited_gas: default_unlimited_gas(),
        }
    }
}

impl EngineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
