// Path: crates/types/src/abi.rs

//! JSON ABIs of the governance contracts.
//!
//! Only the functions the finalization layer and its tooling call are listed.
//! The contracts themselves are deployed at the addresses in
//! [`crate::params`].

use ethabi::Contract;

/// Masternode registry: activation and enumeration of masternodes.
pub const MASTERNODE_REGISTRY_ABI: &str = r#"[
  {"type":"function","name":"enumerateActive","stateMutability":"view",
   "inputs":[],
   "outputs":[{"name":"masternodes","type":"address[]"}]},
  {"type":"function","name":"announce","stateMutability":"nonpayable",
   "inputs":[{"name":"masternode","type":"address"},
             {"name":"ipv4address","type":"uint32"},
             {"name":"enode","type":"bytes32[2]"}],
   "outputs":[]},
  {"type":"function","name":"denounce","stateMutability":"nonpayable",
   "inputs":[{"name":"masternode","type":"address"}],
   "outputs":[]}
]"#;

/// Masternode token: collateral deposits backing masternode announcements.
pub const MASTERNODE_TOKEN_ABI: &str = r#"[
  {"type":"function","name":"depositCollateral","stateMutability":"payable",
   "inputs":[],
   "outputs":[]},
  {"type":"function","name":"withdrawCollateral","stateMutability":"nonpayable",
   "inputs":[{"name":"amount","type":"uint256"}],
   "outputs":[]},
  {"type":"function","name":"balanceOf","stateMutability":"view",
   "inputs":[{"name":"owner","type":"address"}],
   "outputs":[{"name":"balance","type":"uint256"}]}
]"#;

/// Block reward: per-block reward computation and distribution.
pub const BLOCK_REWARD_ABI: &str = r#"[
  {"type":"function","name":"getReward","stateMutability":"view",
   "inputs":[{"name":"blockNumber","type":"uint256"}],
   "outputs":[{"name":"amount","type":"uint256"}]},
  {"type":"function","name":"reward","stateMutability":"payable",
   "inputs":[],
   "outputs":[]}
]"#;

/// Blacklist registry: governance proposals to freeze and drain accounts.
pub const BLACKLIST_REGISTRY_ABI: &str = r#"[
  {"type":"function","name":"propose","stateMutability":"payable",
   "inputs":[{"name":"addr","type":"address"}],
   "outputs":[{"name":"proposal","type":"address"}]},
  {"type":"function","name":"proposeDrain","stateMutability":"payable",
   "inputs":[{"name":"addr","type":"address"}],
   "outputs":[{"name":"proposal","type":"address"}]},
  {"type":"function","name":"enumerateBlocked","stateMutability":"view",
   "inputs":[],
   "outputs":[{"name":"addresses","type":"address[]"}]},
  {"type":"function","name":"enumerateDrainable","stateMutability":"view",
   "inputs":[],
   "outputs":[{"name":"addresses","type":"address[]"}]},
  {"type":"function","name":"isBlacklisted","stateMutability":"view",
   "inputs":[{"name":"addr","type":"address"}],
   "outputs":[{"name":"blocked","type":"bool"}]}
]"#;

/// Governance proposal created by the blacklist registry.
pub const PROPOSAL_ABI: &str = r#"[
  {"type":"function","name":"voteAccept","stateMutability":"nonpayable",
   "inputs":[],
   "outputs":[]},
  {"type":"function","name":"voteReject","stateMutability":"nonpayable",
   "inputs":[],
   "outputs":[]},
  {"type":"function","name":"isAccepted","stateMutability":"view",
   "inputs":[],
   "outputs":[{"name":"accepted","type":"bool"}]}
]"#;

/// Gen2 migration contract: one-time snapshot installation.
pub const GEN2_MIGRATION_ABI: &str = r#"[
  {"type":"function","name":"setSnapshot","stateMutability":"nonpayable",
   "inputs":[{"name":"owners","type":"address[]"},
             {"name":"amounts","type":"uint256[]"},
             {"name":"blacklist","type":"address[]"}],
   "outputs":[]},
  {"type":"function","name":"totalAmount","stateMutability":"view",
   "inputs":[],
   "outputs":[{"name":"amount","type":"uint256"}]}
]"#;

/// Parses one of the ABI documents above.
pub fn load(json: &str) -> Result<Contract, ethabi::Error> {
    Contract::load(json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_abis_parse() {
        for json in [
            MASTERNODE_REGISTRY_ABI,
            MASTERNODE_TOKEN_ABI,
            BLOCK_REWARD_ABI,
            BLACKLIST_REGISTRY_ABI,
            PROPOSAL_ABI,
            GEN2_MIGRATION_ABI,
        ] {
            load(json).unwrap();
        }
    }

    #[test]
    fn selectors_match_solidity_signatures() {
        let selector = |sig: &str| {
            let digest = crate::primitives::keccak256(sig.as_bytes());
            let mut out = [0u8; 4];
            out.copy_from_slice(&digest.as_bytes()[..4]);
            out
        };

        let registry = load(MASTERNODE_REGISTRY_ABI).unwrap();
        let f = registry.function("enumerateActive").unwrap();
        assert_eq!(f.short_signature(), selector("enumerateActive()"));

        let migration = load(GEN2_MIGRATION_ABI).unwrap();
        let f = migration.function("setSnapshot").unwrap();
        assert_eq!(
            f.short_signature(),
            selector("setSnapshot(address[],uint256[],address[])")
        );
    }
}
