// Path: crates/consensus/src/bin/range_migration.rs
#![forbid(unsafe_code)]

//! Offline tooling for the Gen2 migration block.
//!
//! `calldata` prints the `setSnapshot` payload a snapshot produces, and
//! `verify` checks a migration transaction payload against a snapshot.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use range_consensus::migration::{migration_call_data, Snapshot, SnapshotParams};
use range_consensus::GovernanceAbis;
use range_telemetry::init::{init_tracing_with, LogFormat};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[clap(name = "range-migration", about = "Gen2 migration snapshot tooling")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the setSnapshot call data derived from a snapshot.
    Calldata {
        #[clap(long)]
        snapshot: PathBuf,
    },
    /// Check a hex-encoded migration payload against a snapshot.
    Verify {
        #[clap(long)]
        snapshot: PathBuf,
        #[clap(long)]
        payload: String,
    },
}

fn derive_call_data(path: &Path) -> Result<(SnapshotParams, Vec<u8>)> {
    let snapshot = Snapshot::from_file(path)
        .with_context(|| format!("failed to load snapshot {}", path.display()))?;
    let params = SnapshotParams::from_snapshot(&snapshot)?;
    let abis = GovernanceAbis::load()?;
    let data = migration_call_data(&abis, &params)?;
    tracing::info!(
        target: "migration",
        hash = %snapshot.hash,
        owners = params.owners.len(),
        "Snapshot loaded"
    );
    Ok((params, data))
}

fn main() -> Result<()> {
    init_tracing_with(LogFormat::Compact, "info")?;
    let opts = Opts::parse();

    match opts.command {
        Command::Calldata { snapshot } => {
            let (params, data) = derive_call_data(&snapshot)?;
            println!("owners:       {}", params.owners.len());
            println!("blacklisted:  {}", params.blacklist.len());
            println!("total amount: {}", params.total_amount());
            println!("gas limit:    {}", params.gas_limit());
            println!("0x{}", hex::encode(data));
        }
        Command::Verify { snapshot, payload } => {
            let (_, expected) = derive_call_data(&snapshot)?;
            let payload = payload.trim();
            let payload = hex::decode(payload.strip_prefix("0x").unwrap_or(payload))
                .map_err(|e| anyhow!("payload is not valid hex: {}", e))?;
            if payload != expected {
                bail!(
                    "payload mismatch: got {} bytes, snapshot derives {} bytes",
                    payload.len(),
                    expected.len()
                );
            }
            println!("payload matches snapshot");
        }
    }
    Ok(())
}
