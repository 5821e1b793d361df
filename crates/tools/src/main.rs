//! Replays a recorded JSONL journal headlessly and prints the final state.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use backbeat_core::{ContentPack, load_journal_from_file, replay_to_end};
use backbeat_tools::{init_tracing, load_config};
use clap::Parser;

#[derive(Parser)]
#[command(name = "backbeat-replay", version, about = "Replay a Backbeat Assault input journal")]
struct Args {
    /// Path to the `.jsonl` journal written by the app
    journal: PathBuf,
    /// TOML run config the journal was recorded with
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Fail unless the final snapshot hash matches (`0x` + 16 hex digits)
    #[arg(long)]
    expect_hash: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let loaded = load_journal_from_file(&args.journal)
        .with_context(|| format!("failed to load journal {}", args.journal.display()))?;
    let journal = loaded.journal;
    tracing::info!(
        seed = journal.seed,
        inputs = journal.inputs.len(),
        build = %journal.build_id,
        "replaying journal"
    );

    let content = ContentPack::default();
    let result = replay_to_end(&content, &config, &journal).context("replay failed")?;
    let hash_hex = format!("0x{:016x}", result.final_snapshot_hash);
    tracing::info!(outcome = ?result.final_outcome, frame = result.final_frame, "replay finished");

    println!("Outcome:       {:?}", result.final_outcome);
    println!("Final frame:   {}", result.final_frame);
    println!("Final wave:    {}", result.final_wave);
    println!("Final score:   {}", result.final_score);
    println!("Snapshot hash: {hash_hex}");

    if let Some(expected) = args.expect_hash
        && !expected.eq_ignore_ascii_case(&hash_hex)
    {
        bail!("snapshot hash {hash_hex} does not match expected {expected}");
    }
    Ok(())
}
