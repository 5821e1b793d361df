//! Randomized soak runs: random patterns and card picks across many seeds,
//! checking state invariants and that every run replays to the same hash.

use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use backbeat_core::state::{FIELD_WIDTH, THREAT_TRACE_LEN};
use backbeat_core::{
    AdvanceStopReason, Cell, Choice, ContentPack, Game, GameConfig, InputJournal, InputPayload,
    Interrupt, ROWS, RowKind, RunOutcome, STEPS, decode_share_code, replay_to_end,
};
use backbeat_tools::{init_tracing, load_config};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Frames per `advance` call between invariant checks.
const CHECK_INTERVAL_FRAMES: u32 = 120;
/// Random placements attempted at each wave-start prompt.
const PLACEMENT_ATTEMPTS: u32 = 12;

#[derive(Parser)]
#[command(name = "backbeat-fuzz", version, about = "Soak-test the simulation across seeds")]
struct Args {
    /// First seed to run
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of consecutive seeds to run
    #[arg(short = 'n', long, default_value_t = 20)]
    seeds: u64,
    /// Give up on a run after this many frames
    #[arg(long, default_value_t = 200_000)]
    max_frames: u64,
    /// Share code placed at every wave start instead of random cells
    #[arg(short, long)]
    pattern: Option<String>,
    /// TOML run config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct RunSummary {
    outcome: Option<RunOutcome>,
    frames: u64,
    wave: u32,
    score: i64,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let fixed_pattern = args
        .pattern
        .as_deref()
        .map(decode_share_code)
        .transpose()
        .context("invalid --pattern share code")?;
    let content = ContentPack::default();

    let (mut victories, mut defeats, mut unfinished) = (0u32, 0u32, 0u32);
    for seed in args.seed..args.seed.saturating_add(args.seeds) {
        let summary = soak_run(seed, &content, &config, fixed_pattern.as_deref(), args.max_frames)
            .with_context(|| format!("seed {seed}"))?;
        match summary.outcome {
            Some(RunOutcome::Victory) => victories += 1,
            Some(RunOutcome::Defeat) => defeats += 1,
            None => unfinished += 1,
        }
        tracing::info!(
            seed,
            outcome = ?summary.outcome,
            frames = summary.frames,
            wave = summary.wave,
            score = summary.score,
            "run complete"
        );
    }

    println!(
        "{} seeds: {victories} victories, {defeats} defeats, {unfinished} hit the frame cap",
        args.seeds
    );
    Ok(())
}

fn soak_run(
    seed: u64,
    content: &ContentPack,
    config: &GameConfig,
    fixed_pattern: Option<&[Cell]>,
    max_frames: u64,
) -> Result<RunSummary> {
    let mut game = Game::with_config(seed, content, config.clone())?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0xF022);
    let mut journal = InputJournal::new(seed, content);
    let mut last_score = 0;

    let outcome = loop {
        if game.current_frame() >= max_frames {
            tracing::warn!(seed, frame = game.current_frame(), "frame cap reached");
            break None;
        }
        let result = game.advance(CHECK_INTERVAL_FRAMES);
        check_invariants(&game, last_score)?;
        last_score = game.state().score;

        match result.stop_reason {
            AdvanceStopReason::Finished(outcome) => break Some(outcome),
            AdvanceStopReason::Interrupted(interrupt) => {
                answer_prompt(&mut game, &mut rng, &mut journal, interrupt, fixed_pattern)?;
            }
            AdvanceStopReason::PausedAtBoundary { .. } | AdvanceStopReason::FrameLimitReached => {}
        }
    };

    if let Some(outcome) = outcome {
        let replayed = replay_to_end(content, config, &journal).context("replay of soak run")?;
        ensure!(replayed.final_outcome == outcome, "replay outcome diverged");
        ensure!(
            replayed.final_snapshot_hash == game.snapshot_hash(),
            "replay hash {:#018x} != live {:#018x}",
            replayed.final_snapshot_hash,
            game.snapshot_hash()
        );
    }

    Ok(RunSummary {
        outcome,
        frames: game.current_frame(),
        wave: game.state().wave,
        score: game.state().score,
    })
}

fn answer_prompt(
    game: &mut Game,
    rng: &mut ChaCha8Rng,
    journal: &mut InputJournal,
    interrupt: Interrupt,
    fixed_pattern: Option<&[Cell]>,
) -> Result<()> {
    let frame = game.current_frame();
    let prompt_id = interrupt.prompt_id();
    let choice = match interrupt {
        Interrupt::AwaitingWaveStart { wave, .. } => {
            let cells = match fixed_pattern {
                Some(cells) => cells.to_vec(),
                None => (0..PLACEMENT_ATTEMPTS).map(|_| random_cell(rng)).collect(),
            };
            for cell in cells {
                if game.place_alien(cell).is_ok() {
                    journal.append(frame, InputPayload::PlaceAlien { cell });
                }
            }
            tracing::debug!(wave, pattern = %game.state().pattern.share_code(), "wave start");
            Choice::StartWave
        }
        Interrupt::CardOffer { cards, .. } => {
            // One extra slot so skipping is as likely as any single card.
            let pick = rng.next_u32() as usize % (cards.len() + 1);
            if pick < cards.len() { Choice::PickCard(pick as u8) } else { Choice::SkipCards }
        }
    };
    game.apply_choice(prompt_id, choice.clone())
        .with_context(|| format!("choice {choice:?} rejected at frame {frame}"))?;
    journal.append_choice(frame, prompt_id, choice);
    Ok(())
}

fn random_cell(rng: &mut ChaCha8Rng) -> Cell {
    let row = RowKind::ALL[(rng.next_u32() as usize) % ROWS];
    Cell::new(row, (rng.next_u32() % STEPS as u32) as u8)
}

fn check_invariants(game: &Game, last_score: i64) -> Result<()> {
    let state = game.state();
    let frame = game.current_frame();
    ensure!(
        state.budget.spent <= state.budget.max,
        "frame {frame}: spent {} exceeds budget {}",
        state.budget.spent,
        state.budget.max
    );
    ensure!(
        state.budget.spent == state.pattern.total_paid(),
        "frame {frame}: budget and pattern disagree"
    );
    ensure!(state.score >= last_score, "frame {frame}: score went down");
    ensure!(
        (0.0..=FIELD_WIDTH).contains(&state.defender.pos.x),
        "frame {frame}: defender left the field at x={}",
        state.defender.pos.x
    );
    ensure!(state.threat_trace.len() <= THREAT_TRACE_LEN, "frame {frame}: threat trace overflow");
    for alien in state.aliens.values() {
        if !state.pattern.is_active(alien.cell) {
            bail!("frame {frame}: alien at {:?} has no pattern cell", alien.cell);
        }
    }
    Ok(())
}
