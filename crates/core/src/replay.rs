//! Headless re-execution of a recorded input journal.

use crate::{
    AdvanceStopReason, GameError, RunOutcome,
    config::GameConfig,
    content::ContentPack,
    game::Game,
    journal::{InputJournal, InputPayload, InputRecord},
};

/// Frames simulated per `advance` call while replaying.
const REPLAY_BATCH_FRAMES: u32 = 600;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ReplayError {
    #[error("journal was recorded against content {recorded:#x}, replaying {actual:#x}")]
    ContentMismatch { recorded: u64, actual: u64 },
    #[error(transparent)]
    InvalidConfig(GameError),
    #[error("run stopped for a prompt before input {seq} was due")]
    UnexpectedInterruption { seq: u64 },
    #[error("run finished before input {seq} was due")]
    FinishedEarly { seq: u64 },
    #[error("input {seq} is due at frame {due} but the run is already at frame {frame}")]
    InputOutOfOrder { seq: u64, due: u64, frame: u64 },
    #[error("input {seq} was rejected: {source}")]
    RejectedInput { seq: u64, source: GameError },
    #[error("journal ended while the run was waiting for a prompt")]
    MissingInput,
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub final_outcome: RunOutcome,
    pub final_snapshot_hash: u64,
    pub final_frame: u64,
    pub final_wave: u32,
    pub final_score: i64,
}

pub fn replay_to_end(
    content: &ContentPack,
    config: &GameConfig,
    journal: &InputJournal,
) -> Result<ReplayResult, ReplayError> {
    let actual = content.content_hash();
    if journal.content_hash != actual {
        return Err(ReplayError::ContentMismatch { recorded: journal.content_hash, actual });
    }
    let mut game = Game::with_config(journal.seed, content, config.clone())
        .map_err(ReplayError::InvalidConfig)?;

    for record in &journal.inputs {
        advance_to_boundary(&mut game, record)?;
        apply_record(&mut game, record)
            .map_err(|source| ReplayError::RejectedInput { seq: record.seq, source })?;
    }

    loop {
        match game.advance(REPLAY_BATCH_FRAMES).stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                return Ok(ReplayResult {
                    final_outcome: outcome,
                    final_snapshot_hash: game.snapshot_hash(),
                    final_frame: game.current_frame(),
                    final_wave: game.state().wave,
                    final_score: game.state().score,
                });
            }
            AdvanceStopReason::Interrupted(_) => return Err(ReplayError::MissingInput),
            AdvanceStopReason::PausedAtBoundary { .. } | AdvanceStopReason::FrameLimitReached => {}
        }
    }
}

fn advance_to_boundary(game: &mut Game, record: &InputRecord) -> Result<(), ReplayError> {
    let due = record.tick_boundary;
    if game.current_frame() > due {
        return Err(ReplayError::InputOutOfOrder {
            seq: record.seq,
            due,
            frame: game.current_frame(),
        });
    }
    while game.current_frame() < due {
        let remaining = (due - game.current_frame()).min(u64::from(REPLAY_BATCH_FRAMES)) as u32;
        match game.advance(remaining).stop_reason {
            AdvanceStopReason::Finished(_) => {
                return Err(ReplayError::FinishedEarly { seq: record.seq });
            }
            AdvanceStopReason::Interrupted(_) => {
                return Err(ReplayError::UnexpectedInterruption { seq: record.seq });
            }
            AdvanceStopReason::PausedAtBoundary { .. } | AdvanceStopReason::FrameLimitReached => {}
        }
    }
    Ok(())
}

/// Feeds one journal record to the game the same way a live session would.
pub fn apply_record(game: &mut Game, record: &InputRecord) -> Result<(), GameError> {
    match &record.payload {
        InputPayload::Choice { prompt_id, choice } => {
            game.pending_interrupt();
            game.apply_choice(*prompt_id, choice.clone())
        }
        InputPayload::PlaceAlien { cell } => game.place_alien(*cell).map(|_| ()),
        InputPayload::RemoveAlien { cell } => game.remove_alien(*cell).map(|_| ()),
    }
}
