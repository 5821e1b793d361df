use std::fs;

use backbeat_core::{
    AdvanceStopReason, Cell, Choice, ContentPack, Game, GameConfig, InputPayload, Interrupt,
    JournalLoadError, JournalWriter, RowKind, load_journal_from_file, replay_to_end,
};

const PATTERN: [Cell; 4] = [
    Cell::new(RowKind::Kick, 0),
    Cell::new(RowKind::Snare, 4),
    Cell::new(RowKind::ClosedHat, 8),
    Cell::new(RowKind::OpenHat, 12),
];

/// Plays a full run, writing every accepted input to `writer`.
fn play_to_file(game: &mut Game, writer: &mut JournalWriter) {
    for _ in 0..4_000 {
        let result = game.advance(100);
        match result.stop_reason {
            AdvanceStopReason::Finished(_) => return,
            AdvanceStopReason::Interrupted(ref interrupt) => {
                let choice = match interrupt {
                    Interrupt::AwaitingWaveStart { .. } => {
                        for cell in PATTERN {
                            if game.place_alien(cell).is_ok() {
                                writer
                                    .append(
                                        game.current_frame(),
                                        &InputPayload::PlaceAlien { cell },
                                    )
                                    .unwrap();
                            }
                        }
                        Choice::StartWave
                    }
                    Interrupt::CardOffer { cards, .. } => {
                        Choice::PickCard((cards.len() - 1) as u8)
                    }
                };
                let prompt_id = interrupt.prompt_id();
                writer
                    .append(
                        game.current_frame(),
                        &InputPayload::Choice { prompt_id, choice: choice.clone() },
                    )
                    .unwrap();
                game.apply_choice(prompt_id, choice).unwrap();
            }
            _ => {}
        }
    }
    panic!("game did not finish within budget");
}

/// Play a full game recording inputs to a JSONL file, then load the file
/// and replay to completion. The snapshot hash must match.
#[test]
fn file_journal_replay_matches_the_live_run() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("session.jsonl");
    let content = ContentPack::default();
    let seed = 12345u64;

    let mut game = Game::new(seed, &content);
    let mut writer =
        JournalWriter::create(&journal_path, seed, "test", content.content_hash()).unwrap();
    play_to_file(&mut game, &mut writer);
    drop(writer);

    let loaded = load_journal_from_file(&journal_path).unwrap();
    let replayed = replay_to_end(&content, &GameConfig::default(), &loaded.journal).unwrap();

    assert_eq!(game.snapshot_hash(), replayed.final_snapshot_hash);
    assert_eq!(game.current_frame(), replayed.final_frame);
}

/// A corrupted record stops the loader at that line instead of yielding a
/// silently different run.
#[test]
fn corrupted_file_stops_at_the_bad_line() {
    let dir = tempfile::tempdir().unwrap();
    let journal_path = dir.path().join("corrupt.jsonl");
    let content = ContentPack::default();

    let mut game = Game::new(42, &content);
    let mut writer =
        JournalWriter::create(&journal_path, 42, "test", content.content_hash()).unwrap();
    play_to_file(&mut game, &mut writer);
    drop(writer);

    let text = fs::read_to_string(&journal_path).unwrap();
    let mut lines: Vec<String> = text.lines().map(String::from).collect();
    assert!(lines.len() > 3);
    lines[2] = lines[2].replace("\"step\":4", "\"step\":5");
    fs::write(&journal_path, lines.join("\n") + "\n").unwrap();

    let result = load_journal_from_file(&journal_path);
    assert!(
        matches!(result, Err(JournalLoadError::HashChainBroken { line: 3 })),
        "expected a broken chain at line 3, got {result:?}"
    );
}
