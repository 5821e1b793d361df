use backbeat_core::{
    AdvanceStopReason, Cell, Choice, ContentPack, Game, GameConfig, Interrupt, LogEvent, Phase,
    RowKind, RunOutcome,
};

/// Plays with the same dense pattern every wave and always takes the first card.
fn autoplay(game: &mut Game, max_batches: usize) -> Option<RunOutcome> {
    let pattern = [
        Cell::new(RowKind::Kick, 0),
        Cell::new(RowKind::ClosedHat, 0),
        Cell::new(RowKind::Snare, 0),
        Cell::new(RowKind::Kick, 8),
        Cell::new(RowKind::ClosedHat, 8),
        Cell::new(RowKind::Tom, 8),
        Cell::new(RowKind::Snare, 4),
        Cell::new(RowKind::Snare, 12),
    ];
    for _ in 0..max_batches {
        match game.advance(120).stop_reason {
            AdvanceStopReason::Finished(outcome) => return Some(outcome),
            AdvanceStopReason::Interrupted(interrupt) => {
                let choice = match interrupt {
                    Interrupt::AwaitingWaveStart { .. } => {
                        for cell in pattern {
                            let _ = game.place_alien(cell);
                        }
                        Choice::StartWave
                    }
                    Interrupt::CardOffer { .. } => Choice::PickCard(0),
                };
                game.apply_choice(interrupt.prompt_id(), choice).expect("autoplay choice");
            }
            _ => {}
        }
    }
    None
}

#[test]
fn a_full_run_reaches_a_terminal_phase() {
    let mut game = Game::new(2024, &ContentPack::default());
    let outcome = autoplay(&mut game, 2_000).expect("run should finish");
    assert!(game.state().phase.is_terminal());
    assert_eq!(game.finished_outcome(), Some(outcome));
    assert!(game.log().iter().any(|event| matches!(event, LogEvent::StepTriggered { .. })));
}

#[test]
fn short_runs_can_be_won() {
    let config = GameConfig { final_wave: 1, base_loops: 40, ..GameConfig::default() };
    let mut game = Game::with_config(8, &ContentPack::default(), config).unwrap();
    let outcome = autoplay(&mut game, 2_000).expect("run should finish");
    // Forty loops of a dense pattern outlast a 40 HP defender.
    assert_eq!(outcome, RunOutcome::Victory);
    assert_eq!(game.state().phase, Phase::Victory);
    assert!(game.state().score >= 100);
}

#[test]
fn share_code_round_trips_a_played_pattern() {
    let mut game = Game::new(5, &ContentPack::default());
    game.place_alien(Cell::new(RowKind::Kick, 0)).unwrap();
    game.place_alien(Cell::new(RowKind::ClosedHat, 15)).unwrap();
    let code = game.state().pattern.share_code();
    let cells = backbeat_core::decode_share_code(&code).unwrap();
    assert_eq!(cells, vec![Cell::new(RowKind::Kick, 0), Cell::new(RowKind::ClosedHat, 15)]);
}
