//! Text formatting for prompts, status lines, the HUD, recaps, and log entries.

use app::app_loop::{AppMode, AppState};
use app::{format_snapshot_hash, reason_code};
use backbeat_core::content::card_info;
use backbeat_core::{Game, Interrupt, LogEvent, Phase, RunOutcome};

pub fn status_text(app_state: &AppState) -> String {
    let mode_text = match &app_state.mode {
        AppMode::PendingPrompt { interrupt, .. } => prompt_text(interrupt),
        AppMode::Finished(outcome) => format!("Finished: {}", reason_code(outcome)),
        AppMode::AutoPlay => "Playing (Space to pause)".to_string(),
        AppMode::Paused => "Paused (Space to play, . to step)".to_string(),
    };
    match &app_state.last_rejection {
        Some(err) => format!("{mode_text} | rejected: {err}"),
        None => mode_text,
    }
}

pub fn prompt_text(interrupt: &Interrupt) -> String {
    match interrupt {
        Interrupt::AwaitingWaveStart { wave, .. } => {
            format!("Wave {wave}: edit the grid, S to start")
        }
        Interrupt::CardOffer { cards, .. } => {
            let options: Vec<String> = cards
                .iter()
                .enumerate()
                .map(|(index, card)| format!("{}={}", index + 1, card_info(*card).name))
                .collect();
            format!("Pick a card ({}, X=skip)", options.join(", "))
        }
    }
}

pub fn phase_label(phase: Phase) -> String {
    match phase {
        Phase::Prepare { frames_left } => format!("Prepare ({frames_left})"),
        other => format!("{other:?}"),
    }
}

pub fn hud_lines(game: &Game, run_seed: u64) -> Vec<String> {
    let state = game.state();
    let defender = &state.defender;
    let mut lines = vec![
        format!("Wave {} ({:?}) - {}", state.wave, state.scaling.kind, phase_label(state.phase)),
        format!("Score: {}", state.score),
        format!("Budget: {}/{}", state.budget.spent, state.budget.max),
        format!("Defender HP: {}/{}", defender.hp.max(0), defender.max_hp),
        format!(
            "Loop {}/{} @ {} bpm",
            (state.sequencer.loop_index + 1).min(state.sequencer.loops_per_wave),
            state.sequencer.loops_per_wave,
            state.sequencer.bpm
        ),
        format!("Seed: {run_seed}"),
        format!("Pattern: {}", state.pattern.share_code()),
    ];
    if !state.picked_cards.is_empty() {
        let names: Vec<&str> =
            state.picked_cards.iter().map(|card| card_info(*card).name).collect();
        lines.push(format!("Cards: {}", names.join(", ")));
    }
    lines
}

pub fn finished_recap_lines(game: &Game, run_seed: u64, outcome: &RunOutcome) -> Vec<String> {
    let state = game.state();
    let mut lines = vec![
        "Run recap:".to_string(),
        format!("Reason: {}", reason_code(outcome)),
        format!("Seed: {run_seed}"),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
        format!("Wave/Score: {}/{}", state.wave, state.score),
        format!("Frame: {}", game.current_frame()),
        "Threat trace (latest 5):".to_string(),
    ];

    for trace in state.threat_trace.iter().take(5) {
        lines.push(format!(
            "F{} peak={:.2} here={:.2} shots={}",
            trace.frame, trace.peak_threat, trace.current_zone_threat, trace.hostile_projectiles
        ));
    }

    lines
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::PhaseChanged { wave, phase } => {
            format!("wave {wave}: {}", phase_label(*phase))
        }
        LogEvent::LoopStarted { loop_index, aliens } => {
            format!("loop {} with {aliens} aliens", loop_index + 1)
        }
        LogEvent::StepTriggered { step, rows, .. } => format!("step {step}: {rows:?}"),
        LogEvent::AlienPlaced { cell, cost } => {
            format!("placed {:?} @{} for {cost}", cell.row, cell.step)
        }
        LogEvent::AlienRemoved { cell, refund } => {
            format!("removed {:?} @{} (+{refund})", cell.row, cell.step)
        }
        LogEvent::AlienDestroyed { cell } => format!("{:?} @{} destroyed", cell.row, cell.step),
        LogEvent::DefenderHit { damage, tier, hp_left } => {
            format!("hit {damage} ({tier:?}), defender at {hp_left}")
        }
        LogEvent::DecisionChanged { kind } => format!("defender: {kind:?}"),
        LogEvent::BossPattern { pattern } => format!("boss: {pattern:?}"),
        LogEvent::WaveWon { wave, score } => format!("wave {wave} won, score {score}"),
        LogEvent::CardPicked { card } => format!("card: {}", card_info(*card).name),
    }
}
