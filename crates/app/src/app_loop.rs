use backbeat_core::journal::InputPayload;
use backbeat_core::{
    AdvanceStopReason, Cell, Choice, ChoicePromptId, Game, GameError, Interrupt, ROWS, RowKind,
    RunOutcome, STEPS,
};
use macroquad::prelude::KeyCode;

/// Simulation frames advanced per rendered frame while auto-play is on.
pub const AUTO_PLAY_FRAMES_PER_TICK: u32 = 1;

/// An input that was accepted by the simulation this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedInput {
    pub tick_boundary: u64,
    pub payload: InputPayload,
}

#[derive(Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Paused,
    AutoPlay,
    PendingPrompt {
        interrupt: Interrupt,
        prompt_id: ChoicePromptId,
        /// Auto-play resumes once the prompt is answered.
        auto_play_suspended: bool,
    },
    Finished(RunOutcome),
}

pub struct AppState {
    pub mode: AppMode,
    /// Grid cell the Enter key toggles.
    pub cursor: Cell,
    /// Inputs accepted during the current frame's `tick()` call.
    /// Drained by the caller after each tick to persist to the journal file.
    pub accepted_inputs: Vec<AcceptedInput>,
    /// Most recent edit or choice the simulation refused, for the status line.
    pub last_rejection: Option<GameError>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::default(),
            cursor: Cell::new(RowKind::Kick, 0),
            accepted_inputs: Vec::new(),
            last_rejection: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the app state for a fresh run, surfacing the wave 1 prompt.
    /// The first wave plays on its own once started.
    pub fn begin(game: &mut Game) -> Self {
        let mut app = Self::new();
        let result = game.advance(0);
        app.apply_stop_reason(result.stop_reason, true);
        app
    }

    /// Process input and logic for a single rendered frame.
    pub fn tick(&mut self, game: &mut Game, keys_pressed: &[KeyCode]) {
        self.accepted_inputs.clear();
        if matches!(self.mode, AppMode::Finished(_)) {
            return;
        }

        self.handle_cursor_keys(keys_pressed);
        if keys_pressed.contains(&KeyCode::Enter) {
            self.toggle_cursor_cell(game);
        }

        let mut advance_result = None;
        if let AppMode::PendingPrompt { interrupt, prompt_id, auto_play_suspended } = &mut self.mode
        {
            if keys_pressed.contains(&KeyCode::Space) {
                *auto_play_suspended = !*auto_play_suspended;
            }
            let id = *prompt_id;
            let resume = *auto_play_suspended;
            let choice = choice_for_keys(interrupt, keys_pressed);
            if let Some(choice) = choice
                && self.apply_and_record_choice(game, id, choice)
            {
                self.mode = if resume { AppMode::AutoPlay } else { AppMode::Paused };
            }
        } else {
            if keys_pressed.contains(&KeyCode::Space) {
                self.mode = match self.mode {
                    AppMode::Paused => AppMode::AutoPlay,
                    _ => {
                        game.request_pause();
                        AppMode::Paused
                    }
                };
            }
            if keys_pressed.contains(&KeyCode::Period) && self.mode == AppMode::Paused {
                advance_result = Some(game.advance(1));
            }
        }

        if self.mode == AppMode::AutoPlay {
            advance_result = Some(game.advance(AUTO_PLAY_FRAMES_PER_TICK));
        }

        if let Some(result) = advance_result {
            let auto_play_suspended = self.mode == AppMode::AutoPlay;
            self.apply_stop_reason(result.stop_reason, auto_play_suspended);
        }
    }

    pub fn apply_stop_reason(&mut self, stop_reason: AdvanceStopReason, auto_play_suspended: bool) {
        match stop_reason {
            AdvanceStopReason::PausedAtBoundary { .. } => {
                self.mode = AppMode::Paused;
            }
            AdvanceStopReason::Interrupted(interrupt) => {
                let prompt_id = interrupt.prompt_id();
                self.mode = AppMode::PendingPrompt { interrupt, prompt_id, auto_play_suspended };
            }
            AdvanceStopReason::Finished(outcome) => {
                self.mode = AppMode::Finished(outcome);
            }
            AdvanceStopReason::FrameLimitReached => {
                // Auto-play continues on the next frame.
            }
        }
    }

    fn handle_cursor_keys(&mut self, keys_pressed: &[KeyCode]) {
        let steps = STEPS as u8;
        let row = self.cursor.row.index();
        for key in keys_pressed {
            match key {
                KeyCode::Left => self.cursor.step = (self.cursor.step + steps - 1) % steps,
                KeyCode::Right => self.cursor.step = (self.cursor.step + 1) % steps,
                KeyCode::Up => self.cursor.row = row_at((row + ROWS - 1) % ROWS),
                KeyCode::Down => self.cursor.row = row_at((row + 1) % ROWS),
                _ => {}
            }
        }
    }

    /// Places an alien under the cursor, or removes the one already there.
    fn toggle_cursor_cell(&mut self, game: &mut Game) {
        let cell = self.cursor;
        let tick = game.current_frame();
        let (result, payload) = if game.state().pattern.is_active(cell) {
            (game.remove_alien(cell), InputPayload::RemoveAlien { cell })
        } else {
            (game.place_alien(cell), InputPayload::PlaceAlien { cell })
        };
        match result {
            Ok(_) => {
                self.last_rejection = None;
                self.accepted_inputs.push(AcceptedInput { tick_boundary: tick, payload });
            }
            Err(err) => self.last_rejection = Some(err),
        }
    }

    /// Apply a choice to the game and record it in `accepted_inputs`.
    fn apply_and_record_choice(
        &mut self,
        game: &mut Game,
        prompt_id: ChoicePromptId,
        choice: Choice,
    ) -> bool {
        let tick = game.current_frame();
        match game.apply_choice(prompt_id, choice.clone()) {
            Ok(()) => {
                self.last_rejection = None;
                self.accepted_inputs.push(AcceptedInput {
                    tick_boundary: tick,
                    payload: InputPayload::Choice { prompt_id, choice },
                });
                true
            }
            Err(err) => {
                self.last_rejection = Some(err);
                false
            }
        }
    }
}

fn row_at(index: usize) -> RowKind {
    RowKind::from_index(index).unwrap_or(RowKind::Kick)
}

fn choice_for_keys(interrupt: &Interrupt, keys_pressed: &[KeyCode]) -> Option<Choice> {
    match interrupt {
        Interrupt::AwaitingWaveStart { .. } => {
            keys_pressed.contains(&KeyCode::S).then_some(Choice::StartWave)
        }
        Interrupt::CardOffer { .. } => keys_pressed.iter().find_map(|key| match key {
            KeyCode::Key1 => Some(Choice::PickCard(0)),
            KeyCode::Key2 => Some(Choice::PickCard(1)),
            KeyCode::Key3 => Some(Choice::PickCard(2)),
            KeyCode::X => Some(Choice::SkipCards),
            _ => None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppMode, AppState, choice_for_keys};
    use backbeat_core::{
        AdvanceStopReason, CardKind, Choice, ChoicePromptId, Interrupt, RowKind, RunOutcome,
    };
    use macroquad::prelude::KeyCode;

    #[test]
    fn finished_outcome_maps_to_finished_mode() {
        let mut app = AppState::new();
        app.apply_stop_reason(AdvanceStopReason::Finished(RunOutcome::Defeat), true);
        assert_eq!(app.mode, AppMode::Finished(RunOutcome::Defeat));
    }

    #[test]
    fn frame_limit_keeps_the_current_mode() {
        let mut app = AppState { mode: AppMode::AutoPlay, ..AppState::new() };
        app.apply_stop_reason(AdvanceStopReason::FrameLimitReached, true);
        assert_eq!(app.mode, AppMode::AutoPlay);
    }

    #[test]
    fn interrupts_carry_their_prompt_id() {
        let mut app = AppState::new();
        let interrupt = Interrupt::AwaitingWaveStart { prompt_id: ChoicePromptId(4), wave: 3 };
        app.apply_stop_reason(AdvanceStopReason::Interrupted(interrupt.clone()), false);
        assert_eq!(
            app.mode,
            AppMode::PendingPrompt {
                interrupt,
                prompt_id: ChoicePromptId(4),
                auto_play_suspended: false,
            }
        );
    }

    #[test]
    fn card_keys_map_to_offer_slots() {
        let offer = Interrupt::CardOffer {
            prompt_id: ChoicePromptId(1),
            wave: 3,
            cards: vec![CardKind::Overdrive, CardKind::Velocity, CardKind::Resonance],
        };
        assert_eq!(choice_for_keys(&offer, &[KeyCode::Key3]), Some(Choice::PickCard(2)));
        assert_eq!(choice_for_keys(&offer, &[KeyCode::X]), Some(Choice::SkipCards));
        assert_eq!(choice_for_keys(&offer, &[KeyCode::S]), None);
    }

    #[test]
    fn cursor_wraps_around_the_grid() {
        let mut app = AppState::new();
        app.handle_cursor_keys(&[KeyCode::Left, KeyCode::Up]);
        assert_eq!(app.cursor.step, 15);
        assert_eq!(app.cursor.row, RowKind::ALL[RowKind::ALL.len() - 1]);

        app.handle_cursor_keys(&[KeyCode::Right, KeyCode::Down]);
        assert_eq!(app.cursor.step, 0);
        assert_eq!(app.cursor.row, RowKind::Kick);
    }
}
