//! Step sequencer: turns elapsed frame time into pattern steps.

use super::*;
use crate::config::{MAX_BPM, MIN_BPM};

/// Microseconds between sixteenth-note steps at `bpm`.
pub fn step_interval_micros(bpm: u32) -> u64 {
    60_000_000 / (u64::from(bpm.max(1)) * 4)
}

impl Game {
    pub(super) fn effective_bpm(&self) -> u32 {
        (self.config.base_bpm + self.state.modifiers.bpm_bonus).clamp(MIN_BPM, MAX_BPM)
    }

    pub(super) fn loops_for_current_wave(&self) -> u32 {
        let boss_bonus = if self.state.scaling.kind == WaveKind::Boss { 2 } else { 0 };
        self.config.base_loops + boss_bonus + self.state.modifiers.extra_loops
    }

    pub(super) fn reset_sequencer(&mut self) {
        self.state.sequencer = Sequencer {
            bpm: self.effective_bpm(),
            step: None,
            loop_index: 0,
            loops_per_wave: self.loops_for_current_wave(),
            accumulator_micros: 0,
            finished: false,
        };
    }

    /// Accumulates one frame of time and fires every step that became due.
    pub(super) fn tick_sequencer(&mut self) {
        if self.state.sequencer.finished {
            return;
        }
        let interval = step_interval_micros(self.state.sequencer.bpm);
        self.state.sequencer.accumulator_micros += FRAME_MICROS;
        while self.state.sequencer.accumulator_micros >= interval
            && !self.state.sequencer.finished
        {
            self.state.sequencer.accumulator_micros -= interval;
            self.trigger_next_step();
        }
    }

    fn trigger_next_step(&mut self) {
        let next = match self.state.sequencer.step {
            None => 0,
            Some(step) => (step + 1) % STEPS as u8,
        };
        if next == 0 && self.state.sequencer.step.is_some() {
            self.state.sequencer.loop_index += 1;
            if self.state.sequencer.loop_index >= self.state.sequencer.loops_per_wave {
                self.state.sequencer.finished = true;
                return;
            }
        }
        self.state.sequencer.step = Some(next);
        if next == 0 {
            self.respawn_aliens();
            self.log.push(LogEvent::LoopStarted {
                loop_index: self.state.sequencer.loop_index,
                aliens: self.state.aliens.len(),
            });
        }
        self.fire_column(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    #[test]
    fn interval_is_a_sixteenth_note() {
        assert_eq!(step_interval_micros(120), 125_000);
        assert_eq!(step_interval_micros(60), 250_000);
    }

    #[test]
    fn steps_fire_on_the_accumulated_clock() {
        let mut game = started_game(&[]);
        // 125 ms per step at 120 BPM; 16.667 ms per frame puts the first
        // step on frame 8 and the second on frame 15.
        for _ in 0..7 {
            game.tick_sequencer();
        }
        assert_eq!(game.state.sequencer.step, None);
        game.tick_sequencer();
        assert_eq!(game.state.sequencer.step, Some(0));
        for _ in 0..7 {
            game.tick_sequencer();
        }
        assert_eq!(game.state.sequencer.step, Some(1));
    }

    #[test]
    fn sequencer_finishes_after_the_configured_loops() {
        let mut game = started_game(&[]);
        let loops = game.state.sequencer.loops_per_wave;
        assert_eq!(loops, GameConfig::default().base_loops);

        for _ in 0..(loops as usize * STEPS) {
            game.trigger_next_step();
        }
        assert!(!game.state.sequencer.finished);
        assert_eq!(game.state.sequencer.step, Some(15));

        game.trigger_next_step();
        assert!(game.state.sequencer.finished);
        assert_eq!(game.state.sequencer.loop_index, loops);
    }

    #[test]
    fn each_loop_respawns_the_pattern() {
        let cell = Cell::new(RowKind::Snare, 4);
        let mut game = started_game(&[cell]);
        game.trigger_next_step();
        assert_eq!(game.state.aliens.len(), 1);

        game.state.aliens.clear();
        for _ in 1..STEPS {
            game.trigger_next_step();
        }
        assert!(game.state.aliens.is_empty());

        game.trigger_next_step();
        assert_eq!(game.state.sequencer.step, Some(0));
        assert_eq!(game.state.aliens.len(), 1);
        assert!(game.log.iter().any(|event| matches!(
            event,
            LogEvent::LoopStarted { loop_index: 1, aliens: 1 }
        )));
    }

    #[test]
    fn boss_waves_and_cards_add_loops_and_tempo() {
        let mut game = started_game(&[]);
        game.state.modifiers.extra_loops = 1;
        game.state.modifiers.bpm_bonus = 200;
        game.state.scaling.kind = WaveKind::Boss;
        game.reset_sequencer();
        assert_eq!(game.state.sequencer.loops_per_wave, GameConfig::default().base_loops + 3);
        assert_eq!(game.state.sequencer.bpm, MAX_BPM);
    }
}
