//! Wave lifecycle: start, win, loss, and the prepare countdown.
//! This module exists to own every `Phase` transition in one place.
//! It does not own card effects or prompt bookkeeping.

use super::*;
use crate::content::is_boss_wave;

pub(super) const WAVE_SCORE_PER_WAVE: i64 = 100;
pub(super) const BOSS_WAVE_SCORE_BONUS: i64 = 500;

impl Game {
    pub(super) fn set_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.log.push(LogEvent::PhaseChanged { wave: self.state.wave, phase });
    }

    /// Enters `Playing` with a fresh sequencer. Aliens spawn on the first step.
    pub(super) fn start_wave(&mut self) {
        self.state.aliens.clear();
        self.state.projectiles.clear();
        self.state.card_offer.clear();
        self.reset_sequencer();
        self.set_phase(Phase::Playing);
    }

    /// Checks the end conditions of a playing wave after a frame's combat.
    pub(super) fn resolve_wave(&mut self) -> Option<RunOutcome> {
        if !self.state.defender.is_alive() {
            self.win_wave();
            return None;
        }
        if self.state.sequencer.finished && self.state.hostile_projectile_count() == 0 {
            self.set_phase(Phase::GameOver);
            return Some(RunOutcome::Defeat);
        }
        None
    }

    fn win_wave(&mut self) {
        let wave = self.state.wave;
        let mut bonus = WAVE_SCORE_PER_WAVE * i64::from(wave);
        if self.state.scaling.kind == WaveKind::Boss {
            bonus += BOSS_WAVE_SCORE_BONUS;
        }
        self.state.score += bonus;
        self.state.projectiles.clear();
        self.state.aliens.clear();
        self.log.push(LogEvent::WaveWon { wave, score: self.state.score });
        self.set_phase(Phase::Prepare { frames_left: self.config.prepare_frames });
    }

    /// Counts down the prepare phase and rolls the run forward at zero.
    pub(super) fn tick_prepare(&mut self, frames_left: u32) -> Option<RunOutcome> {
        if frames_left > 1 {
            self.state.phase = Phase::Prepare { frames_left: frames_left - 1 };
            return None;
        }
        let won = self.state.wave;
        if won >= self.config.final_wave {
            self.set_phase(Phase::Victory);
            return Some(RunOutcome::Victory);
        }
        self.state.wave = won + 1;
        self.prepare_wave_state();
        if won % 2 == 0 || is_boss_wave(won) {
            self.draw_card_offer();
            self.set_phase(Phase::CardPick);
        } else {
            self.set_phase(Phase::Complete);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    fn prepare_frames_left(game: &Game) -> Option<u32> {
        match game.state.phase {
            Phase::Prepare { frames_left } => Some(frames_left),
            _ => None,
        }
    }

    #[test]
    fn downing_the_defender_wins_the_wave() {
        let mut game = started_game(&[Cell::new(RowKind::Kick, 0)]);
        game.state.defender.hp = 0;
        add_hostile_projectile(&mut game, Vec2::new(100.0, 100.0), 5.0);

        assert_eq!(game.resolve_wave(), None);

        assert_eq!(game.state.score, 100);
        assert_eq!(prepare_frames_left(&game), Some(GameConfig::default().prepare_frames));
        assert!(game.state.projectiles.is_empty());
        assert!(game.log.contains(&LogEvent::WaveWon { wave: 1, score: 100 }));
    }

    #[test]
    fn boss_wins_add_the_boss_bonus() {
        let mut game = started_game(&[]);
        game.state.wave = 5;
        game.state.scaling.kind = WaveKind::Boss;
        game.state.defender.hp = -4;
        game.resolve_wave();
        assert_eq!(game.state.score, 500 + 500);
    }

    #[test]
    fn exhausted_loops_with_no_shots_in_flight_lose_the_run() {
        let mut game = started_game(&[]);
        game.state.sequencer.finished = true;
        let id = add_hostile_projectile(&mut game, Vec2::new(100.0, 100.0), 5.0);

        assert_eq!(game.resolve_wave(), None);
        assert_eq!(game.state.phase, Phase::Playing);

        game.state.projectiles.remove(id);
        assert_eq!(game.resolve_wave(), Some(RunOutcome::Defeat));
        assert_eq!(game.state.phase, Phase::GameOver);
    }

    #[test]
    fn odd_wave_wins_lead_to_complete_with_a_fresh_budget() {
        let mut game = started_game(&[Cell::new(RowKind::Kick, 0)]);
        game.state.defender.hp = 0;
        game.resolve_wave();

        assert_eq!(game.tick_prepare(2), None);
        assert_eq!(prepare_frames_left(&game), Some(1));
        assert_eq!(game.tick_prepare(1), None);

        assert_eq!(game.state.phase, Phase::Complete);
        assert_eq!(game.state.wave, 2);
        assert_eq!(game.state.budget, Budget { max: 10, spent: 0 });
        assert_eq!(game.state.pattern.active_count(), 0);
        assert_eq!(game.state.defender.hp, 50);
    }

    #[test]
    fn even_and_boss_wave_wins_offer_cards() {
        for won in [2, 5] {
            let mut game = started_game(&[]);
            game.state.wave = won;
            assert_eq!(game.tick_prepare(1), None);
            assert_eq!(game.state.phase, Phase::CardPick, "won wave {won}");
            assert_eq!(game.state.card_offer.len(), 3);
        }
    }

    #[test]
    fn winning_the_final_wave_is_victory() {
        let mut game = started_game(&[]);
        game.state.wave = game.config.final_wave;
        assert_eq!(game.tick_prepare(1), Some(RunOutcome::Victory));
        assert_eq!(game.state.phase, Phase::Victory);
    }

    #[test]
    fn the_wave_after_a_boss_gets_berserk_scaling() {
        let mut game = started_game(&[]);
        game.state.wave = 10;
        game.tick_prepare(1);
        assert_eq!(game.state.wave, 11);
        assert_eq!(game.state.scaling.kind, WaveKind::Berserk);
        assert!(game.state.defender.boss.is_none());
    }
}
