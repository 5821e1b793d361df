//! Run construction and per-wave state rebuilding.
//! This module exists to keep initialization separate from the frame loop.
//! It does not own phase transitions; `waves` decides when these run.

use std::collections::VecDeque;

use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::content::{budget_max, wave_scaling};
use crate::pattern::Pattern;

/// Frames between boss pattern activations.
pub(super) const BOSS_PATTERN_INTERVAL: u32 = 180;

impl Game {
    pub fn new(seed: u64, content: &ContentPack) -> Self {
        Self::build(seed, content, GameConfig::default())
    }

    pub fn with_config(
        seed: u64,
        content: &ContentPack,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::build(seed, content, config))
    }

    fn build(seed: u64, content: &ContentPack, config: GameConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let scaling = wave_scaling(1);
        let state = GameState {
            phase: Phase::Setup,
            wave: 1,
            score: 0,
            pattern: Pattern::new(),
            budget: Budget::new(budget_max(1)),
            aliens: slotmap::SlotMap::with_key(),
            projectiles: slotmap::SlotMap::with_key(),
            defender: fresh_defender(scaling.defender_max_hp, scaling.shot_delay, None),
            sequencer: Sequencer::default(),
            scaling,
            modifiers: Modifiers::default(),
            card_offer: Vec::new(),
            picked_cards: Vec::new(),
            threat_trace: VecDeque::with_capacity(THREAT_TRACE_LEN),
        };

        let mut game = Self {
            seed,
            frame: 0,
            rng,
            content: content.clone(),
            config,
            state,
            log: Vec::new(),
            next_input_seq: 0,
            pending_prompt: None,
            pause_requested: false,
            at_pause_boundary: false,
        };
        game.prepare_wave_state();
        game
    }

    /// Rebuilds the defender and budget for `state.wave` and empties the field.
    pub(super) fn prepare_wave_state(&mut self) {
        let wave = self.state.wave;
        let scaling = wave_scaling(wave);
        let boss = (scaling.kind == WaveKind::Boss).then_some(BossState {
            pattern_timer: BOSS_PATTERN_INTERVAL,
            next_pattern: BossPattern::Fan,
            barrage_frames: 0,
            shield_frames: 0,
        });
        self.state.scaling = scaling;
        self.state.defender = fresh_defender(scaling.defender_max_hp, scaling.shot_delay, boss);
        self.state.budget = Budget::new(budget_max(wave));
        self.state.pattern.clear();
        self.state.aliens.clear();
        self.state.projectiles.clear();
        self.state.sequencer = Sequencer::default();
    }

    /// Rebuilds the alien roster from the pattern at full health.
    pub(super) fn respawn_aliens(&mut self) {
        self.state.aliens.clear();
        let cells: Vec<Cell> = self.state.pattern.active_cells().collect();
        for cell in cells {
            let max_hp = self.content.row(cell.row).alien_hp + self.state.modifiers.alien_hp_bonus;
            let id = self.state.aliens.insert(Alien {
                id: AlienId::default(),
                cell,
                pos: alien_position(cell),
                hp: max_hp,
                max_hp,
            });
            self.state.aliens[id].id = id;
        }
    }
}

fn fresh_defender(max_hp: i32, shot_delay: u32, boss: Option<BossState>) -> Defender {
    Defender {
        pos: Vec2::new(FIELD_WIDTH / 2.0, DEFENDER_Y),
        hp: max_hp,
        max_hp,
        cooldown: shot_delay,
        decision: None,
        boss,
    }
}
