use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::content::WaveScaling;
use crate::pattern::Pattern;
use crate::types::*;

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;
pub const ZONE_COUNT: usize = STEPS;
pub const ZONE_WIDTH: f32 = FIELD_WIDTH / ZONE_COUNT as f32;

pub const ALIEN_TOP: f32 = 60.0;
pub const ALIEN_ROW_SPACING: f32 = 40.0;
pub const ALIEN_HALF_SIZE: f32 = 16.0;

pub const DEFENDER_Y: f32 = 540.0;
pub const DEFENDER_HALF_WIDTH: f32 = 20.0;
pub const DEFENDER_HALF_HEIGHT: f32 = 12.0;

pub const THREAT_TRACE_LEN: usize = 32;

/// Screen position of the alien spawned for `cell`.
pub fn alien_position(cell: Cell) -> Vec2 {
    Vec2 {
        x: (cell.step as f32 + 0.5) * ZONE_WIDTH,
        y: ALIEN_TOP + cell.row.index() as f32 * ALIEN_ROW_SPACING,
    }
}

pub fn zone_center(zone: usize) -> f32 {
    (zone as f32 + 0.5) * ZONE_WIDTH
}

#[derive(Clone, Debug)]
pub struct Alien {
    pub id: AlienId,
    pub cell: Cell,
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Alien { cell: Cell, weapon: WeaponKind, tier: CrossfireTier },
    Defender,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: ProjectileOwner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
}

impl Projectile {
    pub fn is_hostile(&self) -> bool {
        matches!(self.owner, ProjectileOwner::Alien { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossState {
    pub pattern_timer: u32,
    pub next_pattern: BossPattern,
    pub barrage_frames: u32,
    pub shield_frames: u32,
}

#[derive(Clone, Debug)]
pub struct Defender {
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub cooldown: u32,
    pub decision: Option<DefenderDecision>,
    pub boss: Option<BossState>,
}

impl Defender {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    pub bpm: u32,
    /// Last step fired this wave; `None` until the first step plays.
    pub step: Option<u8>,
    pub loop_index: u32,
    pub loops_per_wave: u32,
    pub accumulator_micros: u64,
    /// Set once every loop of the wave has played.
    pub finished: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Budget {
    pub max: u32,
    pub spent: u32,
}

impl Budget {
    pub fn new(max: u32) -> Self {
        Self { max, spent: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.spent)
    }
}

/// Run-wide effects accumulated from picked cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modifiers {
    pub damage_permille: u32,
    pub low_end_permille: u32,
    pub alien_hp_bonus: i32,
    pub bpm_bonus: u32,
    pub extra_loops: u32,
    pub low_end_discount: u32,
    pub crossfire_bonus_factor: i64,
    pub projectile_speed_permille: u32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Self {
            damage_permille: 1000,
            low_end_permille: 1000,
            alien_hp_bonus: 0,
            bpm_bonus: 0,
            extra_loops: 0,
            low_end_discount: 0,
            crossfire_bonus_factor: 1,
            projectile_speed_permille: 1000,
        }
    }
}

impl Modifiers {
    pub fn scale_damage(&self, row: RowKind, tier_damage: i32) -> i32 {
        let row_permille = if row.is_low_end() { self.low_end_permille } else { 1000 };
        let scaled = i64::from(tier_damage) * i64::from(self.damage_permille) / 1000
            * i64::from(row_permille)
            / 1000;
        scaled.max(1) as i32
    }

    pub fn effective_cost(&self, row: RowKind, base_cost: u32) -> u32 {
        let discount = if row.is_low_end() { self.low_end_discount } else { 0 };
        base_cost.saturating_sub(discount).max(1)
    }

    pub fn projectile_speed(&self, base: f32) -> f32 {
        base * self.projectile_speed_permille as f32 / 1000.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThreatTrace {
    pub frame: u64,
    pub peak_threat: f32,
    pub current_zone_threat: f32,
    pub hostile_projectiles: usize,
    pub decision: Option<DecisionKind>,
}

pub struct GameState {
    pub phase: Phase,
    pub wave: u32,
    pub score: i64,
    pub pattern: Pattern,
    pub budget: Budget,
    pub aliens: SlotMap<AlienId, Alien>,
    pub projectiles: SlotMap<ProjectileId, Projectile>,
    pub defender: Defender,
    pub sequencer: Sequencer,
    pub scaling: WaveScaling,
    pub modifiers: Modifiers,
    pub card_offer: Vec<CardKind>,
    pub picked_cards: Vec<CardKind>,
    pub threat_trace: VecDeque<ThreatTrace>,
}

impl GameState {
    pub fn hostile_projectile_count(&self) -> usize {
        self.projectiles.values().filter(|projectile| projectile.is_hostile()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliens_sit_on_their_column_zone() {
        let pos = alien_position(Cell::new(RowKind::Clap, 3));
        assert_eq!(pos.x, zone_center(3));
        assert_eq!(pos.y, ALIEN_TOP + 4.0 * ALIEN_ROW_SPACING);
    }

    #[test]
    fn damage_multipliers_stack_and_round_down() {
        let mut modifiers = Modifiers::default();
        assert_eq!(modifiers.scale_damage(RowKind::Kick, 6), 6);

        modifiers.damage_permille = 1250;
        assert_eq!(modifiers.scale_damage(RowKind::Snare, 4), 5);

        modifiers.low_end_permille = 1500;
        // 6 * 1.25 = 7 (floored), then * 1.5 = 10.
        assert_eq!(modifiers.scale_damage(RowKind::Kick, 6), 10);
        assert_eq!(modifiers.scale_damage(RowKind::Snare, 4), 5);
    }

    #[test]
    fn discounts_never_make_a_row_free() {
        let modifiers = Modifiers { low_end_discount: 5, ..Modifiers::default() };
        assert_eq!(modifiers.effective_cost(RowKind::Kick, 3), 1);
        assert_eq!(modifiers.effective_cost(RowKind::Snare, 2), 2);
    }
}
