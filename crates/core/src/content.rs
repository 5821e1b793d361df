//! Static gameplay tables: per-row weapons, costs, and the wave scaling table.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::types::{CardKind, CrossfireTier, ROWS, RowKind, WaveKind, WeaponKind};

pub const BUDGET_BASE: u32 = 8;
pub const BUDGET_PER_WAVE: u32 = 2;
pub const BUDGET_CAP: u32 = 24;

pub const BOSS_WAVE_INTERVAL: u32 = 5;
pub const BERSERK_FROM_WAVE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowContent {
    pub weapon: WeaponKind,
    pub base_cost: u32,
    pub alien_hp: i32,
    pub projectile_speed: f32,
    /// Flat damage per crossfire tier: solo, duo, trio.
    pub damage: [i32; 3],
    pub pellets: u8,
}

impl RowContent {
    pub fn tier_damage(&self, tier: CrossfireTier) -> i32 {
        self.damage[tier.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveScaling {
    pub shot_delay: u32,
    pub ai_accuracy_pct: u32,
    pub shots_per_turn: u32,
    pub defender_max_hp: i32,
    pub kind: WaveKind,
}

pub struct CardInfo {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContentPack {
    pub rows: [RowContent; ROWS],
}

impl Default for ContentPack {
    fn default() -> Self {
        Self {
            rows: [
                RowContent {
                    weapon: WeaponKind::BassBomb,
                    base_cost: 3,
                    alien_hp: 3,
                    projectile_speed: 3.0,
                    damage: [6, 9, 14],
                    pellets: 1,
                },
                RowContent {
                    weapon: WeaponKind::SnareShot,
                    base_cost: 2,
                    alien_hp: 2,
                    projectile_speed: 5.0,
                    damage: [4, 6, 10],
                    pellets: 1,
                },
                RowContent {
                    weapon: WeaponKind::HatNeedle,
                    base_cost: 1,
                    alien_hp: 1,
                    projectile_speed: 8.0,
                    damage: [2, 3, 5],
                    pellets: 1,
                },
                RowContent {
                    weapon: WeaponKind::HatSpray,
                    base_cost: 2,
                    alien_hp: 2,
                    projectile_speed: 6.0,
                    damage: [3, 5, 8],
                    pellets: 1,
                },
                RowContent {
                    weapon: WeaponKind::ClapBurst,
                    base_cost: 2,
                    alien_hp: 2,
                    projectile_speed: 4.0,
                    damage: [3, 4, 6],
                    pellets: 2,
                },
                RowContent {
                    weapon: WeaponKind::TomShell,
                    base_cost: 3,
                    alien_hp: 3,
                    projectile_speed: 4.5,
                    damage: [5, 8, 12],
                    pellets: 1,
                },
            ],
        }
    }
}

impl ContentPack {
    pub fn row(&self, row: RowKind) -> &RowContent {
        &self.rows[row.index()]
    }

    /// Stable fingerprint of the tables, recorded in journals so replays can
    /// detect content drift.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for row in &self.rows {
            hasher.write_u8(row.weapon as u8);
            hasher.write_u32(row.base_cost);
            hasher.write_i32(row.alien_hp);
            hasher.write_u32(row.projectile_speed.to_bits());
            for damage in row.damage {
                hasher.write_i32(damage);
            }
            hasher.write_u8(row.pellets);
        }
        hasher.finish()
    }
}

pub fn budget_max(wave: u32) -> u32 {
    let wave = wave.max(1);
    (BUDGET_BASE + (wave - 1) * BUDGET_PER_WAVE).min(BUDGET_CAP)
}

pub fn is_boss_wave(wave: u32) -> bool {
    wave > 0 && wave % BOSS_WAVE_INTERVAL == 0
}

// (shot_delay, accuracy %, shots per turn, defender hp) for waves 1..=9.
// Wave 5 is always a boss wave and never reads its row.
const WAVE_TABLE: [(u32, u32, u32, i32); 9] = [
    (60, 35, 1, 40),
    (55, 40, 1, 50),
    (50, 45, 1, 60),
    (45, 50, 2, 70),
    (40, 50, 2, 80),
    (40, 55, 2, 90),
    (36, 60, 2, 100),
    (32, 65, 2, 110),
    (28, 70, 3, 120),
];

pub fn wave_scaling(wave: u32) -> WaveScaling {
    let wave = wave.max(1);
    if is_boss_wave(wave) {
        return WaveScaling {
            shot_delay: 30,
            ai_accuracy_pct: (55 + wave).min(90),
            shots_per_turn: 3,
            defender_max_hp: 200 + (wave / BOSS_WAVE_INTERVAL - 1) as i32 * 100,
            kind: WaveKind::Boss,
        };
    }
    if wave >= BERSERK_FROM_WAVE {
        return WaveScaling {
            shot_delay: 20,
            ai_accuracy_pct: 80,
            shots_per_turn: 3,
            defender_max_hp: 120 + (wave - BERSERK_FROM_WAVE) as i32 * 15,
            kind: WaveKind::Berserk,
        };
    }
    let (shot_delay, ai_accuracy_pct, shots_per_turn, defender_max_hp) =
        WAVE_TABLE[(wave - 1) as usize];
    WaveScaling {
        shot_delay,
        ai_accuracy_pct,
        shots_per_turn,
        defender_max_hp,
        kind: WaveKind::Normal,
    }
}

pub fn card_info(card: CardKind) -> CardInfo {
    match card {
        CardKind::Overdrive => {
            CardInfo { name: "Overdrive", description: "All alien damage x1.25" }
        }
        CardKind::HeavyLowEnd => {
            CardInfo { name: "Heavy Low End", description: "Kick and tom damage x1.5" }
        }
        CardKind::Reinforced => CardInfo { name: "Reinforced", description: "Aliens gain +1 HP" },
        CardKind::DoubleTime => CardInfo { name: "Double Time", description: "+15 BPM" },
        CardKind::EncoreLoop => CardInfo { name: "Encore", description: "+1 loop per wave" },
        CardKind::BargainBin => {
            CardInfo { name: "Bargain Bin", description: "Kick and tom cost 1 less" }
        }
        CardKind::Resonance => {
            CardInfo { name: "Resonance", description: "Crossfire score bonus x2" }
        }
        CardKind::Velocity => {
            CardInfo { name: "Velocity", description: "Alien projectiles fly 20% faster" }
        }
    }
}
