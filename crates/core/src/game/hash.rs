//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from simulation control code.
//! It does not own replay execution or journal persistence policies.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.frame);
        hasher.write_u64(self.next_input_seq);
        hasher.write_u32(self.state.wave);
        hasher.write_i64(self.state.score);
        hasher.write_u8(self.state.phase.tag());
        if let Phase::Prepare { frames_left } = self.state.phase {
            hasher.write_u32(frames_left);
        }
        hasher.write_u32(self.state.budget.max);
        hasher.write_u32(self.state.budget.spent);

        let defender = &self.state.defender;
        hasher.write_u32(defender.pos.x.to_bits());
        hasher.write_i32(defender.hp);
        hasher.write_u32(defender.cooldown);
        if let Some(boss) = defender.boss {
            hasher.write_u32(boss.pattern_timer);
            hasher.write_u32(boss.barrage_frames);
            hasher.write_u32(boss.shield_frames);
        }

        let sequencer = &self.state.sequencer;
        hasher.write_u32(sequencer.bpm);
        hasher.write_u8(sequencer.step.unwrap_or(u8::MAX));
        hasher.write_u32(sequencer.loop_index);
        hasher.write_u64(sequencer.accumulator_micros);
        hasher.write_u8(u8::from(sequencer.finished));

        for row in RowKind::ALL {
            hasher.write_u16(self.state.pattern.row_mask(row));
        }
        for alien in self.state.aliens.values() {
            hasher.write_u8(alien.cell.row as u8);
            hasher.write_u8(alien.cell.step);
            hasher.write_i32(alien.hp);
        }
        for projectile in self.state.projectiles.values() {
            hasher.write_u32(projectile.pos.x.to_bits());
            hasher.write_u32(projectile.pos.y.to_bits());
            hasher.write_i32(projectile.damage);
        }
        for card in &self.state.picked_cards {
            hasher.write_u8(*card as u8);
        }
        hasher.finish()
    }
}
