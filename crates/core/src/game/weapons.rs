//! Alien weapon firing and the crossfire damage rule.
//! Damage for a shot is the row's flat value for its crossfire tier, then
//! scaled by card multipliers. Tiers are decided per column per step from
//! the aliens that are actually alive to fire.

use super::*;

/// Horizontal speed of the two clap pellets.
pub(super) const CLAP_SPREAD: f32 = 1.2;

impl Game {
    pub(super) fn shot_damage(&self, row: RowKind, tier: CrossfireTier) -> i32 {
        let tier_damage = self.content.row(row).tier_damage(tier);
        self.state.modifiers.scale_damage(row, tier_damage)
    }

    pub(super) fn fire_column(&mut self, step: u8) {
        let mut shooters: Vec<(Cell, Vec2)> = self
            .state
            .aliens
            .values()
            .filter(|alien| alien.cell.step == step)
            .map(|alien| (alien.cell, alien.pos))
            .collect();
        if shooters.is_empty() {
            return;
        }
        shooters.sort_by_key(|(cell, _)| *cell);

        let tier = CrossfireTier::from_count(shooters.len());
        for (cell, pos) in &shooters {
            self.spawn_alien_shots(*cell, *pos, tier);
        }
        self.log.push(LogEvent::StepTriggered {
            step,
            loop_index: self.state.sequencer.loop_index,
            rows: shooters.iter().map(|(cell, _)| cell.row).collect(),
        });
    }

    fn spawn_alien_shots(&mut self, cell: Cell, origin: Vec2, tier: CrossfireTier) {
        let row = *self.content.row(cell.row);
        let speed = self.state.modifiers.projectile_speed(row.projectile_speed);
        let damage = self.shot_damage(cell.row, tier);
        let owner = ProjectileOwner::Alien { cell, weapon: row.weapon, tier };
        let spread: &[f32] = if row.pellets >= 2 { &[-CLAP_SPREAD, CLAP_SPREAD] } else { &[0.0] };
        let start = Vec2::new(origin.x, origin.y + ALIEN_HALF_SIZE);
        for &vx in spread {
            let id = self.state.projectiles.insert(Projectile {
                id: ProjectileId::default(),
                owner,
                pos: start,
                vel: Vec2::new(vx, speed),
                damage,
            });
            self.state.projectiles[id].id = id;
        }
    }
}
