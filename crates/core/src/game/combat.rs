//! Projectile movement and hit resolution for both sides.
//! This module exists to keep collision rules apart from the AI and sequencer.
//! It does not decide wave outcomes; `waves` reads the results.

use super::*;

/// Projectiles this far outside the field are discarded.
const FIELD_MARGIN: f32 = 20.0;

impl Game {
    pub(super) fn step_projectiles(&mut self) {
        for projectile in self.state.projectiles.values_mut() {
            projectile.pos.x += projectile.vel.x;
            projectile.pos.y += projectile.vel.y;
        }

        let ids: Vec<ProjectileId> = self.state.projectiles.keys().collect();
        for id in ids {
            let Some(projectile) = self.state.projectiles.get(id).cloned() else {
                continue;
            };
            match projectile.owner {
                ProjectileOwner::Alien { tier, .. } => self.resolve_hostile_hit(&projectile, tier),
                ProjectileOwner::Defender => self.resolve_defender_hit(&projectile),
            }
        }
        self.state.projectiles.retain(|_, projectile| in_field(projectile.pos));
    }

    fn resolve_hostile_hit(&mut self, projectile: &Projectile, tier: CrossfireTier) {
        if !self.state.defender.is_alive() || !hits_defender(&self.state.defender, projectile) {
            return;
        }
        self.state.projectiles.remove(projectile.id);
        let damage = self.shielded_damage(projectile.damage);
        self.state.defender.hp -= damage;
        let bonus = tier.score_bonus() * self.state.modifiers.crossfire_bonus_factor;
        self.state.score += i64::from(damage) + bonus;
        self.log.push(LogEvent::DefenderHit {
            damage,
            tier,
            hp_left: self.state.defender.hp.max(0),
        });
    }

    fn resolve_defender_hit(&mut self, projectile: &Projectile) {
        let Some(alien_id) = self
            .state
            .aliens
            .iter()
            .find(|(_, alien)| {
                (alien.pos.x - projectile.pos.x).abs() <= ALIEN_HALF_SIZE
                    && (alien.pos.y - projectile.pos.y).abs() <= ALIEN_HALF_SIZE
            })
            .map(|(id, _)| id)
        else {
            return;
        };
        self.state.projectiles.remove(projectile.id);
        let alien = &mut self.state.aliens[alien_id];
        alien.hp -= projectile.damage;
        if alien.hp <= 0 {
            let cell = alien.cell;
            self.state.aliens.remove(alien_id);
            self.log.push(LogEvent::AlienDestroyed { cell });
        }
    }
}

fn in_field(pos: Vec2) -> bool {
    (-FIELD_MARGIN..=FIELD_WIDTH + FIELD_MARGIN).contains(&pos.x)
        && (-FIELD_MARGIN..=FIELD_HEIGHT + FIELD_MARGIN).contains(&pos.y)
}

/// Whether the projectile's path over the last frame crossed the defender's
/// box. Fast shots can step clean over the box, so the whole segment counts.
fn hits_defender(defender: &Defender, projectile: &Projectile) -> bool {
    let end = projectile.pos;
    let start = Vec2::new(end.x - projectile.vel.x, end.y - projectile.vel.y);
    let axes = [
        (start.x, end.x - start.x, defender.pos.x, DEFENDER_HALF_WIDTH),
        (start.y, end.y - start.y, defender.pos.y, DEFENDER_HALF_HEIGHT),
    ];
    let (mut enter, mut exit) = (0.0_f32, 1.0_f32);
    for (origin, delta, center, half) in axes {
        let (low, high) = (center - half, center + half);
        if delta == 0.0 {
            if origin < low || origin > high {
                return false;
            }
            continue;
        }
        let (a, b) = ((low - origin) / delta, (high - origin) / delta);
        enter = enter.max(a.min(b));
        exit = exit.min(a.max(b));
        if enter > exit {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    fn just_above_defender(game: &Game) -> Vec2 {
        Vec2::new(game.state.defender.pos.x, game.state.defender.pos.y - DEFENDER_HALF_HEIGHT - 2.0)
    }

    #[test]
    fn projectiles_move_and_leave_the_field() {
        let mut game = started_game(&[]);
        let id = add_hostile_projectile(&mut game, Vec2::new(10.0, 100.0), 5.0);
        game.step_projectiles();
        assert_eq!(game.state.projectiles[id].pos, Vec2::new(10.0, 105.0));

        add_defender_shot(&mut game, Vec2::new(10.0, -15.0), Vec2::new(0.0, -9.0));
        game.step_projectiles();
        assert_eq!(game.state.projectiles.len(), 1);
    }

    #[test]
    fn hostile_hit_damages_defender_and_scores_crossfire() {
        let mut game = started_game(&[]);
        let hp = game.state.defender.hp;
        let pos = just_above_defender(&game);
        add_alien_shot(&mut game, Cell::new(RowKind::Kick, 0), CrossfireTier::Duo, pos, 3.0, 9);

        game.step_projectiles();

        assert_eq!(game.state.defender.hp, hp - 9);
        assert_eq!(game.state.score, 9 + 10);
        assert!(game.state.projectiles.is_empty());
        assert_eq!(
            game.log.last(),
            Some(&LogEvent::DefenderHit { damage: 9, tier: CrossfireTier::Duo, hp_left: hp - 9 })
        );
    }

    #[test]
    fn resonance_doubles_the_crossfire_bonus() {
        let mut game = started_game(&[]);
        game.state.modifiers.crossfire_bonus_factor = 2;
        let pos = just_above_defender(&game);
        add_alien_shot(&mut game, Cell::new(RowKind::Snare, 0), CrossfireTier::Trio, pos, 5.0, 10);
        game.step_projectiles();
        assert_eq!(game.state.score, 10 + 60);
    }

    #[test]
    fn fast_shots_cannot_step_over_the_defender() {
        let mut game = started_game(&[]);
        let hp = game.state.defender.hp;
        let above = Vec2::new(game.state.defender.pos.x, game.state.defender.pos.y - 20.0);
        let hat = Cell::new(RowKind::ClosedHat, 0);
        add_alien_shot(&mut game, hat, CrossfireTier::Solo, above, 40.0, 2);

        game.step_projectiles();

        assert_eq!(game.state.defender.hp, hp - 2);
        assert!(game.state.projectiles.is_empty());
    }

    #[test]
    fn fast_shots_beside_the_defender_miss() {
        let mut game = started_game(&[]);
        let hp = game.state.defender.hp;
        let beside = Vec2::new(
            game.state.defender.pos.x + DEFENDER_HALF_WIDTH + 5.0,
            game.state.defender.pos.y - 20.0,
        );
        let hat = Cell::new(RowKind::ClosedHat, 0);
        add_alien_shot(&mut game, hat, CrossfireTier::Solo, beside, 40.0, 2);

        game.step_projectiles();

        assert_eq!(game.state.defender.hp, hp);
        assert_eq!(game.state.hostile_projectile_count(), 1);
    }

    #[test]
    fn downed_defender_takes_no_further_hits() {
        let mut game = started_game(&[]);
        game.state.defender.hp = 3;
        let pos = just_above_defender(&game);
        add_alien_shot(&mut game, Cell::new(RowKind::Kick, 0), CrossfireTier::Solo, pos, 3.0, 6);
        add_alien_shot(&mut game, Cell::new(RowKind::Kick, 1), CrossfireTier::Solo, pos, 3.0, 6);

        game.step_projectiles();

        assert_eq!(game.state.defender.hp, -3);
        assert_eq!(game.state.hostile_projectile_count(), 1);
        assert_eq!(game.state.score, 6);
    }

    #[test]
    fn defender_shots_destroy_aliens() {
        let cell = Cell::new(RowKind::ClosedHat, 4);
        let mut game = started_game(&[cell]);
        game.respawn_aliens();
        let target = alien_position(cell);
        add_defender_shot(&mut game, Vec2::new(target.x, target.y + 9.0), Vec2::new(0.0, -9.0));

        game.step_projectiles();

        assert!(game.state.aliens.is_empty());
        assert!(game.state.projectiles.is_empty());
        assert_eq!(game.log.last(), Some(&LogEvent::AlienDestroyed { cell }));
    }

    #[test]
    fn sturdy_aliens_survive_a_single_shot() {
        let cell = Cell::new(RowKind::Tom, 4);
        let mut game = started_game(&[cell]);
        game.respawn_aliens();
        let target = alien_position(cell);
        add_defender_shot(&mut game, Vec2::new(target.x, target.y + 9.0), Vec2::new(0.0, -9.0));

        game.step_projectiles();

        let alien = game.state.aliens.values().next().expect("tom survives");
        assert_eq!(alien.hp, alien.max_hp - 1);
    }

    #[test]
    fn shield_halves_incoming_damage() {
        let mut game = started_game(&[]);
        game.state.defender.boss = Some(BossState {
            pattern_timer: 100,
            next_pattern: BossPattern::Fan,
            barrage_frames: 0,
            shield_frames: 20,
        });
        let hp = game.state.defender.hp;
        let pos = just_above_defender(&game);
        add_alien_shot(&mut game, Cell::new(RowKind::Kick, 0), CrossfireTier::Trio, pos, 3.0, 14);
        game.step_projectiles();
        assert_eq!(game.state.defender.hp, hp - 7);
    }
}
