//! Boss wave specials: the timed Fan, Barrage and Shield cycle.
//! The defender runs these on top of its normal gun while a boss wave plays.

use super::bootstrap::BOSS_PATTERN_INTERVAL;
use super::defender::SHOT_SPEED;
use super::*;

pub(super) const FAN_SHOTS: u32 = 5;
pub(super) const FAN_HALF_ANGLE_DEG: f32 = 30.0;
pub(super) const BARRAGE_FRAMES: u32 = 60;
pub(super) const SHIELD_FRAMES: u32 = 90;

impl Game {
    pub(super) fn barrage_active(&self) -> bool {
        self.state.defender.boss.is_some_and(|boss| boss.barrage_frames > 0)
    }

    pub(super) fn shield_active(&self) -> bool {
        self.state.defender.boss.is_some_and(|boss| boss.shield_frames > 0)
    }

    /// Damage after the boss shield; halved and floored, never below 1.
    pub(super) fn shielded_damage(&self, damage: i32) -> i32 {
        if self.shield_active() { (damage / 2).max(1) } else { damage }
    }

    pub(super) fn tick_boss(&mut self) {
        let Some(boss) = self.state.defender.boss.as_mut() else {
            return;
        };
        boss.barrage_frames = boss.barrage_frames.saturating_sub(1);
        boss.shield_frames = boss.shield_frames.saturating_sub(1);
        boss.pattern_timer = boss.pattern_timer.saturating_sub(1);
        if boss.pattern_timer > 0 {
            return;
        }
        boss.pattern_timer = BOSS_PATTERN_INTERVAL;
        let pattern = boss.next_pattern;
        boss.next_pattern = pattern.next();
        match pattern {
            BossPattern::Fan => {}
            BossPattern::Barrage => boss.barrage_frames = BARRAGE_FRAMES,
            BossPattern::Shield => boss.shield_frames = SHIELD_FRAMES,
        }
        if pattern == BossPattern::Fan {
            self.fire_fan();
        }
        self.log.push(LogEvent::BossPattern { pattern });
    }

    fn fire_fan(&mut self) {
        let origin =
            Vec2::new(self.state.defender.pos.x, self.state.defender.pos.y - DEFENDER_HALF_HEIGHT);
        let step = 2.0 * FAN_HALF_ANGLE_DEG / (FAN_SHOTS - 1) as f32;
        for shot in 0..FAN_SHOTS {
            let angle = (-FAN_HALF_ANGLE_DEG + step * shot as f32).to_radians();
            let vel = Vec2::new(angle.sin() * SHOT_SPEED, -angle.cos() * SHOT_SPEED);
            self.spawn_defender_projectile(origin, vel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    fn boss_game() -> Game {
        let mut game = started_game(&[]);
        game.state.scaling.kind = WaveKind::Boss;
        game.state.defender.boss = Some(BossState {
            pattern_timer: 1,
            next_pattern: BossPattern::Fan,
            barrage_frames: 0,
            shield_frames: 0,
        });
        game
    }

    fn boss(game: &Game) -> BossState {
        game.state.defender.boss.expect("boss state")
    }

    #[test]
    fn normal_defender_has_no_boss_behaviour() {
        let mut game = started_game(&[]);
        game.tick_boss();
        assert!(!game.barrage_active());
        assert_eq!(game.shielded_damage(7), 7);
        assert!(game.state.projectiles.is_empty());
    }

    #[test]
    fn patterns_cycle_fan_barrage_shield() {
        let mut game = boss_game();

        game.tick_boss();
        assert_eq!(game.state.projectiles.len(), FAN_SHOTS as usize);
        assert_eq!(boss(&game).next_pattern, BossPattern::Barrage);
        assert_eq!(boss(&game).pattern_timer, BOSS_PATTERN_INTERVAL);

        for _ in 0..BOSS_PATTERN_INTERVAL {
            game.tick_boss();
        }
        assert!(game.barrage_active());
        assert_eq!(boss(&game).barrage_frames, BARRAGE_FRAMES);

        for _ in 0..BOSS_PATTERN_INTERVAL {
            game.tick_boss();
        }
        assert!(!game.barrage_active());
        assert!(game.shield_active());
        assert_eq!(boss(&game).next_pattern, BossPattern::Fan);

        let patterns: Vec<BossPattern> = game
            .log
            .iter()
            .filter_map(|event| match event {
                LogEvent::BossPattern { pattern } => Some(*pattern),
                _ => None,
            })
            .collect();
        assert_eq!(patterns, vec![BossPattern::Fan, BossPattern::Barrage, BossPattern::Shield]);
    }

    #[test]
    fn fan_spreads_symmetrically_upward() {
        let mut game = boss_game();
        game.tick_boss();
        let mut spreads: Vec<f32> =
            game.state.projectiles.values().map(|projectile| projectile.vel.x).collect();
        spreads.sort_by(f32::total_cmp);
        assert!((spreads[0] + spreads[4]).abs() < 1e-4);
        assert!(spreads[2].abs() < 1e-4);
        assert!((spreads[4] - SHOT_SPEED * 0.5).abs() < 1e-4);
        assert!(game.state.projectiles.values().all(|projectile| projectile.vel.y < 0.0));
    }

    #[test]
    fn shield_halves_damage_but_never_below_one() {
        let mut game = boss_game();
        if let Some(boss) = game.state.defender.boss.as_mut() {
            boss.shield_frames = 10;
        }
        assert_eq!(game.shielded_damage(9), 4);
        assert_eq!(game.shielded_damage(1), 1);
    }
}
