//! Defender AI: dodge, hunt, and shoot.
//! This module exists to keep the defender's per-frame decision loop in one place.
//! It does not own the threat scoring rules (`threat`) or boss specials (`boss`).

use std::cmp::Reverse;

use super::threat::zone_of;
use super::*;

pub(super) const MOVE_SPEED: f32 = 4.0;
pub(super) const BERSERK_MOVE_SPEED: f32 = 6.0;
pub(super) const SHOT_SPEED: f32 = 9.0;
pub(super) const SHOT_DAMAGE: i32 = 1;
const MISS_MIN_OFFSET: u32 = 24;
const MISS_OFFSET_RANGE: u32 = 41;

impl Game {
    pub(super) fn update_defender(&mut self) {
        let threat = self.current_threat_map();
        let decision = self.choose_decision(&threat);
        let previous = self.state.defender.decision.map(|decision| decision.kind);
        if previous != Some(decision.kind) {
            self.log.push(LogEvent::DecisionChanged { kind: decision.kind });
        }
        self.state.defender.decision = Some(decision);
        self.move_defender_toward(decision.target_x);

        self.tick_boss();
        self.tick_defender_gun();
    }

    /// Threat from every hostile projectile currently in flight.
    pub fn current_threat_map(&self) -> ThreatMap {
        let hostile = self
            .state
            .projectiles
            .values()
            .filter(|projectile| projectile.is_hostile())
            .map(|projectile| (projectile.pos, projectile.vel.y));
        ThreatMap::build(self.state.defender.pos.y, hostile)
    }

    pub(super) fn choose_decision(&self, threat: &ThreatMap) -> DefenderDecision {
        let current = zone_of(self.state.defender.pos.x);
        if threat.should_dodge(current) {
            let zone = threat.best_dodge_zone(current);
            return DefenderDecision { kind: DecisionKind::Dodge, target_x: zone_center(zone) };
        }
        match self.busiest_column(current) {
            Some(column) => {
                DefenderDecision { kind: DecisionKind::Hunt, target_x: zone_center(column) }
            }
            None => DefenderDecision { kind: DecisionKind::Center, target_x: FIELD_WIDTH / 2.0 },
        }
    }

    /// Column holding the most live aliens; ties go to the one nearest
    /// `current`, then to the lower column.
    fn busiest_column(&self, current: usize) -> Option<usize> {
        let mut counts = [0usize; STEPS];
        for alien in self.state.aliens.values() {
            counts[alien.cell.step as usize] += 1;
        }
        counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .min_by_key(|(column, count)| {
                (Reverse(**count), column.abs_diff(current), *column)
            })
            .map(|(column, _)| column)
    }

    fn move_speed(&self) -> f32 {
        if self.state.scaling.kind == WaveKind::Berserk { BERSERK_MOVE_SPEED } else { MOVE_SPEED }
    }

    fn move_defender_toward(&mut self, target_x: f32) {
        let speed = self.move_speed();
        let pos = &mut self.state.defender.pos;
        let delta = (target_x - pos.x).clamp(-speed, speed);
        pos.x = (pos.x + delta).clamp(DEFENDER_HALF_WIDTH, FIELD_WIDTH - DEFENDER_HALF_WIDTH);
    }

    fn tick_defender_gun(&mut self) {
        let rate = if self.barrage_active() { 3 } else { 1 };
        let defender = &mut self.state.defender;
        defender.cooldown = defender.cooldown.saturating_sub(rate);
        if defender.cooldown > 0 {
            return;
        }
        let Some(target) = self.pick_target() else {
            return;
        };
        for _ in 0..self.state.scaling.shots_per_turn {
            let aim = self.aim_at(target);
            self.spawn_defender_shot(aim);
        }
        self.state.defender.cooldown = self.state.scaling.shot_delay;
    }

    /// Live alien nearest the defender horizontally; ties prefer the one
    /// lowest on screen, then the lower column.
    pub(super) fn pick_target(&self) -> Option<Vec2> {
        let defender_x = self.state.defender.pos.x;
        self.state
            .aliens
            .values()
            .min_by(|left, right| {
                let left_dx = (left.pos.x - defender_x).abs();
                let right_dx = (right.pos.x - defender_x).abs();
                left_dx
                    .total_cmp(&right_dx)
                    .then(right.pos.y.total_cmp(&left.pos.y))
                    .then(left.cell.step.cmp(&right.cell.step))
            })
            .map(|alien| alien.pos)
    }

    /// Rolls accuracy; a miss aims beside the target on a random side.
    fn aim_at(&mut self, target: Vec2) -> Vec2 {
        if self.roll_percent() < self.state.scaling.ai_accuracy_pct {
            return target;
        }
        let offset = (MISS_MIN_OFFSET + self.roll_below(MISS_OFFSET_RANGE)) as f32;
        let side = if self.roll_below(2) == 0 { -1.0 } else { 1.0 };
        Vec2::new(target.x + offset * side, target.y)
    }

    pub(super) fn spawn_defender_shot(&mut self, aim: Vec2) {
        let origin =
            Vec2::new(self.state.defender.pos.x, self.state.defender.pos.y - DEFENDER_HALF_HEIGHT);
        let dx = aim.x - origin.x;
        let dy = aim.y - origin.y;
        let length = (dx * dx + dy * dy).sqrt();
        let vel = if length > f32::EPSILON {
            Vec2::new(dx / length * SHOT_SPEED, dy / length * SHOT_SPEED)
        } else {
            Vec2::new(0.0, -SHOT_SPEED)
        };
        self.spawn_defender_projectile(origin, vel);
    }

    pub(super) fn spawn_defender_projectile(&mut self, origin: Vec2, vel: Vec2) {
        let id = self.state.projectiles.insert(Projectile {
            id: ProjectileId::default(),
            owner: ProjectileOwner::Defender,
            pos: origin,
            vel,
            damage: SHOT_DAMAGE,
        });
        self.state.projectiles[id].id = id;
    }
}
