//! Zone threat map used by the defender to pick dodge targets.
//! The field is split into sixteen vertical zones, one per pattern column.
//! Each hostile projectile adds urgency to the zone it is falling through,
//! weighted by how soon it reaches the defender's line.

use super::*;

/// Only projectiles arriving within this many frames contribute.
pub const IMPACT_HORIZON_FRAMES: f32 = 50.0;
/// Threat in the defender's own zone above which it dodges.
pub const DODGE_THRESHOLD: f32 = 0.3;
/// How many zones to either side the dodge search considers.
pub const DODGE_SEARCH_RADIUS: usize = 4;

const THREAT_WEIGHT: f32 = 3.0;
const DISTANCE_WEIGHT: f32 = 0.1;
const CORNER_PENALTY: f32 = 0.5;
const CENTER_WEIGHT: f32 = 0.02;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ThreatMap {
    zones: [f32; ZONE_COUNT],
}

impl ThreatMap {
    /// `projectiles` yields `(position, downward speed)` for hostile shots.
    pub fn build(defender_y: f32, projectiles: impl IntoIterator<Item = (Vec2, f32)>) -> Self {
        let mut map = Self::default();
        for (pos, speed) in projectiles {
            if speed <= 0.0 {
                continue;
            }
            let time_to_impact = (defender_y - pos.y) / speed;
            if time_to_impact <= 0.0 || time_to_impact >= IMPACT_HORIZON_FRAMES {
                continue;
            }
            let urgency = 1.0 / (time_to_impact + 1.0);
            let zone = zone_of(pos.x);
            map.zones[zone] += urgency;
            if zone > 0 {
                map.zones[zone - 1] += urgency * 0.5;
            }
            if zone + 1 < ZONE_COUNT {
                map.zones[zone + 1] += urgency * 0.5;
            }
        }
        map
    }

    pub fn threat(&self, zone: usize) -> f32 {
        self.zones.get(zone).copied().unwrap_or(0.0)
    }

    pub fn peak(&self) -> f32 {
        self.zones.iter().copied().fold(0.0, f32::max)
    }

    pub fn should_dodge(&self, zone: usize) -> bool {
        self.threat(zone) > DODGE_THRESHOLD
    }

    /// Lowest-scoring zone within the search radius of `current`.
    /// Ties keep the lower zone index.
    pub fn best_dodge_zone(&self, current: usize) -> usize {
        let low = current.saturating_sub(DODGE_SEARCH_RADIUS);
        let high = (current + DODGE_SEARCH_RADIUS).min(ZONE_COUNT - 1);
        let mut best = (current, f32::MAX);
        for zone in low..=high {
            let score = self.dodge_score(zone, current);
            if score < best.1 {
                best = (zone, score);
            }
        }
        best.0
    }

    fn dodge_score(&self, zone: usize, current: usize) -> f32 {
        let distance = zone.abs_diff(current) as f32;
        let corner = if zone <= 1 || zone >= ZONE_COUNT - 2 { CORNER_PENALTY } else { 0.0 };
        let center_bias = (zone as f32 - (ZONE_COUNT as f32 - 1.0) / 2.0).abs();
        self.zones[zone] * THREAT_WEIGHT
            + distance * DISTANCE_WEIGHT
            + corner
            + center_bias * CENTER_WEIGHT
    }
}

pub fn zone_of(x: f32) -> usize {
    let zone = (x / ZONE_WIDTH).floor();
    if zone <= 0.0 { 0 } else { (zone as usize).min(ZONE_COUNT - 1) }
}
