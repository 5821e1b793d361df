//! Shared test fixtures for the `game` submodule test suites.
//! This module exists to avoid repeating pattern and projectile setup across many tests.
//! It does not own production gameplay logic.

use super::*;

pub(super) const TEST_SEED: u64 = 0x5EED;

/// Fresh wave-1 game with `cells` placed and the wave started. Aliens stay
/// off the field until the sequencer plays its first step.
pub(super) fn started_game(cells: &[Cell]) -> Game {
    let mut game = Game::new(TEST_SEED, &ContentPack::default());
    for &cell in cells {
        game.place_alien(cell).expect("fixture placement fits the wave budget");
    }
    game.start_wave();
    game
}

pub(super) fn add_hostile_projectile(game: &mut Game, pos: Vec2, speed: f32) -> ProjectileId {
    add_alien_shot(game, Cell::new(RowKind::Snare, 0), CrossfireTier::Solo, pos, speed, 4)
}

pub(super) fn add_alien_shot(
    game: &mut Game,
    cell: Cell,
    tier: CrossfireTier,
    pos: Vec2,
    speed: f32,
    damage: i32,
) -> ProjectileId {
    let weapon = game.content.row(cell.row).weapon;
    let id = game.state.projectiles.insert(Projectile {
        id: ProjectileId::default(),
        owner: ProjectileOwner::Alien { cell, weapon, tier },
        pos,
        vel: Vec2::new(0.0, speed),
        damage,
    });
    game.state.projectiles[id].id = id;
    id
}

pub(super) fn add_defender_shot(game: &mut Game, pos: Vec2, vel: Vec2) -> ProjectileId {
    let id = game.state.projectiles.insert(Projectile {
        id: ProjectileId::default(),
        owner: ProjectileOwner::Defender,
        pos,
        vel,
        damage: 1,
    });
    game.state.projectiles[id].id = id;
    id
}
