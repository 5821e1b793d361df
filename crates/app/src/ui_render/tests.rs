use super::{
    FieldView, fit_lines_to_panel, grid_cell_color, projectile_style, row_color, threat_alpha,
};
use crate::game_layout::PanelRect;
use backbeat_core::state::ProjectileOwner;
use backbeat_core::{Cell, CrossfireTier, RowKind, Vec2, WeaponKind};
use macroquad::prelude::{RED, SKYBLUE, WHITE, YELLOW};

#[test]
fn field_view_centres_the_field_in_a_wide_panel() {
    let panel = PanelRect { x: 10.0, y: 20.0, width: 1000.0, height: 300.0 };
    let view = FieldView::fit(panel);
    assert_eq!(view.scale, 0.5);
    assert_eq!(view.to_screen(Vec2::new(0.0, 0.0)), (310.0, 20.0));
    assert_eq!(view.to_screen(Vec2::new(800.0, 600.0)), (710.0, 320.0));
}

#[test]
fn playing_column_highlights_active_cells() {
    assert_eq!(grid_cell_color(RowKind::Kick, true, true), WHITE);
    assert_eq!(grid_cell_color(RowKind::Kick, true, false), RED);
    assert_eq!(row_color(RowKind::Kick), RED);
}

#[test]
fn threat_overlay_is_capped() {
    assert_eq!(threat_alpha(0.0), 0.0);
    assert_eq!(threat_alpha(10.0), 0.35);
}

#[test]
fn overflowing_lines_end_with_a_summary() {
    let lines: Vec<String> = (0..6).map(|index| format!("line {index}")).collect();
    let fitted = fit_lines_to_panel(&lines, 25.0 + 18.0 * 3.0, 18.0, 25.0);
    assert_eq!(fitted, vec!["line 0", "line 1", "... and 4 more"]);
    assert_eq!(fit_lines_to_panel(&lines, 500.0, 18.0, 25.0), lines);
}

#[test]
fn projectiles_are_styled_by_owner_and_weapon() {
    assert_eq!(projectile_style(ProjectileOwner::Defender), (SKYBLUE, 3.0));

    let kick = ProjectileOwner::Alien {
        cell: Cell::new(RowKind::Kick, 0),
        weapon: WeaponKind::BassBomb,
        tier: CrossfireTier::Solo,
    };
    let hat = ProjectileOwner::Alien {
        cell: Cell::new(RowKind::ClosedHat, 4),
        weapon: WeaponKind::HatNeedle,
        tier: CrossfireTier::Trio,
    };
    assert_eq!(projectile_style(kick), (RED, 5.0));
    assert_eq!(projectile_style(hat), (YELLOW, 2.0));
}
