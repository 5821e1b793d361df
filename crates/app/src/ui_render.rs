//! Rendering for the playfield, the pattern grid, and the text panels.

use crate::game_layout::{FrameLayout, PanelRect};
use crate::ui_text::{event_log_line, finished_recap_lines, hud_lines, status_text};
use app::app_loop::{AppMode, AppState};
use backbeat_core::state::{
    ALIEN_HALF_SIZE, DEFENDER_HALF_HEIGHT, DEFENDER_HALF_WIDTH, FIELD_HEIGHT, FIELD_WIDTH,
    ProjectileOwner, ZONE_COUNT, ZONE_WIDTH,
};
use backbeat_core::{Cell, Game, ROWS, RowKind, STEPS, Vec2, WeaponKind};
use macroquad::prelude::*;

const BORDER_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.2, a: 1.0 };
const BORDER_THICKNESS: f32 = 1.0;
const PANEL_PAD_X: f32 = 15.0;
const PANEL_PAD_Y: f32 = 25.0;
const LINE_HEIGHT: f32 = 18.0;
const GRID_LABEL_WIDTH: f32 = 70.0;
const GRID_GAP: f32 = 2.0;
const DEFENDER_SHOT_RADIUS: f32 = 3.0;

/// Maps field coordinates into a panel, preserving the field's aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldView {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale: f32,
}

impl FieldView {
    pub fn fit(panel: PanelRect) -> Self {
        let scale = panel.fit_scale(FIELD_WIDTH, FIELD_HEIGHT);
        Self {
            origin_x: panel.x + (panel.width - FIELD_WIDTH * scale) / 2.0,
            origin_y: panel.y + (panel.height - FIELD_HEIGHT * scale) / 2.0,
            scale,
        }
    }

    pub fn to_screen(&self, pos: Vec2) -> (f32, f32) {
        (self.origin_x + pos.x * self.scale, self.origin_y + pos.y * self.scale)
    }
}

pub fn draw_frame(game: &Game, app_state: &AppState, run_seed: u64, layout: &FrameLayout) {
    draw_panel_borders(layout);
    draw_status_panel(app_state, layout.status);
    draw_playfield(game, layout.playfield);
    draw_grid(game, app_state.cursor, layout.grid);
    draw_hud_panel(game, app_state, run_seed, layout.hud);
    draw_event_log(game, layout.event_log);
}

fn draw_panel_borders(layout: &FrameLayout) {
    for panel in [layout.status, layout.playfield, layout.grid, layout.hud, layout.event_log] {
        draw_rectangle_lines(
            panel.x,
            panel.y,
            panel.width,
            panel.height,
            BORDER_THICKNESS,
            BORDER_COLOR,
        );
    }
}

fn draw_status_panel(app_state: &AppState, panel: PanelRect) {
    let color = if app_state.last_rejection.is_some() { ORANGE } else { WHITE };
    draw_text(&status_text(app_state), panel.x + PANEL_PAD_X, panel.y + PANEL_PAD_Y, 20.0, color);
}

fn draw_playfield(game: &Game, panel: PanelRect) {
    let view = FieldView::fit(panel);
    let state = game.state();

    let threat = game.current_threat_map();
    for zone in 0..ZONE_COUNT {
        let alpha = threat_alpha(threat.threat(zone));
        if alpha <= 0.0 {
            continue;
        }
        let (x, y) = view.to_screen(Vec2::new(zone as f32 * ZONE_WIDTH, 0.0));
        draw_rectangle(
            x,
            y,
            ZONE_WIDTH * view.scale,
            FIELD_HEIGHT * view.scale,
            Color { r: 0.8, g: 0.1, b: 0.1, a: alpha },
        );
    }

    for alien in state.aliens.values() {
        let (x, y) = view.to_screen(alien.pos);
        let half = ALIEN_HALF_SIZE * view.scale;
        draw_rectangle(x - half, y - half, half * 2.0, half * 2.0, row_color(alien.cell.row));
    }

    for projectile in state.projectiles.values() {
        let (x, y) = view.to_screen(projectile.pos);
        let (color, radius) = projectile_style(projectile.owner);
        draw_circle(x, y, radius * view.scale.max(0.5), color);
    }

    let defender = &state.defender;
    if defender.is_alive() {
        let (x, y) = view.to_screen(defender.pos);
        let color = if defender.boss.is_some() { MAGENTA } else { GREEN };
        draw_rectangle(
            x - DEFENDER_HALF_WIDTH * view.scale,
            y - DEFENDER_HALF_HEIGHT * view.scale,
            DEFENDER_HALF_WIDTH * 2.0 * view.scale,
            DEFENDER_HALF_HEIGHT * 2.0 * view.scale,
            color,
        );
    }
}

fn draw_grid(game: &Game, cursor: Cell, panel: PanelRect) {
    let state = game.state();
    let cell_width = (panel.width - GRID_LABEL_WIDTH - PANEL_PAD_X * 2.0) / STEPS as f32;
    let cell_height = (panel.height - PANEL_PAD_X * 2.0) / ROWS as f32;
    let origin_x = panel.x + PANEL_PAD_X + GRID_LABEL_WIDTH;
    let origin_y = panel.y + PANEL_PAD_X;

    for row in RowKind::ALL {
        let y = origin_y + row.index() as f32 * cell_height;
        let label = format!("{row:?} {}", game.placement_cost(row));
        draw_text(&label, panel.x + PANEL_PAD_X, y + cell_height * 0.7, 16.0, LIGHTGRAY);

        for step in 0..STEPS as u8 {
            let cell = Cell::new(row, step);
            let x = origin_x + f32::from(step) * cell_width;
            let color = grid_cell_color(
                row,
                state.pattern.is_active(cell),
                state.sequencer.step == Some(step),
            );
            draw_rectangle(
                x + GRID_GAP,
                y + GRID_GAP,
                cell_width - GRID_GAP * 2.0,
                cell_height - GRID_GAP * 2.0,
                color,
            );
            if cell == cursor {
                draw_rectangle_lines(x, y, cell_width, cell_height, 2.0, YELLOW);
            }
        }
    }
}

fn draw_hud_panel(game: &Game, app_state: &AppState, run_seed: u64, panel: PanelRect) {
    let text_x = panel.x + PANEL_PAD_X;
    let mut text_y = panel.y + PANEL_PAD_Y;

    let lines = match &app_state.mode {
        AppMode::Finished(outcome) => finished_recap_lines(game, run_seed, outcome),
        _ => hud_lines(game, run_seed),
    };
    for line in fit_lines_to_panel(&lines, panel.height, LINE_HEIGHT, PANEL_PAD_Y) {
        draw_text(&line, text_x, text_y, 16.0, WHITE);
        text_y += LINE_HEIGHT;
    }
}

fn draw_event_log(game: &Game, panel: PanelRect) {
    draw_text("Event log", panel.x + PANEL_PAD_X, panel.y + 20.0, 22.0, YELLOW);
    let events = game.log();
    let visible = ((panel.height - PANEL_PAD_Y) / LINE_HEIGHT).max(0.0) as usize;
    let start = events.len().saturating_sub(visible.saturating_sub(1));

    for (index, event) in events[start..].iter().enumerate() {
        draw_text(
            &event_log_line(event),
            panel.x + PANEL_PAD_X,
            panel.y + 20.0 + (index as f32 + 1.0) * LINE_HEIGHT,
            16.0,
            LIGHTGRAY,
        );
    }
}

fn fit_lines_to_panel(
    lines: &[String],
    panel_height: f32,
    line_step: f32,
    panel_pad_y: f32,
) -> Vec<String> {
    if line_step <= 0.0 {
        return Vec::new();
    }

    let usable_height = (panel_height - panel_pad_y).max(0.0);
    let max_lines = (usable_height / line_step).floor() as usize;
    if lines.len() <= max_lines {
        return lines.to_vec();
    }
    if max_lines == 0 {
        return Vec::new();
    }

    let hidden_count = lines.len() - (max_lines - 1);
    let mut fitted_lines = lines[..max_lines - 1].to_vec();
    fitted_lines.push(format!("... and {hidden_count} more"));
    fitted_lines
}

/// Zone overlay opacity; saturates at a threat of 1.
fn threat_alpha(threat: f32) -> f32 {
    (threat * 0.35).clamp(0.0, 0.35)
}

fn grid_cell_color(row: RowKind, active: bool, playing_column: bool) -> Color {
    match (active, playing_column) {
        (true, true) => WHITE,
        (true, false) => row_color(row),
        (false, true) => Color { r: 0.25, g: 0.25, b: 0.3, a: 1.0 },
        (false, false) => Color { r: 0.12, g: 0.12, b: 0.14, a: 1.0 },
    }
}

/// Alien shots take their row colour and a size that reads as the weapon's weight.
fn projectile_style(owner: ProjectileOwner) -> (Color, f32) {
    let ProjectileOwner::Alien { cell, weapon, .. } = owner else {
        return (SKYBLUE, DEFENDER_SHOT_RADIUS);
    };
    let radius = match weapon {
        WeaponKind::BassBomb => 5.0,
        WeaponKind::TomShell => 4.0,
        WeaponKind::SnareShot | WeaponKind::ClapBurst => 3.0,
        WeaponKind::HatSpray => 2.5,
        WeaponKind::HatNeedle => 2.0,
    };
    (row_color(cell.row), radius)
}

fn row_color(row: RowKind) -> Color {
    match row {
        RowKind::Kick => RED,
        RowKind::Snare => ORANGE,
        RowKind::ClosedHat => YELLOW,
        RowKind::OpenHat => GOLD,
        RowKind::Clap => PINK,
        RowKind::Tom => PURPLE,
    }
}

#[cfg(test)]
mod tests;
