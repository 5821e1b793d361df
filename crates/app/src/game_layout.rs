//! Layout model for the game's on-screen panels.

use taffy::TaffyTree;
use taffy::prelude::*;

pub struct LayoutNodes {
    root: NodeId,
    status: NodeId,
    main_row: NodeId,
    left_col: NodeId,
    playfield: NodeId,
    grid: NodeId,
    right_col: NodeId,
    hud: NodeId,
    event_log: NodeId,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PanelRect {
    /// Uniform scale that fits a `width` x `height` area inside this panel.
    pub fn fit_scale(&self, width: f32, height: f32) -> f32 {
        if width <= 0.0 || height <= 0.0 {
            return 0.0;
        }
        (self.width / width).min(self.height / height).max(0.0)
    }
}

pub struct FrameLayout {
    pub status: PanelRect,
    pub playfield: PanelRect,
    pub grid: PanelRect,
    pub hud: PanelRect,
    pub event_log: PanelRect,
}

pub fn setup_layout(taffy: &mut TaffyTree<()>) -> taffy::TaffyResult<LayoutNodes> {
    let status = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(40.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(15.0) },
        ..Default::default()
    })?;
    let playfield = taffy.new_leaf(Style {
        flex_grow: 3.0,
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(15.0) },
        ..Default::default()
    })?;
    let grid = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() })?;
    let left_col = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_grow: 3.0,
            margin: taffy::Rect { left: zero(), right: length(15.0), top: zero(), bottom: zero() },
            ..Default::default()
        },
        &[playfield, grid],
    )?;
    let hud = taffy.new_leaf(Style {
        size: Size { width: percent(1.0), height: length(190.0) },
        margin: taffy::Rect { left: zero(), right: zero(), top: zero(), bottom: length(15.0) },
        ..Default::default()
    })?;
    let event_log = taffy.new_leaf(Style { flex_grow: 1.0, ..Default::default() })?;
    let right_col = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            flex_grow: 1.0,
            ..Default::default()
        },
        &[hud, event_log],
    )?;
    let main_row = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            size: Size { width: percent(1.0), height: percent(1.0) },
            flex_grow: 1.0,
            ..Default::default()
        },
        &[left_col, right_col],
    )?;
    let root = taffy.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size { width: percent(1.0), height: percent(1.0) },
            padding: taffy::Rect {
                left: length(15.0),
                right: length(15.0),
                top: length(15.0),
                bottom: length(15.0),
            },
            ..Default::default()
        },
        &[status, main_row],
    )?;
    Ok(LayoutNodes { root, status, main_row, left_col, playfield, grid, right_col, hud, event_log })
}

pub fn compute_frame_layout(
    taffy: &mut TaffyTree<()>,
    nodes: &LayoutNodes,
    viewport_width: f32,
    viewport_height: f32,
) -> taffy::TaffyResult<FrameLayout> {
    let available_size = Size {
        width: AvailableSpace::Definite(viewport_width),
        height: AvailableSpace::Definite(viewport_height),
    };
    taffy.compute_layout(nodes.root, available_size)?;

    let l_root = taffy.layout(nodes.root)?;
    let l_main = taffy.layout(nodes.main_row)?;
    let l_left = taffy.layout(nodes.left_col)?;
    let l_right = taffy.layout(nodes.right_col)?;

    Ok(FrameLayout {
        status: panel_rect(taffy.layout(nodes.status)?, &[l_root]),
        playfield: panel_rect(taffy.layout(nodes.playfield)?, &[l_root, l_main, l_left]),
        grid: panel_rect(taffy.layout(nodes.grid)?, &[l_root, l_main, l_left]),
        hud: panel_rect(taffy.layout(nodes.hud)?, &[l_root, l_main, l_right]),
        event_log: panel_rect(taffy.layout(nodes.event_log)?, &[l_root, l_main, l_right]),
    })
}

fn panel_rect(layout: &taffy::Layout, parents: &[&taffy::Layout]) -> PanelRect {
    let mut x = layout.location.x;
    let mut y = layout.location.y;
    for parent in parents {
        x += parent.location.x;
        y += parent.location.y;
    }

    PanelRect { x, y, width: layout.size.width, height: layout.size.height }
}
