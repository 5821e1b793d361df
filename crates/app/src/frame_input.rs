//! Keyboard input collection for one rendered frame.

use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

const ACTION_KEYS: [KeyCode; 13] = [
    KeyCode::Space,
    KeyCode::Period,
    KeyCode::Enter,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::S,
    KeyCode::X,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Escape,
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    /// Shift+R abandons the current run and starts a new seed.
    pub restart_requested: bool,
}

pub fn capture_frame_input() -> FrameInput {
    let keys_pressed: Vec<KeyCode> =
        ACTION_KEYS.into_iter().filter(|key| is_key_pressed(*key)).collect();

    let restart_requested = (is_key_down(KeyCode::LeftShift)
        || is_key_down(KeyCode::RightShift))
        && is_key_pressed(KeyCode::R);

    FrameInput { keys_pressed, restart_requested }
}
