//! Deterministic rhythm-combat simulation.
//!
//! A [`Game`] owns the pattern grid, the alien roster, the defender, and
//! every projectile in flight. Time only moves through [`Game::advance`],
//! which steps fixed 1/60 s frames until something needs a player decision
//! or the frame allowance runs out. All randomness comes from a ChaCha
//! stream seeded at construction, so a seed plus the journal of accepted
//! inputs reproduces a run exactly.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::config::GameConfig;
use crate::content::ContentPack;
use crate::state::*;
use crate::types::*;

mod bootstrap;
mod boss;
mod cards;
mod choices;
mod combat;
mod defender;
mod economy;
mod engine;
mod hash;
mod prompts;
mod sequencer;
mod threat;
mod waves;
mod weapons;

#[cfg(test)]
mod test_support;

pub use threat::ThreatMap;

/// Simulated frame length in microseconds (60 fps).
pub const FRAME_MICROS: u64 = 16_667;

pub struct Game {
    seed: u64,
    frame: u64,
    rng: ChaCha8Rng,
    content: ContentPack,
    config: GameConfig,
    state: GameState,
    log: Vec<LogEvent>,
    next_input_seq: u64,
    pending_prompt: Option<prompts::PendingPrompt>,
    pause_requested: bool,
    at_pause_boundary: bool,
}

impl Game {
    pub fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    pub fn is_at_pause_boundary(&self) -> bool {
        self.at_pause_boundary
    }

    pub fn current_frame(&self) -> u64 {
        self.frame
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    /// Uniform roll in `0..100`.
    fn roll_percent(&mut self) -> u32 {
        self.rng.next_u32() % 100
    }

    /// Uniform roll in `0..bound`; `bound` must be non-zero.
    fn roll_below(&mut self, bound: u32) -> u32 {
        self.rng.next_u32() % bound
    }
}
