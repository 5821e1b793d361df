//! Tunable run settings. Loaded from TOML by the tools; the app uses defaults.

use serde::{Deserialize, Serialize};

use crate::types::GameError;

pub const MIN_BPM: u32 = 60;
pub const MAX_BPM: u32 = 240;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub base_bpm: u32,
    pub base_loops: u32,
    pub final_wave: u32,
    pub prepare_frames: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { base_bpm: 120, base_loops: 4, final_wave: 20, prepare_frames: 90 }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_BPM..=MAX_BPM).contains(&self.base_bpm) {
            return Err(GameError::InvalidConfig(format!(
                "base_bpm {} must be within {MIN_BPM}..={MAX_BPM}",
                self.base_bpm
            )));
        }
        if self.base_loops == 0 {
            return Err(GameError::InvalidConfig("base_loops must be at least 1".to_string()));
        }
        if self.final_wave == 0 {
            return Err(GameError::InvalidConfig("final_wave must be at least 1".to_string()));
        }
        if self.prepare_frames == 0 {
            return Err(GameError::InvalidConfig("prepare_frames must be at least 1".to_string()));
        }
        Ok(())
    }
}
