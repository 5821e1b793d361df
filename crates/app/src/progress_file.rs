use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const PROGRESS_FORMAT_VERSION: u32 = 1;

fn data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "BackbeatAssault").map(|proj_dirs| proj_dirs.data_dir().to_path_buf())
}

/// Where the app journals the inputs of the run in progress.
pub fn default_journal_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("last_run.jsonl"))
}

/// Best results across runs, persisted next to the app's other data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProgressFile {
    pub format_version: u32,
    pub best_wave: u32,
    pub high_score: i64,
    pub last_share_code: Option<String>,
    pub last_seed: Option<u64>,
}

impl Default for ProgressFile {
    fn default() -> Self {
        Self {
            format_version: PROGRESS_FORMAT_VERSION,
            best_wave: 0,
            high_score: 0,
            last_share_code: None,
            last_seed: None,
        }
    }
}

impl ProgressFile {
    pub fn get_default_path() -> Option<PathBuf> {
        data_dir().map(|dir| dir.join("progress.json"))
    }

    /// Folds one finished or abandoned run into the stored bests.
    /// Returns `true` when the high score improved.
    pub fn record_run(&mut self, seed: u64, wave: u32, score: i64, share_code: &str) -> bool {
        self.best_wave = self.best_wave.max(wave);
        self.last_seed = Some(seed);
        if !share_code.is_empty() {
            self.last_share_code = Some(share_code.to_string());
        }
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let progress: Self = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if progress.format_version != PROGRESS_FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported progress format {}", progress.format_version),
            ));
        }
        Ok(progress)
    }

    /// Loads the stored progress, starting fresh when the file is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
