pub mod config;
pub mod content;
pub mod game;
pub mod journal;
pub mod journal_file;
pub mod pattern;
pub mod replay;
pub mod state;
pub mod types;

pub use config::GameConfig;
pub use content::ContentPack;
pub use game::Game;
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use journal_file::{JournalLoadError, JournalWriter, LoadedJournal, load_journal_from_file};
pub use pattern::{Pattern, PatternCodeError, decode_share_code};
pub use replay::*;
pub use state::GameState;
pub use types::*;
