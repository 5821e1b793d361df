mod frame_input;
mod game_layout;
mod ui_render;
mod ui_text;
mod window_config;

use std::process;
use std::{env, mem};

use app::app_loop::{AppMode, AppState};
use app::launch::{generate_runtime_seed, resolve_launch_args};
use app::progress_file::{ProgressFile, default_journal_path};
use backbeat_core::journal::InputPayload;
use backbeat_core::{Cell, ContentPack, Game, JournalWriter};
use macroquad::prelude::*;
use macroquad::window::Conf;
use taffy::TaffyTree;

use crate::frame_input::capture_frame_input;
use crate::game_layout::{compute_frame_layout, setup_layout};
use crate::ui_render::draw_frame;

/// One run in progress plus the journal recording it.
struct Session {
    game: Game,
    app: AppState,
    journal: Option<JournalWriter>,
    progress_saved: bool,
}

impl Session {
    fn start(seed: u64, content: &ContentPack, starting_pattern: &[Cell]) -> Self {
        let mut game = Game::new(seed, content);
        let journal = default_journal_path().and_then(|path| {
            JournalWriter::create(&path, seed, env!("CARGO_PKG_VERSION"), content.content_hash())
                .map_err(|err| eprintln!("journal disabled: {err}"))
                .ok()
        });
        let app = AppState::begin(&mut game);
        let mut session = Self { game, app, journal, progress_saved: false };

        for cell in starting_pattern {
            if session.game.place_alien(*cell).is_ok() {
                session.record(0, &InputPayload::PlaceAlien { cell: *cell });
            }
        }
        session
    }

    fn record(&mut self, tick_boundary: u64, payload: &InputPayload) {
        let Some(writer) = self.journal.as_mut() else {
            return;
        };
        if let Err(err) = writer.append(tick_boundary, payload) {
            eprintln!("journal write failed, recording stopped: {err}");
            self.journal = None;
        }
    }

    fn tick(&mut self, keys_pressed: &[KeyCode]) {
        self.app.tick(&mut self.game, keys_pressed);
        let accepted = mem::take(&mut self.app.accepted_inputs);
        for input in &accepted {
            self.record(input.tick_boundary, &input.payload);
        }
    }

    /// Folds this run into the stored progress once it has ended or been abandoned.
    fn save_progress(&mut self, progress: &mut ProgressFile) {
        if self.progress_saved {
            return;
        }
        self.progress_saved = true;
        let state = self.game.state();
        let share_code = state.pattern.share_code();
        progress.record_run(self.game.seed(), state.wave, state.score, &share_code);
        if let Some(path) = ProgressFile::get_default_path()
            && let Err(err) = progress.write_atomic(&path)
        {
            eprintln!("could not save progress: {err}");
        }
    }
}

fn window_conf() -> Conf {
    window_config::build_window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let options = match resolve_launch_args(&args, generate_runtime_seed()) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    let content = ContentPack::default();
    let mut progress = ProgressFile::get_default_path()
        .map(|path| ProgressFile::load_or_default(&path))
        .unwrap_or_default();
    let mut session = Session::start(options.seed.value(), &content, &options.starting_pattern);

    let mut taffy = TaffyTree::new();
    let nodes = match setup_layout(&mut taffy) {
        Ok(nodes) => nodes,
        Err(err) => {
            eprintln!("layout setup failed: {err}");
            process::exit(1);
        }
    };

    loop {
        let input = capture_frame_input();
        if input.keys_pressed.contains(&KeyCode::Escape) {
            session.save_progress(&mut progress);
            return;
        }
        if input.restart_requested {
            session.save_progress(&mut progress);
            session = Session::start(generate_runtime_seed(), &content, &[]);
        }

        session.tick(&input.keys_pressed);
        if matches!(session.app.mode, AppMode::Finished(_)) {
            session.save_progress(&mut progress);
        }

        clear_background(BLACK);
        match compute_frame_layout(&mut taffy, &nodes, screen_width(), screen_height()) {
            Ok(layout) => draw_frame(&session.game, &session.app, session.game.seed(), &layout),
            Err(err) => eprintln!("layout failed: {err}"),
        }
        next_frame().await
    }
}
