use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::engine::RodioEngine;
use crate::playback::{Controller, ControllerOptions};

mod event_loop;
mod keys;
mod logging;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let dir = env::args_os().nth(1).map(PathBuf::from);
    let (playlist, source) = startup::build_playlist(dir.as_deref(), &settings);
    info!("using {} tracks from {source}", playlist.len());

    let root = startup::library_root(&settings);
    info!("resolving track sources against {root:?}");
    let engine = RodioEngine::open(root, Duration::from_millis(settings.audio.end_watch_ms))?;
    let mut controller = Controller::new(engine, ControllerOptions::from(&settings.audio));
    startup::mount(&mut controller, playlist, &settings);

    let mut app = App::new(settings.ui.follow_playback);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
