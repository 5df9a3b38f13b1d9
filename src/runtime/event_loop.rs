use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::engine::AudioEngine;
use crate::playback::{Controller, Mode};
use crate::runtime::keys::{Command, KeyMap};
use crate::ui;

/// Main terminal event loop: drains engine events, ticks progress, draws and
/// handles input. Returns `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<E>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut keys = KeyMap::default();

    loop {
        controller.dispatch_engine_events();
        controller.tick(Instant::now());
        app.sync(controller);

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                controller,
                &settings.ui,
                &settings.library,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = keys.command(key) {
                    if handle_command(cmd, settings, app, controller) {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Apply one command. Returns `true` when the app should quit.
fn handle_command<E: AudioEngine>(
    cmd: Command,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut Controller<E>,
) -> bool {
    debug!("command {cmd:?}");
    let len = controller.playlist().len();

    match cmd {
        Command::Quit => return true,
        Command::PlayPause => {
            app.follow_playback_on();
            match controller.mode() {
                Mode::Playing => controller.pause(),
                Mode::Paused => controller.play(),
                // Nothing bound (after a failed load): retry the cursor's track.
                Mode::Idle => {
                    let id = controller.playlist().get(app.selected).map(|t| t.id.clone());
                    if let Some(id) = id {
                        controller.select_track(&id);
                        controller.play();
                    }
                }
            }
        }
        Command::Next => {
            app.follow_playback_on();
            controller.next_track();
        }
        Command::Prev => {
            app.follow_playback_on();
            controller.prev_track();
        }
        Command::CursorDown => {
            app.follow_playback_off();
            app.next(len);
        }
        Command::CursorUp => {
            app.follow_playback_off();
            app.prev(len);
        }
        Command::CursorTop => {
            app.follow_playback_off();
            app.top();
        }
        Command::CursorBottom => {
            app.follow_playback_off();
            app.bottom(len);
        }
        Command::SelectUnderCursor => {
            let is_playing_selected = controller.mode() == Mode::Playing
                && controller.snapshot().current == Some(app.selected);
            if !is_playing_selected {
                if let Some(id) = controller.playlist().get(app.selected).map(|t| t.id.clone()) {
                    app.follow_playback_on();
                    controller.select_track(&id);
                    controller.play();
                }
            }
        }
        Command::VolumeUp => {
            let volume = controller.snapshot().volume + settings.controls.volume_step;
            controller.set_volume(volume);
        }
        Command::VolumeDown => {
            let volume = controller.snapshot().volume - settings.controls.volume_step;
            controller.set_volume(volume);
        }
        Command::ToggleMute => controller.toggle_mute(),
        Command::ToggleMetadata => app.toggle_metadata_window(),
    }

    false
}
