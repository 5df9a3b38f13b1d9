//! UI rendering helpers for the terminal user interface.
//!
//! Everything drawn here is read from the controller snapshot; the UI never
//! keeps playback state of its own.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::config::{ControlsSettings, LibrarySettings, TimeField, UiSettings};
use crate::engine::AudioEngine;
use crate::library::{Track, track_label};
use crate::playback::{Controller, Mode, PlaybackState};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    BTreeMap::from([
        ("j/k", "up/down"),
        ("gg/G", "top/bottom"),
        ("enter", "play selected song"),
        ("space/p", "play/pause"),
        ("h/l", "prev/next song"),
        ("m", "mute"),
        ("K", "metadata"),
        ("q", "quit"),
    ])
});

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text, incorporating the volume step.
fn controls_text(volume_step: f32) -> String {
    let order = [
        "j/k", "h/l", "enter", "space/p", "+/-", "m", "gg/G", "K", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "+/-" {
                Some(format!("[+/-] volume {}%", percent(volume_step)))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn percent(v: f32) -> u32 {
    (v.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    parts.push(format!("-{}", format_mmss(t.saturating_sub(elapsed))));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn mode_text(mode: Mode) -> &'static str {
    match mode {
        Mode::Idle => "Stopped",
        Mode::Paused => "Paused",
        Mode::Playing => "Playing",
    }
}

fn volume_text(state: &PlaybackState) -> String {
    if state.is_muted {
        format!("VOL: {}% (muted)", percent(state.volume))
    } else {
        format!("VOL: {}%", percent(state.volume))
    }
}

/// Gauge fill in `[0, 1]` for a progress percentage.
fn progress_ratio(progress: f32) -> f64 {
    (f64::from(progress) / 100.0).clamp(0.0, 1.0)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Format an optional duration, rounding up partial seconds, showing total seconds.
fn format_duration_mmss_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }
    format!("{}:{:02} ({}s)", total_secs / 60, total_secs % 60, total_secs)
}

fn metadata_text(track: Option<&Track>) -> String {
    let Some(track) = track else {
        return "No track selected".to_string();
    };
    format!(
        "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nSource: {}",
        track.title,
        track.artist.as_deref().unwrap_or("-"),
        track.album.as_deref().unwrap_or("-"),
        format_duration_mmss_ceil(track.duration),
        track.src,
    )
}

/// Visible `[start, end)` window of a list of `total` rows that keeps
/// `selected` centered when possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Render the entire UI into the provided `frame`.
pub fn draw<E: AudioEngine>(
    frame: &mut Frame,
    app: &App,
    controller: &Controller<E>,
    ui_settings: &UiSettings,
    library_settings: &LibrarySettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" backdrop ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let state = controller.snapshot();
    let elapsed = controller.position().unwrap_or_default();
    let total = controller.duration();

    // Status box
    let mut lines: Vec<Line> = Vec::new();
    match controller.current_track() {
        Some(track) => {
            let song = track_label(
                track,
                &ui_settings.now_playing_track_fields,
                &ui_settings.now_playing_track_separator,
            );
            lines.push(Line::from(format!("Song: {song}")));
        }
        None => lines.push(Line::from("Song: -")),
    }
    let cursor = if app.follow_playback {
        "CURSOR: Follow"
    } else {
        "CURSOR: Free-roam"
    };
    lines.push(Line::from(format!(
        "{} • {} • {cursor}",
        mode_text(state.mode()),
        volume_text(state)
    )));
    if let Some(err) = &app.error {
        lines.push(Line::from(format!("Error: {err}")).style(Style::default().fg(Color::Red)));
    }
    let status = Paragraph::new(lines)
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let time = if state.mode() == Mode::Idle {
        None
    } else {
        now_playing_time_text(elapsed, total, ui_settings)
    };
    let gauge = Gauge::default()
        .block(Block::bordered().title(" progress "))
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(progress_ratio(state.progress))
        .label(time.unwrap_or_default());
    frame.render_widget(gauge, chunks[2]);

    // Only build ListItems for the visible window.
    let playlist = controller.playlist();
    let list_area = chunks[3];
    let (start, end) = visible_window(
        playlist.len(),
        list_area.height.saturating_sub(2) as usize,
        app.selected,
    );
    let items: Vec<ListItem> = playlist
        .iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(i, track)| {
            let label = track_label(
                track,
                &library_settings.display_fields,
                &library_settings.display_separator,
            );
            if state.current == Some(i) {
                ListItem::new(format!("♪ {label}")).bold()
            } else {
                ListItem::new(format!("  {label}"))
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !playlist.is_empty() {
        list_state.select(Some(app.selected.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, list_area, &mut list_state);

    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 9, list_area);
        frame.render_widget(Clear, popup_area);
        let meta = Paragraph::new(metadata_text(playlist.get(app.selected)))
            .block(
                Block::default()
                    .padding(LEFT_PAD)
                    .borders(Borders::ALL)
                    .title(" metadata (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta, popup_area);
    }

    let footer = Paragraph::new(controls_text(controls_settings.volume_step))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}
