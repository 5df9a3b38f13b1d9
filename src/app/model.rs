//! Application model: cursor position, follow mode and the last error shown.

use crate::engine::AudioEngine;
use crate::playback::{Controller, Mode};

/// The main application model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    /// Playlist index under the cursor.
    pub selected: usize,
    /// Keep the cursor on the bound track as playback moves.
    pub follow_playback: bool,
    pub metadata_window: bool,
    /// Message of the last playback error, shown until a track binds again.
    pub error: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(true)
    }
}

impl App {
    pub fn new(follow_playback: bool) -> Self {
        Self {
            selected: 0,
            follow_playback,
            metadata_window: false,
            error: None,
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected.min(len - 1) + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.selected = match self.selected.min(len - 1) {
                0 => len - 1,
                i => i - 1,
            };
        }
    }

    pub fn top(&mut self) {
        self.selected = 0;
    }

    pub fn bottom(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Pull the error signal and the bound track from `controller`.
    ///
    /// A pending error replaces the shown message; the message is cleared as
    /// soon as a track is bound again.
    pub fn sync<E: AudioEngine>(&mut self, controller: &mut Controller<E>) {
        if let Some(err) = controller.take_error() {
            self.error = Some(err.to_string());
        } else if controller.mode() != Mode::Idle {
            self.error = None;
        }

        let len = controller.playlist().len();
        if self.follow_playback {
            if let Some(current) = controller.snapshot().current {
                self.selected = current;
            }
        }
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}
