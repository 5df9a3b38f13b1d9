use std::time::Duration;

/// Coarse controller state derived from [`PlaybackState`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No track bound to the engine.
    Idle,
    Paused,
    Playing,
}

/// Read-only snapshot handed to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index of the bound track in the playlist.
    pub current: Option<usize>,
    pub is_playing: bool,
    /// Stored volume in `[0, 1]`. Muting never touches it.
    pub volume: f32,
    pub is_muted: bool,
    /// Percentage in `[0, 100]`.
    pub progress: f32,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(0.7, false)
    }
}

impl PlaybackState {
    pub fn new(volume: f32, is_muted: bool) -> Self {
        Self {
            current: None,
            is_playing: false,
            volume: clamp_volume(volume).unwrap_or(0.0),
            is_muted,
            progress: 0.0,
        }
    }

    pub fn mode(&self) -> Mode {
        match (self.current, self.is_playing) {
            (None, _) => Mode::Idle,
            (Some(_), false) => Mode::Paused,
            (Some(_), true) => Mode::Playing,
        }
    }

    /// Volume the engine should actually output.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }
}

/// Clamp a requested volume to `[0, 1]`; `None` for NaN.
pub fn clamp_volume(volume: f32) -> Option<f32> {
    if volume.is_nan() {
        None
    } else {
        Some(volume.clamp(0.0, 1.0))
    }
}

/// `100 * position / duration`, clamped to `[0, 100]`.
///
/// Unknown values and a zero duration yield 0.
pub fn progress_percent(position: Option<Duration>, duration: Option<Duration>) -> f32 {
    match (position, duration) {
        (Some(pos), Some(total)) if !total.is_zero() => {
            let pct = 100.0 * pos.as_secs_f64() / total.as_secs_f64();
            pct.clamp(0.0, 100.0) as f32
        }
        _ => 0.0,
    }
}
