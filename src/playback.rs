//! Playback controller: the single source of truth for what is playing.
//!
//! Intents and engine callbacks become [`Action`]s. A pure [`reduce`] maps the
//! current [`PlaybackState`] and an action to the next state plus a list of
//! [`Effect`]s, and the [`Controller`] applies those effects to the one engine
//! handle it owns.

mod action;
mod controller;
mod error;
mod reducer;
mod slot;
mod state;

pub use action::Action;
pub use controller::{Controller, ControllerOptions};
pub use error::PlaybackError;
pub use reducer::{Effect, Transition, reduce};
pub use state::{Mode, PlaybackState, clamp_volume, progress_percent};
