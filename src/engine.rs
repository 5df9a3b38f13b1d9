//! Audio engine capability boundary.
//!
//! The controller only sees two traits: an [`AudioEngine`] that turns a track
//! into a live [`EngineHandle`], and the handle itself. Asynchronous engine
//! callbacks (loaded, played, paused, ended, failed) arrive as
//! [`EngineEvent`]s tagged with the track they belong to.

mod error;
mod events;
mod rodio_backend;
mod source;

#[cfg(test)]
pub(crate) mod fake;

use std::time::Duration;

use crate::library::Track;

pub use error::EngineError;
pub use events::{EngineEvent, EngineEventKind, EventSink};
pub use rodio_backend::RodioEngine;
pub use source::resolve_source;

/// Something that can bind a track's source to a playable handle.
pub trait AudioEngine {
    type Handle: EngineHandle;

    /// Load `track` and return a paused handle for it.
    ///
    /// Events for the returned handle must be sent through `events`.
    fn load(&mut self, track: &Track, events: EventSink) -> Result<Self::Handle, EngineError>;
}

/// A loaded track. Exactly one is alive at a time inside the controller.
pub trait EngineHandle {
    fn play(&mut self);

    fn pause(&mut self);

    /// Current playback offset; `None` while the engine cannot report one.
    fn position(&self) -> Option<Duration>;

    /// Total duration as known by the engine.
    fn duration(&self) -> Option<Duration>;

    /// Set the audible volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);

    /// Stop playback and free the underlying resources. Idempotent.
    fn unload(&mut self);
}

#[cfg(test)]
mod tests;
