use std::sync::mpsc::Sender;

use crate::library::TrackId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEventKind {
    /// Source decoded and ready.
    Loaded,
    /// The engine started playing on its own.
    Played,
    /// The engine paused on its own.
    Paused,
    /// Playback reached the end of the source.
    Ended,
    /// Playback failed after the handle was bound.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineEvent {
    pub track: TrackId,
    /// Sequence number of the bind that produced the event.
    pub bind: u64,
    pub kind: EngineEventKind,
}

/// Sending half handed to a handle; stamps every event with its track and
/// bind number.
#[derive(Debug, Clone)]
pub struct EventSink {
    track: TrackId,
    bind: u64,
    tx: Sender<EngineEvent>,
}

impl EventSink {
    pub fn new(track: TrackId, bind: u64, tx: Sender<EngineEvent>) -> Self {
        Self { track, bind, tx }
    }

    pub fn track(&self) -> &TrackId {
        &self.track
    }

    /// Emit an event. A dropped receiver means the controller is gone, so
    /// the event is discarded.
    pub fn emit(&self, kind: EngineEventKind) {
        let _ = self.tx.send(EngineEvent {
            track: self.track.clone(),
            bind: self.bind,
            kind,
        });
    }
}
