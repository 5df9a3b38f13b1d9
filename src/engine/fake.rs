//! Scriptable in-memory engine used by controller tests.
//!
//! Clones share one state, so a test keeps a probe while the controller owns
//! the engine.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use crate::library::{Track, TrackId};

use super::{AudioEngine, EngineError, EngineEventKind, EngineHandle, EventSink};

#[derive(Debug, Default)]
struct Shared {
    live: usize,
    max_live: usize,
    loads: Vec<TrackId>,
    unloads: usize,
    failing: HashSet<String>,
    position: Option<Duration>,
    duration: Option<Duration>,
    volume: Option<f32>,
    playing: bool,
    sinks: Vec<EventSink>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeEngine {
    shared: Rc<RefCell<Shared>>,
}

impl FakeEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every later load of `src` fail.
    pub(crate) fn fail_source(&self, src: &str) {
        self.shared.borrow_mut().failing.insert(src.to_string());
    }

    pub(crate) fn heal_source(&self, src: &str) {
        self.shared.borrow_mut().failing.remove(src);
    }

    /// Script what every handle reports for position and duration.
    pub(crate) fn set_clock(&self, position: Option<Duration>, duration: Option<Duration>) {
        let mut s = self.shared.borrow_mut();
        s.position = position;
        s.duration = duration;
    }

    pub(crate) fn live(&self) -> usize {
        self.shared.borrow().live
    }

    pub(crate) fn max_live(&self) -> usize {
        self.shared.borrow().max_live
    }

    pub(crate) fn loads(&self) -> Vec<TrackId> {
        self.shared.borrow().loads.clone()
    }

    pub(crate) fn unloads(&self) -> usize {
        self.shared.borrow().unloads
    }

    pub(crate) fn volume(&self) -> Option<f32> {
        self.shared.borrow().volume
    }

    pub(crate) fn is_playing(&self) -> bool {
        self.shared.borrow().playing
    }

    /// Emit an event from the most recently loaded handle.
    pub(crate) fn emit(&self, kind: EngineEventKind) {
        let sink = self.shared.borrow().sinks.last().cloned();
        if let Some(sink) = sink {
            sink.emit(kind);
        }
    }

    /// Emit an event from the `n`th handle ever loaded.
    pub(crate) fn emit_from(&self, n: usize, kind: EngineEventKind) {
        let sink = self.shared.borrow().sinks.get(n).cloned();
        if let Some(sink) = sink {
            sink.emit(kind);
        }
    }
}

impl AudioEngine for FakeEngine {
    type Handle = FakeHandle;

    fn load(&mut self, track: &Track, events: EventSink) -> Result<FakeHandle, EngineError> {
        let mut s = self.shared.borrow_mut();
        if s.failing.contains(&track.src) {
            return Err(EngineError::UnsupportedSource(track.src.clone()));
        }
        s.live += 1;
        s.max_live = s.max_live.max(s.live);
        s.loads.push(track.id.clone());
        s.sinks.push(events.clone());
        drop(s);

        events.emit(EngineEventKind::Loaded);
        Ok(FakeHandle {
            shared: self.shared.clone(),
            released: false,
        })
    }
}

#[derive(Debug)]
pub(crate) struct FakeHandle {
    shared: Rc<RefCell<Shared>>,
    released: bool,
}

impl EngineHandle for FakeHandle {
    fn play(&mut self) {
        self.shared.borrow_mut().playing = true;
    }

    fn pause(&mut self) {
        self.shared.borrow_mut().playing = false;
    }

    fn position(&self) -> Option<Duration> {
        self.shared.borrow().position
    }

    fn duration(&self) -> Option<Duration> {
        self.shared.borrow().duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.shared.borrow_mut().volume = Some(volume);
    }

    fn unload(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let mut s = self.shared.borrow_mut();
        s.live -= 1;
        s.unloads += 1;
        s.playing = false;
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.unload();
    }
}
