//! `rodio`-backed engine: one output stream, one `Sink` per loaded track.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use lofty::prelude::AudioFile;
use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::library::Track;

use super::error::EngineError;
use super::events::{EngineEventKind, EventSink};
use super::source::resolve_source;
use super::{AudioEngine, EngineHandle};

pub struct RodioEngine {
    stream: OutputStream,
    root: Option<PathBuf>,
    end_watch: Duration,
}

impl RodioEngine {
    /// Open the default output device.
    ///
    /// `root` resolves relative track sources; `end_watch` is how often a
    /// playing sink is checked for having drained.
    pub fn open(root: Option<PathBuf>, end_watch: Duration) -> Result<Self, EngineError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| EngineError::Output(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            root,
            end_watch: end_watch.max(Duration::from_millis(1)),
        })
    }
}

impl AudioEngine for RodioEngine {
    type Handle = RodioHandle;

    fn load(&mut self, track: &Track, events: EventSink) -> Result<RodioHandle, EngineError> {
        let path = resolve_source(&track.src, self.root.as_deref())?;
        let file = File::open(&path).map_err(|source| EngineError::Open {
            path: path.clone(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| EngineError::Decode {
            path: path.clone(),
            source,
        })?;

        let duration = probe_duration(&path).or_else(|| decoder.total_duration());

        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(decoder);

        let sink = Arc::new(sink);
        let stopped = Arc::new(AtomicBool::new(false));
        spawn_end_watcher(sink.clone(), stopped.clone(), events.clone(), self.end_watch);

        debug!("loaded {} ({:?})", path.display(), duration);
        events.emit(EngineEventKind::Loaded);

        Ok(RodioHandle {
            sink,
            stopped,
            duration,
        })
    }
}

/// Container-level duration; decoders often cannot report one for mp3.
fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            debug!("could not probe {}: {e}", path.display());
            None
        }
    }
}

/// Emit `Ended` once the sink drains while not paused. Exits early once the
/// handle is unloaded.
fn spawn_end_watcher(
    sink: Arc<Sink>,
    stopped: Arc<AtomicBool>,
    events: EventSink,
    interval: Duration,
) {
    let spawned = thread::Builder::new()
        .name(format!("end-watch-{}", events.track()))
        .spawn(move || loop {
            thread::sleep(interval);
            if stopped.load(Ordering::Acquire) {
                break;
            }
            if reached_end(&stopped, || sink.is_paused(), || sink.empty()) {
                events.emit(EngineEventKind::Ended);
                break;
            }
        });

    if let Err(e) = spawned {
        warn!("could not start end-of-track watcher: {e}");
    }
}

/// A drained, unpaused sink is a natural end unless it was stopped.
///
/// `stopped` is read after the sink checks: `unload` empties the sink, so an
/// earlier read could race with it.
fn reached_end(
    stopped: &AtomicBool,
    is_paused: impl FnOnce() -> bool,
    is_empty: impl FnOnce() -> bool,
) -> bool {
    !is_paused() && is_empty() && !stopped.load(Ordering::Acquire)
}

pub struct RodioHandle {
    sink: Arc<Sink>,
    stopped: Arc<AtomicBool>,
    duration: Option<Duration>,
}

impl EngineHandle for RodioHandle {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn position(&self) -> Option<Duration> {
        if self.stopped.load(Ordering::Acquire) {
            return None;
        }
        Some(self.sink.get_pos())
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    fn unload(&mut self) {
        // Flag first so the watcher never reports the stop as a natural end.
        if !self.stopped.swap(true, Ordering::AcqRel) {
            self.sink.stop();
        }
    }
}

impl Drop for RodioHandle {
    fn drop(&mut self) {
        self.unload();
    }
}
