use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::config::AudioSettings;
use crate::engine::{AudioEngine, EngineEvent, EngineEventKind, EngineHandle, EventSink};
use crate::library::{Playlist, Track, TrackId};

use super::action::Action;
use super::error::PlaybackError;
use super::reducer::{Effect, Transition, reduce};
use super::slot::HandleSlot;
use super::state::{Mode, PlaybackState, progress_percent};

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub volume: f32,
    pub muted: bool,
    /// Progress polling period while playing.
    pub progress_interval: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            volume: 0.7,
            muted: false,
            progress_interval: Duration::from_millis(100),
        }
    }
}

impl From<&AudioSettings> for ControllerOptions {
    fn from(audio: &AudioSettings) -> Self {
        Self {
            volume: audio.volume,
            muted: audio.muted,
            progress_interval: Duration::from_millis(audio.progress_poll_ms),
        }
    }
}

/// Progress timer, tagged with the track it was started for.
#[derive(Debug)]
struct ProgressPoll {
    track: TrackId,
    next_due: Instant,
}

/// Owns the playback state, the playlist and the one live engine handle.
///
/// Every method runs to completion on the caller's thread. Engine callbacks
/// are queued and only applied by [`Controller::dispatch_engine_events`].
pub struct Controller<E: AudioEngine> {
    slot: HandleSlot<E::Handle>,
    engine: E,
    playlist: Playlist,
    state: PlaybackState,
    poll: Option<ProgressPoll>,
    poll_interval: Duration,
    /// Number of binds so far; events from any other bind are stale.
    binds: u64,
    events_tx: Sender<EngineEvent>,
    events_rx: Receiver<EngineEvent>,
    error: Option<PlaybackError>,
}

impl<E: AudioEngine> Controller<E> {
    pub fn new(engine: E, options: ControllerOptions) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            slot: HandleSlot::new(),
            engine,
            playlist: Playlist::default(),
            state: PlaybackState::new(options.volume, options.muted),
            poll: None,
            poll_interval: options.progress_interval.max(Duration::from_millis(1)),
            binds: 0,
            events_tx,
            events_rx,
            error: None,
        }
    }

    /// Populate the playlist and bind its first track, paused.
    ///
    /// The playlist is set once; later calls are ignored and return `false`.
    pub fn load_playlist(&mut self, playlist: Playlist) -> bool {
        if !self.playlist.is_empty() {
            warn!("playlist already loaded, ignoring {} new tracks", playlist.len());
            return false;
        }
        info!("playlist loaded with {} tracks", playlist.len());
        self.playlist = playlist;
        self.dispatch(Action::Mount);
        true
    }

    pub fn snapshot(&self) -> &PlaybackState {
        &self.state
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current.and_then(|i| self.playlist.get(i))
    }

    /// Offset reported by the bound handle.
    pub fn position(&self) -> Option<Duration> {
        self.slot.get()?.position()
    }

    /// Engine duration of the bound track, else the track's hint.
    pub fn duration(&self) -> Option<Duration> {
        let hint = self.current_track()?.duration;
        self.slot.get().and_then(|h| h.duration()).or(hint)
    }

    /// Take the pending error signal, if any.
    pub fn take_error(&mut self) -> Option<PlaybackError> {
        self.error.take()
    }

    pub fn select_track(&mut self, id: &TrackId) {
        self.dispatch(Action::SelectTrack(id.clone()));
    }

    pub fn play(&mut self) {
        self.dispatch(Action::Play);
    }

    pub fn pause(&mut self) {
        self.dispatch(Action::Pause);
    }

    pub fn next_track(&mut self) {
        self.dispatch(Action::NextTrack);
    }

    pub fn prev_track(&mut self) {
        self.dispatch(Action::PrevTrack);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.dispatch(Action::SetVolume(volume));
    }

    pub fn toggle_mute(&mut self) {
        self.dispatch(Action::ToggleMute);
    }

    /// Run `action` through the transition table and apply its effects.
    /// Returns `false` when the action was a no-op.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let Some(Transition { state, effects }) = reduce(&self.state, &self.playlist, &action)
        else {
            trace!("ignored {action:?} while {:?}", self.state.mode());
            return false;
        };

        if !matches!(action, Action::Progress(_)) {
            debug!("{action:?}: {:?} -> {:?}", self.state.mode(), state.mode());
        }
        self.state = state;

        for effect in effects {
            if let Err(err) = self.apply(effect) {
                warn!("{err}");
                let track = err.track().clone();
                self.error = Some(err);
                self.dispatch(Action::LoadFailed(track));
                break;
            }
        }

        self.sync_poll(Instant::now());
        true
    }

    /// Apply queued engine callbacks. Returns how many were drained.
    pub fn dispatch_engine_events(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(EngineEvent { track, bind, kind }) = self.events_rx.try_recv() {
            drained += 1;
            if bind != self.binds {
                trace!("dropping {kind:?} from stale bind {bind} of {track}");
                continue;
            }
            let action = match kind {
                EngineEventKind::Loaded => {
                    debug!("engine loaded {track}");
                    continue;
                }
                EngineEventKind::Played => Action::EnginePlayed(track),
                EngineEventKind::Paused => Action::EnginePaused(track),
                EngineEventKind::Ended => Action::TrackEnded(track),
                EngineEventKind::Failed(message) => {
                    if let Some(current) = self.current_track().filter(|t| t.id == track) {
                        let err = PlaybackError::Engine {
                            track: track.clone(),
                            title: current.title.clone(),
                            message,
                        };
                        warn!("{err}");
                        self.error = Some(err);
                    }
                    Action::LoadFailed(track)
                }
            };
            self.dispatch(action);
        }
        drained
    }

    /// Recompute progress if the poll timer is due.
    pub fn tick(&mut self, now: Instant) {
        let Some(current) = self.current_track().map(|t| t.id.clone()) else {
            self.poll = None;
            return;
        };
        let Some(poll) = self.poll.as_mut() else {
            return;
        };
        if poll.track != current {
            trace!("dropping stale progress timer for {}", poll.track);
            self.poll = None;
            return;
        }
        if now < poll.next_due {
            return;
        }
        poll.next_due = now + self.poll_interval;

        let progress = progress_percent(self.position(), self.duration());
        self.dispatch(Action::Progress(progress));
    }

    #[cfg(test)]
    pub(super) fn polling_track(&self) -> Option<&TrackId> {
        self.poll.as_ref().map(|p| &p.track)
    }

    #[cfg(test)]
    pub(super) fn retag_poll(&mut self, track: TrackId) {
        if let Some(poll) = self.poll.as_mut() {
            poll.track = track;
        }
    }

    fn apply(&mut self, effect: Effect) -> Result<(), PlaybackError> {
        match effect {
            Effect::Bind(index) => {
                self.poll = None;
                let Some(track) = self.playlist.get(index) else {
                    return Ok(());
                };
                self.binds += 1;
                let events = EventSink::new(track.id.clone(), self.binds, self.events_tx.clone());
                let volume = self.state.effective_volume();
                let engine = &mut self.engine;

                let handle = self
                    .slot
                    .rebind(|| engine.load(track, events))
                    .map_err(|source| PlaybackError::Load {
                        track: track.id.clone(),
                        title: track.title.clone(),
                        source,
                    })?;
                handle.set_volume(volume);
                info!("bound \"{}\" ({})", track.title, track.id);
            }
            Effect::Play => {
                if let Some(handle) = self.slot.get_mut() {
                    handle.play();
                }
            }
            Effect::Pause => {
                if let Some(handle) = self.slot.get_mut() {
                    handle.pause();
                }
            }
            Effect::ApplyVolume(volume) => {
                if let Some(handle) = self.slot.get_mut() {
                    handle.set_volume(volume);
                }
            }
            Effect::Release => self.slot.release(),
        }
        Ok(())
    }

    /// Start the progress timer on entering `Playing`, cancel it otherwise.
    fn sync_poll(&mut self, now: Instant) {
        let playing = match self.state.mode() {
            Mode::Playing => self.current_track().map(|t| t.id.clone()),
            Mode::Idle | Mode::Paused => None,
        };

        match playing {
            Some(track) => {
                if self.poll.as_ref().is_some_and(|p| p.track == track) {
                    return;
                }
                self.poll = Some(ProgressPoll {
                    track,
                    next_due: now + self.poll_interval,
                });
            }
            None => {
                if let Some(poll) = self.poll.take() {
                    trace!("progress polling stopped for {}", poll.track);
                }
            }
        }
    }
}
