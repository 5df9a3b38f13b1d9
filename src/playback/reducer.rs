use crate::library::{Playlist, TrackId};

use super::action::Action;
use super::state::{Mode, PlaybackState, clamp_volume};

/// Side effect the controller performs on the engine after a transition.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Effect {
    /// Release the current handle, then load the track at this index.
    Bind(usize),
    Play,
    Pause,
    /// Push this effective volume to the bound handle.
    ApplyVolume(f32),
    /// Release the current handle without binding another.
    Release,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: PlaybackState,
    pub effects: Vec<Effect>,
}

/// Compute the transition for `action`. `None` means the action is a no-op and
/// the state must stay exactly as it is.
pub fn reduce(state: &PlaybackState, playlist: &Playlist, action: &Action) -> Option<Transition> {
    // Stale indices would break the membership invariant; treat them as Idle.
    let mode = match state.current {
        Some(i) if i >= playlist.len() => Mode::Idle,
        _ => state.mode(),
    };

    match (mode, action) {
        (Mode::Idle, Action::Mount) if !playlist.is_empty() => Some(rebind(
            &PlaybackState {
                is_playing: false,
                ..state.clone()
            },
            0,
        )),
        (_, Action::Mount) => None,

        (_, Action::SelectTrack(id)) => {
            let index = playlist.position(id)?;
            Some(rebind(state, index))
        }

        (Mode::Paused, Action::Play) => Some(Transition {
            state: PlaybackState {
                is_playing: true,
                ..state.clone()
            },
            effects: vec![Effect::Play],
        }),
        (_, Action::Play) => None,

        (Mode::Playing, Action::Pause) => Some(Transition {
            state: PlaybackState {
                is_playing: false,
                ..state.clone()
            },
            effects: vec![Effect::Pause],
        }),
        (_, Action::Pause) => None,

        (Mode::Idle, Action::NextTrack | Action::PrevTrack | Action::TrackEnded(_)) => None,
        (_, Action::NextTrack) => {
            let index = playlist.next_index(state.current?)?;
            Some(rebind(state, index))
        }
        (_, Action::PrevTrack) => {
            let index = playlist.prev_index(state.current?)?;
            Some(rebind(state, index))
        }
        (_, Action::TrackEnded(id)) if is_current(state, playlist, id) => {
            let index = playlist.next_index(state.current?)?;
            Some(rebind(state, index))
        }
        (_, Action::TrackEnded(_)) => None,

        (_, Action::SetVolume(requested)) => {
            let volume = clamp_volume(*requested)?;
            if volume == state.volume {
                return None;
            }
            let next = PlaybackState {
                volume,
                ..state.clone()
            };
            let effects = vec![Effect::ApplyVolume(next.effective_volume())];
            Some(Transition {
                state: next,
                effects,
            })
        }

        (_, Action::ToggleMute) => {
            let next = PlaybackState {
                is_muted: !state.is_muted,
                ..state.clone()
            };
            let effects = vec![Effect::ApplyVolume(next.effective_volume())];
            Some(Transition {
                state: next,
                effects,
            })
        }

        (Mode::Paused, Action::EnginePlayed(id)) if is_current(state, playlist, id) => {
            Some(Transition {
                state: PlaybackState {
                    is_playing: true,
                    ..state.clone()
                },
                effects: Vec::new(),
            })
        }
        (_, Action::EnginePlayed(_)) => None,

        (Mode::Playing, Action::EnginePaused(id)) if is_current(state, playlist, id) => {
            Some(Transition {
                state: PlaybackState {
                    is_playing: false,
                    ..state.clone()
                },
                effects: Vec::new(),
            })
        }
        (_, Action::EnginePaused(_)) => None,

        (Mode::Paused | Mode::Playing, Action::LoadFailed(id)) if is_current(state, playlist, id) => {
            Some(Transition {
                state: PlaybackState {
                    current: None,
                    is_playing: false,
                    progress: 0.0,
                    ..state.clone()
                },
                effects: vec![Effect::Release],
            })
        }
        (_, Action::LoadFailed(_)) => None,

        (Mode::Playing, Action::Progress(pct)) => {
            let progress = if pct.is_nan() {
                0.0
            } else {
                pct.clamp(0.0, 100.0)
            };
            if progress == state.progress {
                return None;
            }
            Some(Transition {
                state: PlaybackState {
                    progress,
                    ..state.clone()
                },
                effects: Vec::new(),
            })
        }
        (_, Action::Progress(_)) => None,
    }
}

fn is_current(state: &PlaybackState, playlist: &Playlist, id: &TrackId) -> bool {
    state
        .current
        .and_then(|i| playlist.get(i))
        .is_some_and(|t| &t.id == id)
}

/// Move to `index`: progress restarts at 0 and play/pause carries over.
fn rebind(state: &PlaybackState, index: usize) -> Transition {
    let mut effects = vec![Effect::Bind(index)];
    if state.is_playing {
        effects.push(Effect::Play);
    }
    Transition {
        state: PlaybackState {
            current: Some(index),
            progress: 0.0,
            ..state.clone()
        },
        effects,
    }
}
