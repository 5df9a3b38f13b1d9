use crate::library::TrackId;

/// Everything that can move the playback state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The playlist was just populated; bind its first track.
    Mount,
    SelectTrack(TrackId),
    Play,
    Pause,
    NextTrack,
    PrevTrack,
    SetVolume(f32),
    ToggleMute,
    /// Engine reported the end of a track.
    TrackEnded(TrackId),
    /// Engine started playing on its own.
    EnginePlayed(TrackId),
    /// Engine paused on its own.
    EnginePaused(TrackId),
    /// Binding or playing a track failed.
    LoadFailed(TrackId),
    /// Poll result, as a percentage.
    Progress(f32),
}
