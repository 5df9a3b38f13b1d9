use thiserror::Error;

use crate::engine::EngineError;
use crate::library::TrackId;

/// Error signal raised to the UI. Never returned from an intent.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("could not load \"{title}\": {source}")]
    Load {
        track: TrackId,
        title: String,
        #[source]
        source: EngineError,
    },

    #[error("playback of \"{title}\" failed: {message}")]
    Engine {
        track: TrackId,
        title: String,
        message: String,
    },
}

impl PlaybackError {
    pub fn track(&self) -> &TrackId {
        match self {
            Self::Load { track, .. } | Self::Engine { track, .. } => track,
        }
    }
}
