use std::path::PathBuf;

use thiserror::Error;

/// Failures while binding a track to the audio engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unsupported source `{0}`")]
    UnsupportedSource(String),

    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no usable audio output: {0}")]
    Output(String),
}
