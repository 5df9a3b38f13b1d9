use log::error;
use serde::Deserialize;

use crate::config::TrackEntry;

use super::model::{Playlist, Track};

const BUILTIN_PLAYLIST: &str = include_str!("../../assets/playlist.toml");

#[derive(Debug, Deserialize)]
struct PlaylistFile {
    #[serde(default)]
    playlist: Vec<TrackEntry>,
}

/// Playlist compiled into the binary, used when nothing else is configured.
pub fn builtin_playlist() -> Playlist {
    match parse_playlist(BUILTIN_PLAYLIST) {
        Ok(playlist) => playlist,
        Err(e) => {
            error!("built-in playlist is malformed: {e}");
            Playlist::default()
        }
    }
}

pub(super) fn parse_playlist(text: &str) -> Result<Playlist, toml::de::Error> {
    let file: PlaylistFile = toml::from_str(text)?;
    Ok(Playlist::new(file.playlist.iter().map(Track::from).collect()))
}
