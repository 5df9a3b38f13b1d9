use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use log::warn;

use crate::config::TrackEntry;

/// Stable identifier of a track inside a playlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One playable item. Immutable once the playlist is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub album: Option<String>,
    pub artist: Option<String>,
    /// Source locator: a path or a `file://` URI.
    pub src: String,
    /// Duration hint. The engine's duration wins once the track is loaded.
    pub duration: Option<Duration>,
}

impl From<&TrackEntry> for Track {
    fn from(entry: &TrackEntry) -> Self {
        let non_empty = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            id: TrackId::new(entry.id.trim()),
            title: entry.title.clone(),
            album: non_empty(&entry.album),
            artist: non_empty(&entry.artist),
            src: entry.src.clone(),
            duration: entry
                .duration
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
        }
    }
}

/// Ordered tracks; insertion order is traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist, dropping tracks whose id was already seen.
    pub fn new(tracks: Vec<Track>) -> Self {
        let mut seen: HashSet<TrackId> = HashSet::with_capacity(tracks.len());
        let tracks = tracks
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.id.clone());
                if !fresh {
                    warn!("dropping duplicate track id `{}` ({})", t.id, t.title);
                }
                fresh
            })
            .collect();
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Index of the track with `id`, if present.
    pub fn position(&self, id: &TrackId) -> Option<usize> {
        self.tracks.iter().position(|t| &t.id == id)
    }

    /// Index after `current`, wrapping to the first track.
    pub fn next_index(&self, current: usize) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }
        Some((current.min(len - 1) + 1) % len)
    }

    /// Index before `current`, wrapping to the last track.
    pub fn prev_index(&self, current: usize) -> Option<usize> {
        let len = self.tracks.len();
        match current.min(len.checked_sub(1)?) {
            0 => Some(len - 1),
            i => Some(i - 1),
        }
    }
}
