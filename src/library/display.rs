use crate::config::TrackDisplayField;

use super::model::Track;

/// Build a label for `track` from the configured `fields`, joined by `sep`.
///
/// Missing or blank fields are skipped; the title is used when nothing else
/// was produced.
pub fn track_label(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for f in fields {
        let part = match f {
            TrackDisplayField::Title => Some(track.title.as_str()),
            TrackDisplayField::Artist => track.artist.as_deref(),
            TrackDisplayField::Album => track.album.as_deref(),
            TrackDisplayField::Id => Some(track.id.as_str()),
            TrackDisplayField::Source => Some(track.src.as_str()),
        };
        if let Some(p) = part.map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(p);
        }
    }

    if parts.is_empty() {
        track.title.clone()
    } else {
        parts.join(sep)
    }
}
