use std::path::{self, Path};

use lofty::prelude::{Accessor, AudioFile, TaggedFileExt};
use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::track_label;
use super::model::{Track, TrackId};

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Id for a scanned file: its path relative to the scan root, with `/` separators.
fn scanned_id(root: &Path, path: &Path) -> TrackId {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    TrackId::new(parts.join("/"))
}

fn read_track(root: &Path, path: &Path) -> Track {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            let d = tagged.properties().duration();
            if !d.is_zero() {
                duration = Some(d);
            }

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        title = v.trim().to_string();
                    }
                }
                artist = tag
                    .artist()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                album = tag
                    .album()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
            }
        }
        Err(e) => debug!("no tags for {}: {e}", path.display()),
    }

    Track {
        id: scanned_id(root, path),
        title,
        album,
        artist,
        src: path.display().to_string(),
        duration,
    }
}

/// Walk `dir` and build tracks for every audio file, sorted by label.
///
/// Sources are stored as absolute paths, so a relative `dir` never gets joined
/// onto `library.root` later.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let root = match path::absolute(dir) {
        Ok(abs) => abs,
        Err(e) => {
            warn!("could not make {} absolute: {e}", dir.display());
            dir.to_path_buf()
        }
    };
    let dir = root.as_path();
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut labelled: Vec<(String, Track)> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|entry| {
            let path = entry.path();
            path.is_file()
                && (settings.include_hidden || !is_hidden(path))
                && is_audio_file(path, settings)
        })
        .map(|entry| {
            let track = read_track(dir, entry.path());
            let label = track_label(&track, &settings.display_fields, &settings.display_separator)
                .to_lowercase();
            (label, track)
        })
        .collect();

    labelled.sort_by(|a, b| a.0.cmp(&b.0));
    info!("scanned {} tracks under {}", labelled.len(), dir.display());
    labelled.into_iter().map(|(_, t)| t).collect()
}
