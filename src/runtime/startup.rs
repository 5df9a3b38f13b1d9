use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

use crate::config;
use crate::engine::AudioEngine;
use crate::library::{Playlist, Track, builtin_playlist, scan};
use crate::playback::Controller;

/// Where the session playlist came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    /// Directory given on the command line.
    Directory(PathBuf),
    /// `[[playlist]]` entries in the config file.
    Config,
    /// `library.scan_dir`.
    ScanDir(PathBuf),
    Builtin,
}

impl fmt::Display for PlaylistSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory(dir) => write!(f, "directory {}", dir.display()),
            Self::Config => f.write_str("config playlist"),
            Self::ScanDir(dir) => write!(f, "library {}", dir.display()),
            Self::Builtin => f.write_str("built-in playlist"),
        }
    }
}

/// Pick the session playlist. The first source present wins, even if it
/// turns out to be empty.
pub fn build_playlist(
    dir_arg: Option<&Path>,
    settings: &config::Settings,
) -> (Playlist, PlaylistSource) {
    if let Some(dir) = dir_arg {
        let tracks = scan(dir, &settings.library);
        return (Playlist::new(tracks), PlaylistSource::Directory(dir.to_path_buf()));
    }
    if !settings.playlist.is_empty() {
        let tracks = settings.playlist.iter().map(Track::from).collect();
        return (Playlist::new(tracks), PlaylistSource::Config);
    }
    if let Some(dir) = &settings.library.scan_dir {
        let tracks = scan(dir, &settings.library);
        return (Playlist::new(tracks), PlaylistSource::ScanDir(dir.clone()));
    }
    (builtin_playlist(), PlaylistSource::Builtin)
}

/// Root for resolving track sources: `library.root`, else the per-user data
/// directory.
pub fn library_root(settings: &config::Settings) -> Option<PathBuf> {
    settings
        .library
        .root
        .clone()
        .or_else(config::default_library_root)
}

/// Hand the playlist to the controller and apply playback defaults.
pub fn mount<E: AudioEngine>(
    controller: &mut Controller<E>,
    playlist: Playlist,
    settings: &config::Settings,
) {
    controller.load_playlist(playlist);
    if settings.playback.autoplay {
        info!("autoplay enabled");
        controller.play();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrackEntry;
    use crate::engine::fake::FakeEngine;
    use crate::engine::resolve_source;
    use crate::playback::{ControllerOptions, Mode};
    use std::fs;
    use tempfile::tempdir;

    fn entry(id: &str) -> TrackEntry {
        TrackEntry {
            id: id.into(),
            title: format!("Track {id}"),
            album: None,
            artist: None,
            src: format!("/music/{id}.mp3"),
            duration: None,
        }
    }

    #[test]
    fn directory_argument_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), b"").unwrap();
        let settings = config::Settings {
            playlist: vec![entry("x")],
            ..config::Settings::default()
        };

        let (playlist, source) = build_playlist(Some(dir.path()), &settings);
        assert_eq!(source, PlaylistSource::Directory(dir.path().to_path_buf()));
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.get(0).unwrap().id.as_str(), "a.mp3");
    }

    #[test]
    fn config_entries_beat_scan_dir() {
        let dir = tempdir().unwrap();
        let mut settings = config::Settings {
            playlist: vec![entry("x"), entry("y")],
            ..config::Settings::default()
        };
        settings.library.scan_dir = Some(dir.path().to_path_buf());

        let (playlist, source) = build_playlist(None, &settings);
        assert_eq!(source, PlaylistSource::Config);
        let ids: Vec<&str> = playlist.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn scan_dir_used_without_entries() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.flac"), b"").unwrap();
        let mut settings = config::Settings::default();
        settings.library.scan_dir = Some(dir.path().to_path_buf());

        let (playlist, source) = build_playlist(None, &settings);
        assert_eq!(source, PlaylistSource::ScanDir(dir.path().to_path_buf()));
        assert_eq!(playlist.len(), 1);
    }

    #[test]
    fn builtin_is_the_fallback() {
        let (playlist, source) = build_playlist(None, &config::Settings::default());
        assert_eq!(source, PlaylistSource::Builtin);
        assert_eq!(playlist.len(), 3);
    }

    #[test]
    fn configured_library_root_wins() {
        let mut settings = config::Settings::default();
        settings.library.root = Some(PathBuf::from("/srv/www"));
        assert_eq!(library_root(&settings), Some(PathBuf::from("/srv/www")));
    }

    #[test]
    fn builtin_sources_resolve_under_library_root() {
        let root = tempdir().unwrap();
        let music = root.path().join("music");
        fs::create_dir_all(&music).unwrap();
        for n in 1..=3 {
            fs::write(music.join(format!("track{n}.mp3")), b"").unwrap();
        }

        let (playlist, _) = build_playlist(None, &config::Settings::default());
        for track in playlist.iter() {
            let path = resolve_source(&track.src, Some(root.path())).unwrap();
            assert!(path.starts_with(root.path()), "{}", path.display());
            assert!(path.is_file());
        }
    }

    #[test]
    fn mount_leaves_first_track_paused() {
        let mut c = Controller::new(FakeEngine::new(), ControllerOptions::default());
        let (playlist, _) = build_playlist(None, &config::Settings::default());
        mount(&mut c, playlist, &config::Settings::default());
        assert_eq!(c.mode(), Mode::Paused);
        assert_eq!(c.snapshot().current, Some(0));
    }

    #[test]
    fn mount_with_autoplay_starts_playing() {
        let engine = FakeEngine::new();
        let mut c = Controller::new(engine.clone(), ControllerOptions::default());
        let mut settings = config::Settings::default();
        settings.playback.autoplay = true;

        let (playlist, _) = build_playlist(None, &settings);
        mount(&mut c, playlist, &settings);
        assert_eq!(c.mode(), Mode::Playing);
        assert!(engine.is_playing());
    }
}
