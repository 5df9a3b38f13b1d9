use super::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crate::library::TrackId;

#[test]
fn relative_sources_join_the_root() {
    let root = Path::new("/srv/public");
    assert_eq!(
        resolve_source("music/a.mp3", Some(root)).unwrap(),
        PathBuf::from("/srv/public/music/a.mp3")
    );
    assert_eq!(
        resolve_source("music/a.mp3", None).unwrap(),
        PathBuf::from("music/a.mp3")
    );
}

#[test]
fn file_uris_are_stripped() {
    assert_eq!(
        resolve_source("file:///tmp/a.ogg", None).unwrap(),
        PathBuf::from("/tmp/a.ogg")
    );
    assert_eq!(
        resolve_source("FILE://rel/a.ogg", Some(Path::new("/r"))).unwrap(),
        PathBuf::from("/r/rel/a.ogg")
    );
}

#[test]
fn remote_and_blank_sources_are_unsupported() {
    assert!(matches!(
        resolve_source("https://example.com/a.mp3", None),
        Err(EngineError::UnsupportedSource(_))
    ));
    assert!(matches!(
        resolve_source("   ", None),
        Err(EngineError::UnsupportedSource(_))
    ));
}

#[test]
fn web_root_sources_fall_back_to_root_when_absolute_path_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let music = dir.path().join("music");
    std::fs::create_dir_all(&music).unwrap();
    std::fs::write(music.join("backdrop-track1.mp3"), b"x").unwrap();

    let resolved = resolve_source("/music/backdrop-track1.mp3", Some(dir.path())).unwrap();
    assert_eq!(resolved, music.join("backdrop-track1.mp3"));

    // Nothing under the root either: keep the absolute path so the open error names it.
    let resolved = resolve_source("/music/absent.mp3", Some(dir.path())).unwrap();
    assert_eq!(resolved, PathBuf::from("/music/absent.mp3"));
}

#[test]
fn event_sink_stamps_track_id() {
    let (tx, rx) = mpsc::channel();
    let sink = EventSink::new(TrackId::new("2"), 7, tx);
    sink.emit(EngineEventKind::Ended);

    assert_eq!(
        rx.try_recv().unwrap(),
        EngineEvent {
            track: TrackId::new("2"),
            bind: 7,
            kind: EngineEventKind::Ended,
        }
    );
}

#[test]
fn event_sink_ignores_dropped_receiver() {
    let (tx, rx) = mpsc::channel();
    drop(rx);
    EventSink::new(TrackId::new("1"), 1, tx).emit(EngineEventKind::Loaded);
}

#[test]
fn open_error_names_the_path() {
    let err = EngineError::Open {
        path: PathBuf::from("/music/track1.mp3"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert_eq!(err.to_string(), "failed to open /music/track1.mp3: not found");
}
