use super::*;
use crate::engine::fake::FakeEngine;
use crate::library::{Playlist, Track, TrackId};
use crate::playback::{Controller, ControllerOptions};

fn t(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        title: format!("Track {id}"),
        album: None,
        artist: None,
        src: format!("/music/{id}.mp3"),
        duration: None,
    }
}

fn controller() -> (Controller<FakeEngine>, FakeEngine) {
    let engine = FakeEngine::new();
    let mut c = Controller::new(engine.clone(), ControllerOptions::default());
    c.load_playlist(Playlist::new(vec![t("1"), t("2"), t("3")]));
    (c, engine)
}

#[test]
fn cursor_wraps_both_ways() {
    let mut app = App::new(false);
    app.prev(3);
    assert_eq!(app.selected, 2);
    app.next(3);
    assert_eq!(app.selected, 0);
    app.next(3);
    app.next(3);
    assert_eq!(app.selected, 2);
}

#[test]
fn cursor_ignores_empty_list() {
    let mut app = App::new(false);
    app.next(0);
    app.prev(0);
    app.bottom(0);
    assert_eq!(app.selected, 0);
}

#[test]
fn top_and_bottom_jump() {
    let mut app = App::new(false);
    app.bottom(5);
    assert_eq!(app.selected, 4);
    app.top();
    assert_eq!(app.selected, 0);
}

#[test]
fn metadata_window_toggles() {
    let mut app = App::default();
    app.toggle_metadata_window();
    assert!(app.metadata_window);
    app.toggle_metadata_window();
    assert!(!app.metadata_window);
}

#[test]
fn sync_follows_bound_track() {
    let (mut c, _engine) = controller();
    let mut app = App::new(true);

    c.next_track();
    c.next_track();
    app.sync(&mut c);
    assert_eq!(app.selected, 2);
}

#[test]
fn sync_leaves_cursor_in_free_roam() {
    let (mut c, _engine) = controller();
    let mut app = App::new(false);
    app.selected = 1;

    c.prev_track();
    app.sync(&mut c);
    assert_eq!(app.selected, 1);
}

#[test]
fn sync_shows_error_until_next_bind() {
    let (mut c, engine) = controller();
    let mut app = App::new(false);

    engine.fail_source("/music/2.mp3");
    c.next_track();
    app.sync(&mut c);
    let msg = app.error.clone().expect("error message");
    assert!(msg.contains("Track 2"), "{msg}");

    // Still idle: the message stays after the signal was consumed.
    app.sync(&mut c);
    assert_eq!(app.error.as_deref(), Some(msg.as_str()));

    c.select_track(&TrackId::new("3"));
    app.sync(&mut c);
    assert_eq!(app.error, None);
}

#[test]
fn sync_clamps_cursor_to_playlist() {
    let (mut c, _engine) = controller();
    let mut app = App::new(false);
    app.selected = 10;
    app.sync(&mut c);
    assert_eq!(app.selected, 2);
}
