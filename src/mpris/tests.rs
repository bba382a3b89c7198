use super::*;
use std::sync::mpsc;

use crate::session::{SessionState, Track};

fn make_state(playing: bool) -> SessionState {
    SessionState {
        current_track: Some(Track {
            source_url: "https://example.com/ep1.mp3".to_string(),
            title: "Test Show - Ep1".to_string(),
            show_name: "Test Show".to_string(),
            episode_title: "Ep1".to_string(),
            show_id: 1,
            season_index: 0,
            episode_id: 1,
        }),
        playing,
        progress: 0.0,
        duration: f64::NAN,
        generation: 1,
    }
}

#[test]
fn sync_mirrors_the_session_snapshot() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.sync(&make_state(true));
    {
        let s = state.lock().unwrap();
        assert!(s.playing);
        assert!(s.has_track);
        assert_eq!(s.title.as_deref(), Some("Ep1"));
        assert_eq!(s.show.as_deref(), Some("Test Show"));
        assert_eq!(s.url.as_deref(), Some("https://example.com/ep1.mp3"));
    }

    handle.sync(&SessionState::default());
    {
        let s = state.lock().unwrap();
        assert!(!s.playing);
        assert!(!s.has_track);
        assert_eq!(s.title, None);
        assert_eq!(s.show, None);
        assert_eq!(s.url, None);
    }
}

#[test]
fn playback_status_maps_state_to_spec_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");

    {
        let mut s = state.lock().unwrap();
        s.has_track = true;
        s.playing = true;
    }
    assert_eq!(iface.playback_status(), "Playing");

    {
        let mut s = state.lock().unwrap();
        s.playing = false;
    }
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn next_and_previous_scrub_instead_of_skipping() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.next();
    assert!(matches!(rx.try_recv(), Ok(ControlCmd::SeekForward)));
    iface.previous();
    assert!(matches!(rx.try_recv(), Ok(ControlCmd::SeekBack)));
}

#[test]
fn seek_methods_convert_microseconds_to_seconds() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.seek(-5_000_000);
    match rx.try_recv() {
        Ok(ControlCmd::SeekBy(d)) => assert_eq!(d, -5.0),
        other => panic!("unexpected command: {other:?}"),
    }

    let track_id = zvariant::ObjectPath::try_from("/org/mpris/MediaPlayer2/track/1").unwrap();
    iface.set_position(track_id, 90_000_000);
    match rx.try_recv() {
        Ok(ControlCmd::SeekTo(p)) => assert_eq!(p, 90.0),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn metadata_exposes_title_show_and_url() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };
    handle.sync(&make_state(false));

    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };
    let meta = iface.metadata();

    assert!(meta.contains_key("xesam:title"));
    assert!(meta.contains_key("xesam:artist"));
    assert!(meta.contains_key("xesam:url"));
}
