use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{OwnedValue, Value};

use crate::session::SessionState;

/// Commands external controllers can send into the event loop.
#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    /// Mapped from MPRIS `Next`; podcasts scrub instead of skipping tracks.
    SeekForward,
    /// Mapped from MPRIS `Previous`.
    SeekBack,
    /// Relative seek in seconds, from the MPRIS `Seek` method.
    SeekBy(f64),
    /// Absolute seek in seconds, from the MPRIS `SetPosition` method.
    SeekTo(f64),
}

#[derive(Debug, Default)]
struct SharedState {
    playing: bool,
    title: Option<String>,
    show: Option<String>,
    url: Option<String>,
    has_track: bool,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    /// Mirror the playback snapshot into the MPRIS-visible state.
    pub fn sync(&self, session: &SessionState) {
        if let Ok(mut s) = self.state.lock() {
            s.playing = session.playing;
            s.has_track = session.current_track.is_some();
            match &session.current_track {
                Some(track) => {
                    s.title = Some(track.episode_title.clone());
                    s.show = Some(track.show_name.clone());
                    s.url = Some(track.source_url.clone());
                }
                None => {
                    s.title = None;
                    s.show = None;
                    s.url = None;
                }
            }
        }
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "hark"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::SeekForward);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::SeekBack);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn seek(&self, offset_micros: i64) {
        let _ = self
            .tx
            .send(ControlCmd::SeekBy(offset_micros as f64 / 1_000_000.0));
    }

    fn set_position(&self, _track_id: zvariant::ObjectPath<'_>, position_micros: i64) {
        let _ = self
            .tx
            .send(ControlCmd::SeekTo(position_micros as f64 / 1_000_000.0));
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        if !s.has_track {
            "Stopped"
        } else if s.playing {
            "Playing"
        } else {
            "Paused"
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        // Minimal metadata so `playerctl metadata` shows something.
        let mut map = HashMap::new();
        let (title, show, url) = self
            .state
            .lock()
            .map(|s| (s.title.clone(), s.show.clone(), s.url.clone()))
            .unwrap_or((None, None, None));

        insert_str(&mut map, "xesam:title", title.unwrap_or_default());
        if let Some(show) = show {
            insert_str_list(&mut map, "xesam:artist", vec![show]);
        }
        if let Some(url) = url {
            insert_str(&mut map, "xesam:url", url);
        }
        map
    }
}

fn insert_str(map: &mut HashMap<String, OwnedValue>, key: &str, value: String) {
    if let Ok(v) = OwnedValue::try_from(Value::from(value)) {
        map.insert(key.to_string(), v);
    }
}

fn insert_str_list(map: &mut HashMap<String, OwnedValue>, key: &str, value: Vec<String>) {
    if let Ok(v) = OwnedValue::try_from(Value::from(value)) {
        map.insert(key.to_string(), v);
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name("org.mpris.MediaPlayer2.hark").await {
                log::warn!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                log::warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                log::warn!("MPRIS: failed to register player iface: {e}");
                return;
            }

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;
