use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use super::thread::spawn_session_thread;
use super::types::{SessionCmd, SessionHandle, SessionState, Track};

/// Handle to the playback session thread.
///
/// This is the control surface handed to UI consumers: `play`, `pause` and
/// `seek` are the only mutation entry points the rest of the app gets.
/// Consumers observe playback through the snapshot behind `state_handle()`.
pub struct Session {
    tx: Sender<SessionCmd>,
    state: SessionHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Session {
    /// Spawn the session thread. Called once at startup; the session lives
    /// for the rest of the process.
    pub fn spawn(switch_delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<SessionCmd>();
        let state: SessionHandle = Arc::new(Mutex::new(SessionState::default()));
        let join = spawn_session_thread(rx, state.clone(), switch_delay);

        Self {
            tx,
            state,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn state_handle(&self) -> SessionHandle {
        self.state.clone()
    }

    /// Switch playback to `track`. Always a fresh load; playing the current
    /// track again restarts it from zero.
    pub fn play(&self, track: Track) {
        let _ = self.tx.send(SessionCmd::Play(track));
    }

    pub fn pause(&self) {
        let _ = self.tx.send(SessionCmd::Pause);
    }

    pub fn seek(&self, seconds: f64) {
        let _ = self.tx.send(SessionCmd::Seek(seconds));
    }

    pub fn seek_by(&self, delta: f64) {
        let _ = self.tx.send(SessionCmd::SeekBy(delta));
    }

    /// Stop the session thread and wait for it to finish.
    pub fn shutdown(&self) {
        let _ = self.tx.send(SessionCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}
