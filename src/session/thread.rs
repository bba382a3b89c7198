use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::media::Device;

use super::manager::SessionManager;
use super::types::{SessionCmd, SessionHandle};

/// How long the command loop sleeps between housekeeping passes. Short
/// enough that a pending track switch commits promptly after its delay.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub(super) fn spawn_session_thread(
    rx: Receiver<SessionCmd>,
    state: SessionHandle,
    switch_delay: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let device = match Device::open() {
            Ok(d) => d,
            Err(e) => {
                log::error!("audio device unavailable, playback disabled: {e}");
                return;
            }
        };
        let mut manager = SessionManager::new(device, state, switch_delay);

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(SessionCmd::Play(track)) => manager.play(track),
                Ok(SessionCmd::Pause) => manager.pause(),
                Ok(SessionCmd::Seek(seconds)) => manager.seek(seconds),
                Ok(SessionCmd::SeekBy(delta)) => manager.seek_by(delta),
                Ok(SessionCmd::Quit) => {
                    // Leave the snapshot consistent for anyone still reading.
                    manager.pause();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            manager.poll_pending(Instant::now());
            manager.pump_events();
        }
    })
}
