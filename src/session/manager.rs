//! The track-switch protocol and the progress/event sync bridge.
//!
//! `SessionManager` is the only code allowed to mutate the media resource
//! or the shared `SessionState`. Replacing the active track goes through
//! three phases (`Idle -> Switching -> Ready`): a `play()` call stops the
//! device, clears its source and records a pending switch; the switch
//! commits after a short delay so the clear registers with the device even
//! when the new url is textually identical to the old one. Every commit
//! compares its captured generation against the live counter; a commit
//! that lost to a newer `play()` is discarded instead of clobbering it.

use std::time::{Duration, Instant};

use crate::media::{MediaEvent, MediaResource};

use super::types::{SessionHandle, Track};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum SwitchPhase {
    /// No track loaded.
    Idle,
    /// A switch was requested; the new source is not in effect yet.
    Switching,
    /// The device holds the requested source and start was attempted.
    Ready,
}

pub(super) struct PendingSwitch {
    pub(super) track: Track,
    pub(super) generation: u64,
    pub(super) due: Instant,
}

pub struct SessionManager<M: MediaResource> {
    media: M,
    state: SessionHandle,
    phase: SwitchPhase,
    generation: u64,
    pending: Option<PendingSwitch>,
    switch_delay: Duration,
}

impl<M: MediaResource> SessionManager<M> {
    pub fn new(media: M, state: SessionHandle, switch_delay: Duration) -> Self {
        Self {
            media,
            state,
            phase: SwitchPhase::Idle,
            generation: 0,
            pending: None,
            switch_delay,
        }
    }

    /// Request playback of `track`. Always starts a new generation, even
    /// when `track` is already current: replaying the same episode restarts
    /// it from zero via the forced reload.
    pub fn play(&mut self, track: Track) {
        if track.source_url.trim().is_empty() {
            // A track without a source can never load; report it rather
            // than leaving the UI silently unresponsive.
            log::warn!("ignoring play request without a source url: {}", track.title);
            return;
        }

        self.generation += 1;
        let generation = self.generation;

        // Stop first so the old track cannot bleed into the switch window,
        // then clear so the device treats the next assignment as a genuine
        // change.
        self.media.stop();
        self.media.set_source(None);
        self.phase = SwitchPhase::Switching;

        if let Ok(mut st) = self.state.lock() {
            st.playing = false;
            st.generation = generation;
        }

        self.pending = Some(PendingSwitch {
            track,
            generation,
            due: Instant::now() + self.switch_delay,
        });
    }

    /// Fire the pending switch once its delay has elapsed.
    pub fn poll_pending(&mut self, now: Instant) {
        match self.pending.as_ref() {
            Some(p) if now >= p.due => {}
            _ => return,
        }
        if let Some(pending) = self.pending.take() {
            self.commit(pending);
        }
    }

    /// Commit a scheduled switch. A commit whose captured generation no
    /// longer matches the live counter was superseded by a newer `play()`
    /// and must not touch shared state.
    pub(super) fn commit(&mut self, pending: PendingSwitch) {
        if pending.generation != self.generation {
            log::debug!(
                "discarding stale track switch (generation {} superseded by {})",
                pending.generation,
                self.generation
            );
            return;
        }

        self.media.set_source(Some(&pending.track.source_url));
        self.media.set_position(0.0);
        let started = self.media.start();
        self.phase = SwitchPhase::Ready;

        if let Ok(mut st) = self.state.lock() {
            st.current_track = Some(pending.track);
            st.progress = 0.0;
            st.duration = f64::NAN;
            match started {
                Ok(()) => st.playing = true,
                Err(e) => {
                    // The track stays current so the UI shows it as loaded
                    // but not playing.
                    log::warn!("could not start playback: {e}");
                    st.playing = false;
                }
            }
        }
    }

    /// Pause the current track. No-op when nothing is loaded; never touches
    /// progress or the generation counter. Idempotent.
    pub fn pause(&mut self) {
        let loaded = self
            .state
            .lock()
            .map(|st| st.current_track.is_some())
            .unwrap_or(false);
        if !loaded {
            return;
        }
        self.media.stop();
        if let Ok(mut st) = self.state.lock() {
            st.playing = false;
        }
    }

    /// Seek to an absolute position. The snapshot reflects the clamped
    /// target immediately, without waiting for the device to report back.
    pub fn seek(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let mut target = None;
        if let Ok(mut st) = self.state.lock() {
            if st.current_track.is_some() {
                let max = if st.duration.is_finite() {
                    st.duration.max(0.0)
                } else {
                    f64::INFINITY
                };
                let clamped = seconds.clamp(0.0, max);
                st.progress = clamped;
                target = Some(clamped);
            }
        }
        if let Some(t) = target {
            self.media.set_position(t);
        }
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta: f64) {
        let progress = self.state.lock().map(|st| st.progress).unwrap_or(0.0);
        self.seek(progress + delta);
    }

    /// Drain the device's pending events and fold them into the snapshot.
    pub fn pump_events(&mut self) {
        for event in self.media.poll_events() {
            self.apply_event(event);
        }
    }

    /// The single subscriber for the device's event kinds. The device only
    /// reports for its currently loaded source, so no generation check is
    /// needed here.
    pub fn apply_event(&mut self, event: MediaEvent) {
        let Ok(mut st) = self.state.lock() else {
            return;
        };
        match event {
            MediaEvent::TimeUpdated(t) => {
                st.progress = if st.duration.is_finite() {
                    t.clamp(0.0, st.duration)
                } else {
                    t.max(0.0)
                };
            }
            MediaEvent::MetadataLoaded(d) => {
                st.duration = d;
                if d.is_finite() && st.progress > d {
                    st.progress = d;
                }
            }
            MediaEvent::Ended => {
                // The track stays current; a later play() of the same track
                // restarts it from zero through the forced reload.
                st.playing = false;
                st.progress = 0.0;
            }
        }
    }

    pub fn state_handle(&self) -> SessionHandle {
        self.state.clone()
    }

    #[cfg(test)]
    pub(super) fn phase(&self) -> SwitchPhase {
        self.phase
    }

    #[cfg(test)]
    pub(super) fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(super) fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub(super) fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
