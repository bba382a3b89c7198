//! Session-related small types and handles.
//!
//! This module defines the track descriptor, the observable playback
//! snapshot, the session command enum and the shared handle type aliases
//! used by the session subsystem.

use std::sync::{Arc, Mutex};

/// Immutable descriptor of a playable episode.
///
/// Two tracks refer to the same audio exactly when their `source_url`s are
/// equal; everything else is display metadata and identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub source_url: String,
    pub title: String,
    pub show_name: String,
    pub episode_title: String,
    pub show_id: u64,
    pub season_index: usize,
    pub episode_id: u64,
}

impl Track {
    /// Track identity is source equality, not structural equality.
    pub fn same_source(&self, other: &Track) -> bool {
        self.source_url == other.source_url
    }
}

#[derive(Debug)]
pub enum SessionCmd {
    /// Switch playback to the given track. Always a fresh load, even when
    /// the track is already current.
    Play(Track),
    /// Pause without resetting the position.
    Pause,
    /// Seek to an absolute position (seconds).
    Seek(f64),
    /// Seek relative to the current position (seconds, either sign).
    SeekBy(f64),
    /// Shut the session thread down.
    Quit,
}

/// Runtime playback snapshot shared with UI consumers.
///
/// Mutated only by the session manager; consumers read.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The loaded track, if any. `None` implies `playing == false`.
    pub current_track: Option<Track>,
    /// Whether playback is currently audible.
    pub playing: bool,
    /// Current position in seconds. Never negative; never exceeds a known
    /// duration.
    pub progress: f64,
    /// Total track length in seconds. `NaN` until metadata arrives.
    pub duration: f64,
    /// Identifies the most recent track-switch request. Only increases.
    pub generation: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_track: None,
            playing: false,
            progress: 0.0,
            duration: f64::NAN,
            generation: 0,
        }
    }
}

pub type SessionHandle = Arc<Mutex<SessionState>>;
