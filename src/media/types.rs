//! Contract and event types for the audio device seam.

use thiserror::Error;

/// Events reported by a media resource. Implementations must only report
/// events for the source they currently hold; events never describe a
/// source that has already been replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The playback position moved (seconds since the start of the source).
    TimeUpdated(f64),
    /// The total length of the loaded source became known (seconds).
    MetadataLoaded(f64),
    /// The loaded source played to completion.
    Ended,
}

#[derive(Debug, Error)]
pub enum MediaError {
    /// The device refused to start playback of the current source.
    #[error("playback rejected: {0}")]
    Rejected(String),
    /// `start()` was called while no source was set.
    #[error("no source set")]
    NoSource,
    /// No usable audio output device was found.
    #[error("audio output unavailable: {0}")]
    OutputUnavailable(String),
}

/// The opaque single-track audio device owned by the playback session.
///
/// Exactly one implementation instance exists per process. Only the session
/// manager may call these methods; UI consumers go through the session's
/// control API instead.
pub trait MediaResource {
    /// Set or clear the source. Clearing (`None`) guarantees the next
    /// assignment is treated as a genuine change even when the url is
    /// textually identical to the previous one.
    fn set_source(&mut self, url: Option<&str>);

    /// Begin or resume playback from the current position.
    fn start(&mut self) -> Result<(), MediaError>;

    /// Pause without resetting the position.
    fn stop(&mut self);

    /// Seek. Clamped to `[0, duration]` when the duration is known,
    /// accepted as-is otherwise.
    fn set_position(&mut self, seconds: f64);

    /// Drain pending events for the currently loaded source.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}
