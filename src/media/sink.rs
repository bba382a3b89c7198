//! Utilities for creating `rodio` sinks from source urls.
//!
//! The helpers here encapsulate opening/decoding a file and preparing a
//! paused `Sink` at the requested start position, plus probing the total
//! duration of a source.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::MediaError;

/// Map a source url to a local path. `file://` urls are stripped; anything
/// else is treated as a filesystem path.
pub(super) fn source_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}

/// Create a paused `Sink` for `url` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    url: &str,
    start_at: Duration,
) -> Result<Sink, MediaError> {
    let path = source_path(url);
    let file = File::open(&path)
        .map_err(|e| MediaError::Rejected(format!("failed to open {:?}: {e}", path)))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| MediaError::Rejected(format!("failed to decode {:?}: {e}", path)))?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Probe the total length of a source, in seconds.
pub(super) fn probe_duration(url: &str) -> Option<f64> {
    use lofty::file::AudioFile;

    let path = source_path(url);
    lofty::read_from_path(&path)
        .ok()
        .map(|tagged| tagged.properties().duration().as_secs_f64())
}
