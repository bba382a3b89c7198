use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::device::Device;
use super::sink::{probe_duration, source_path};
use super::types::{MediaError, MediaEvent, MediaResource};

/// Write a silent mono 16-bit PCM WAV of the given length.
fn write_wav(path: &Path, seconds: u32) {
    let sample_rate: u32 = 8000;
    let data_len = sample_rate * seconds * 2;

    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(bytes.len() + data_len as usize, 0);

    fs::write(path, bytes).unwrap();
}

#[test]
fn source_path_strips_file_scheme() {
    assert_eq!(
        source_path("file:///tmp/ep1.mp3"),
        PathBuf::from("/tmp/ep1.mp3")
    );
    assert_eq!(source_path("/tmp/ep1.mp3"), PathBuf::from("/tmp/ep1.mp3"));
    assert_eq!(
        source_path("episodes/ep1.mp3"),
        PathBuf::from("episodes/ep1.mp3")
    );
}

#[test]
fn media_errors_render_readable_messages() {
    let rejected = MediaError::Rejected("no user gesture".to_string());
    assert_eq!(rejected.to_string(), "playback rejected: no user gesture");
    assert_eq!(MediaError::NoSource.to_string(), "no source set");
}

#[test]
fn probe_duration_reads_wav_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ep.wav");
    write_wav(&path, 2);

    let secs = probe_duration(path.to_str().unwrap()).unwrap();
    assert!((secs - 2.0).abs() < 0.1, "got {secs}");

    assert_eq!(probe_duration("/nonexistent/ep.wav"), None);
}

#[test]
fn metadata_is_announced_once_on_the_full_load_sequence() {
    // Needs a real audio output; skip quietly on machines without one.
    let Ok(mut device) = Device::open() else {
        return;
    };

    let dir = tempdir().unwrap();
    let path = dir.path().join("ep.wav");
    write_wav(&path, 2);
    let url = path.to_str().unwrap().to_string();

    // The exact call order a committed track switch performs.
    device.set_source(Some(&url));
    device.set_position(0.0);
    device.start().unwrap();

    let events = device.poll_events();
    let durations: Vec<f64> = events
        .iter()
        .filter_map(|e| match e {
            MediaEvent::MetadataLoaded(d) => Some(*d),
            _ => None,
        })
        .collect();
    assert_eq!(durations.len(), 1, "events: {events:?}");
    assert!((durations[0] - 2.0).abs() < 0.1, "got {}", durations[0]);

    // The announcement fires once per loaded source, not once per poll.
    let again = device.poll_events();
    assert!(
        !again
            .iter()
            .any(|e| matches!(e, MediaEvent::MetadataLoaded(_))),
        "events: {again:?}"
    );

    // Reassigning the same url is a fresh load and announces again.
    device.set_source(Some(&url));
    assert!(
        device
            .poll_events()
            .iter()
            .any(|e| matches!(e, MediaEvent::MetadataLoaded(_)))
    );

    // Clearing the source forgets the duration; nothing left to announce.
    device.set_source(None);
    assert!(device.poll_events().is_empty());
}
