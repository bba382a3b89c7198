//! The rodio-backed media resource.
//!
//! `Device` holds the process's one `OutputStream` and at most one `Sink`.
//! It tracks elapsed time itself (start instant plus accumulated time while
//! paused) because rodio sinks do not report a position, and surfaces
//! position/metadata/completion through polled `MediaEvent`s.

use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::{create_sink_at, probe_duration};
use super::types::{MediaError, MediaEvent, MediaResource};

/// Minimum spacing between `TimeUpdated` reports.
const TIME_REPORT_INTERVAL: Duration = Duration::from_millis(500);

pub struct Device {
    stream: OutputStream,
    sink: Option<Sink>,
    source: Option<String>,
    playing: bool,
    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    duration: Option<f64>,
    announce_metadata: bool,
    last_time_report: Instant,
}

impl Device {
    /// Open the default audio output. Called once at process start.
    pub fn open() -> Result<Self, MediaError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| MediaError::OutputUnavailable(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);

        Ok(Self {
            stream,
            sink: None,
            source: None,
            playing: false,
            started_at: None,
            accumulated: Duration::ZERO,
            duration: None,
            announce_metadata: false,
            last_time_report: Instant::now(),
        })
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |t| t.elapsed())
    }

    fn drop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.playing = false;
        self.started_at = None;
    }
}

impl MediaResource for Device {
    fn set_source(&mut self, url: Option<&str>) {
        self.drop_sink();
        self.accumulated = Duration::ZERO;
        self.source = url.map(str::to_string);
        // Probe at assignment time: `start()` can resume an already-built
        // sink and never look at the file again, and seek clamping needs
        // the duration before the first position report.
        self.duration = self.source.as_deref().and_then(probe_duration);
        self.announce_metadata = self.duration.is_some();
    }

    fn start(&mut self) -> Result<(), MediaError> {
        if let Some(s) = self.sink.as_ref() {
            // Resume the paused sink from where it left off.
            s.play();
            self.playing = true;
            self.started_at = Some(Instant::now());
            return Ok(());
        }

        let Some(url) = self.source.clone() else {
            return Err(MediaError::NoSource);
        };

        let sink = create_sink_at(&self.stream, &url, self.accumulated)?;
        sink.play();
        self.sink = Some(sink);
        self.playing = true;
        self.started_at = Some(Instant::now());

        Ok(())
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        if let Some(t) = self.started_at.take() {
            self.accumulated += t.elapsed();
        }
        self.playing = false;
    }

    fn set_position(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        let max = self.duration.unwrap_or(f64::INFINITY);
        let target = Duration::from_secs_f64(seconds.clamp(0.0, max));

        // Scrubbing: rebuild the sink and skip into the file.
        let was_playing = self.playing;
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.accumulated = target;
        self.started_at = None;

        let Some(url) = self.source.clone() else {
            return;
        };
        match create_sink_at(&self.stream, &url, target) {
            Ok(sink) => {
                if was_playing {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(sink);
            }
            Err(e) => {
                log::warn!("seek rebuild failed for {url}: {e}");
                self.playing = false;
            }
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();

        if self.announce_metadata {
            self.announce_metadata = false;
            if let Some(d) = self.duration {
                events.push(MediaEvent::MetadataLoaded(d));
            }
        }

        if self.playing {
            if let Some(s) = self.sink.as_ref() {
                if s.empty() {
                    // The source drained; report completion for it alone.
                    self.drop_sink();
                    self.accumulated = Duration::ZERO;
                    events.push(MediaEvent::Ended);
                    return events;
                }
            }
            if self.last_time_report.elapsed() >= TIME_REPORT_INTERVAL {
                self.last_time_report = Instant::now();
                events.push(MediaEvent::TimeUpdated(self.elapsed().as_secs_f64()));
            }
        }

        events
    }
}
