//! Media resource handle: the single playable audio device.
//!
//! This module owns the seam between the playback session and the actual
//! audio output. `MediaResource` is the contract the session programs
//! against; `Device` is the rodio-backed implementation used at runtime.

mod device;
mod sink;
mod types;

pub use device::Device;
pub use types::{MediaError, MediaEvent, MediaResource};

#[cfg(test)]
mod tests;
