//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the loaded catalog,
//! filters, navigation state and the shared playback snapshot handle.

mod model;

pub use model::*;
