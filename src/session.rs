//! The playback session: the single shared playback context of the app.
//!
//! One session exists for the process lifetime. It owns the media resource,
//! exposes the only mutation entry points (`play`, `pause`, `seek`) and
//! publishes an observable `SessionState` snapshot that every UI consumer
//! renders from. The track-switch protocol lives in `manager`, driven by a
//! monotonically increasing generation counter that decides which switch
//! request is authoritative when tracks are replaced in rapid succession.

mod guard;
mod manager;
mod player;
mod thread;
mod types;

pub use guard::QuitGuard;
pub use manager::SessionManager;
pub use player::Session;
pub use types::{SessionCmd, SessionHandle, SessionState, Track};
