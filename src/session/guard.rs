use super::types::SessionHandle;

/// Confirms destructive exits while audio is playing.
///
/// The guard re-reads the live snapshot on every invocation. A playing flag
/// captured at registration time would go stale the moment playback state
/// changes, which is exactly the bug class this type exists to prevent.
pub struct QuitGuard {
    state: SessionHandle,
}

impl QuitGuard {
    /// Register the guard. Done once at startup, for the process lifetime.
    pub fn new(state: SessionHandle) -> Self {
        Self { state }
    }

    /// True when quitting now would interrupt audible playback.
    pub fn should_confirm(&self) -> bool {
        self.state.lock().map(|st| st.playing).unwrap_or(false)
    }
}
