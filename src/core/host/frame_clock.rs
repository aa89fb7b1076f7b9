//=========================================================================
// Frame Clock
//=========================================================================
//
// Wall-clock delta between consecutive presents. The delta measured at
// the end of frame N is handed to scenes during frame N + 1.
//
//=========================================================================

use std::time::{Duration, Instant};

/// Measures time between successive [`restart`](Self::restart) calls.
#[derive(Debug, Clone)]
pub(crate) struct FrameClock {
    started: Instant,
}

impl FrameClock {
    pub(crate) fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Returns the time since the last restart and starts a new interval.
    pub(crate) fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.started);
        self.started = now;
        elapsed
    }
}
