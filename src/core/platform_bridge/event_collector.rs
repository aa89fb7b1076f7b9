//=========================================================================
// Event Collector
//=========================================================================
//
// Host-side end of the platform channel.
//
// Architecture:
//   Platform thread ──PlatformEvent──> crossbeam channel ──> EventCollector
//                                                              │
//                                       SceneHost::run_frame ◄─┘ poll_event()
//
// A disconnected channel means the platform is gone; that is reported
// once as `CloseRequested` so the host stops cleanly.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::{EventSource, PlatformEvent};

//=== EventCollector ======================================================

/// [`EventSource`] backed by a crossbeam receiver.
pub struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    disconnected: bool,
}

impl EventCollector {
    pub fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            disconnected: false,
        }
    }

    /// Returns `true` once the sending side has been dropped.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}

impl EventSource for EventCollector {
    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if self.disconnected {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(event) => {
                trace!(target: "platform::input", "Collected {:?}", event);
                Some(event)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!(target: "platform", "Platform channel disconnected, requesting close");
                self.disconnected = true;
                Some(PlatformEvent::CloseRequested)
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
