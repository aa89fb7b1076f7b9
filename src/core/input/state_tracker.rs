//=========================================================================
// KeyState Tracker
//=========================================================================
//
// Frame-accurate keyboard state with edge (Just*) and level (Long*)
// semantics for a fixed set of watched keys.
//
// Architecture:
//   PlatformEvent → update() → per-key KeyState → view_key()
//                                   ↑
//                   frame_end() collapses Just* → Long*
//
// Frame lifecycle: update()* → (game logic reads) → frame_end()
//
// Edge table (current state × press flag):
//
// ```text
//   current       pressed      released
//   LongReleased  JustPressed  LongReleased
//   JustReleased  JustPressed  LongReleased
//   JustPressed   LongPressed  JustReleased
//   LongPressed   LongPressed  JustReleased
// ```
//
// Several raw events inside one frame collapse: a key reads `Just*` for
// exactly one frame per physical transition.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use crate::core::error::KeyTrackerError;
use crate::core::platform_bridge::PlatformEvent;

//=== KeyState ============================================================

/// Per-frame state of a watched key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Released this frame and the previous one.
    LongReleased,

    /// Pressed this frame, released at the previous frame boundary.
    JustPressed,

    /// Released this frame, pressed at the previous frame boundary.
    JustReleased,

    /// Pressed this frame and the previous one.
    LongPressed,

    /// Returned for unwatched keys. Never held by a watched key in
    /// normal operation.
    Invalid,
}

impl KeyState {
    /// Returns `true` for `JustPressed` and `LongPressed`.
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::LongPressed)
    }

    /// Returns `true` for the one-frame `Just*` states.
    pub fn is_edge(self) -> bool {
        matches!(self, Self::JustPressed | Self::JustReleased)
    }

    /// Applies one raw press/release signal.
    fn apply(self, pressed: bool) -> Self {
        match (self, pressed) {
            (Self::LongReleased | Self::JustReleased, true) => Self::JustPressed,
            (Self::LongReleased | Self::JustReleased, false) => Self::LongReleased,
            (Self::JustPressed | Self::LongPressed, true) => Self::LongPressed,
            (Self::JustPressed | Self::LongPressed, false) => Self::JustReleased,
            (Self::Invalid, _) => Self::Invalid,
        }
    }

    /// Collapses edge states into level states.
    fn settle(self) -> Self {
        match self {
            Self::JustPressed => Self::LongPressed,
            Self::JustReleased => Self::LongReleased,
            other => other,
        }
    }
}

//=== KeyStateTracker =====================================================

/// Tracks edge/level state for a registry of keys fixed at construction.
///
/// Lookup order is registration order. Queries for unwatched keys return
/// [`KeyState::Invalid`] and never touch the registry.
#[derive(Debug, Clone)]
pub struct KeyStateTracker {
    keys: Vec<KeyCode>,
    states: Vec<KeyState>,
}

impl KeyStateTracker {
    //--- Construction -----------------------------------------------------

    /// Creates a tracker watching `keys`, all initially `LongReleased`.
    ///
    /// Duplicate codes are ignored after their first occurrence.
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = KeyCode>,
    {
        let mut registry: Vec<KeyCode> = Vec::new();
        for key in keys {
            if registry.contains(&key) {
                warn!(target: "input", "Key {:?} registered twice, ignoring duplicate", key);
                continue;
            }
            registry.push(key);
        }

        let states = vec![KeyState::LongReleased; registry.len()];
        Self { keys: registry, states }
    }

    //--- Input Processing -------------------------------------------------

    /// Applies a raw press/release signal and returns the key's new state.
    ///
    /// # Errors
    ///
    /// - [`KeyTrackerError::UnknownKey`] if `code` is not watched
    /// - [`KeyTrackerError::InvalidState`] if the key is `Invalid`
    ///
    /// Neither error mutates the tracker.
    pub fn update(&mut self, code: KeyCode, pressed: bool) -> Result<KeyState, KeyTrackerError> {
        let index = self.find(code).ok_or(KeyTrackerError::UnknownKey(code))?;

        let state = self.states[index];
        if state == KeyState::Invalid {
            return Err(KeyTrackerError::InvalidState(code));
        }

        let next = state.apply(pressed);
        self.states[index] = next;
        Ok(next)
    }

    /// Feeds a platform event into the tracker.
    ///
    /// Returns `Ok(None)` for non-keyboard events, so `poll_event`
    /// implementations can forward every event unconditionally.
    pub fn handle_event(&mut self, event: &PlatformEvent) -> Result<Option<KeyState>, KeyTrackerError> {
        match event.key() {
            Some((code, pressed)) => self.update(code, pressed).map(Some),
            None => Ok(None),
        }
    }

    /// Collapses `JustPressed → LongPressed` and `JustReleased → LongReleased`.
    ///
    /// Call exactly once per frame, after game logic has read edge states.
    pub fn frame_end(&mut self) {
        for state in &mut self.states {
            *state = state.settle();
        }
    }

    //--- Query API --------------------------------------------------------

    /// Returns the current state of `code`, or `Invalid` if unwatched.
    pub fn view_key(&self, code: KeyCode) -> KeyState {
        self.find(code)
            .map_or(KeyState::Invalid, |index| self.states[index])
    }

    /// Returns `true` if `code` was registered at construction.
    pub fn is_watched(&self, code: KeyCode) -> bool {
        self.find(code).is_some()
    }

    /// Iterates watched keys and their states in registration order.
    pub fn watched(&self) -> impl Iterator<Item = (KeyCode, KeyState)> + '_ {
        self.keys.iter().copied().zip(self.states.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    //--- Internal Helpers -------------------------------------------------

    fn find(&self, code: KeyCode) -> Option<usize> {
        self.keys.iter().position(|&key| key == code)
    }

    #[cfg(test)]
    fn force_state(&mut self, code: KeyCode, state: KeyState) {
        if let Some(index) = self.find(code) {
            self.states[index] = state;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
