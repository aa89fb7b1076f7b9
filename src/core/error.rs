//=========================================================================
// Error Types
//=========================================================================
//
// Outcome codes for the scene lifecycle, the asynchronous transition and
// the KeyState tracker.
//
// Every error carries a non-zero numeric code (`code()`); success is the
// absence of an error. The numeric code is the whole contract toward the
// outside world: the binary turns it into the process exit status.
//
// Taxonomy:
//   SceneError        Load/PollEvent/Update/Draw/Destroy failures (fatal)
//   TransitionError   background destroy-old / load-new failures
//   ShutdownError     accumulated teardown failures (never short-circuits)
//   HostError         everything the frame loop propagates upward
//   KeyTrackerError   local contract violations, returned to the scene
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::num::NonZeroI32;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== SceneError ==========================================================

/// Result of a scene lifecycle call.
pub type SceneResult = Result<(), SceneError>;

/// Non-zero failure code reported by a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("scene reported error code {0}")]
pub struct SceneError(NonZeroI32);

const fn non_zero(code: i32) -> NonZeroI32 {
    match NonZeroI32::new(code) {
        Some(code) => code,
        None => panic!("error codes must be non-zero"),
    }
}

impl SceneError {
    /// Unspecified scene failure.
    pub const GENERIC: Self = Self(non_zero(1));

    /// A lifecycle call arrived in a state that does not allow it.
    pub const LIFECYCLE: Self = Self(non_zero(2));

    /// Wraps a raw outcome code. Returns `None` for `0` (success).
    pub fn new(code: i32) -> Option<Self> {
        NonZeroI32::new(code).map(Self)
    }

    /// Converts a raw outcome code into a [`SceneResult`].
    pub fn check(code: i32) -> SceneResult {
        match Self::new(code) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn code(self) -> i32 {
        self.0.get()
    }
}

impl From<NonZeroI32> for SceneError {
    fn from(code: NonZeroI32) -> Self {
        Self(code)
    }
}

//=== Lifecycle Labels ====================================================

/// Which slot a scene occupied when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneRole {
    Active,
    Standby,
}

impl fmt::Display for SceneRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Standby => write!(f, "standby"),
        }
    }
}

/// Lifecycle operation that produced a frame or startup error.
///
/// Destroy failures are carried by [`ShutdownError`] and [`TransitionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePhase {
    Load,
    PollEvent,
    Update,
    Draw,
}

impl fmt::Display for ScenePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Load => "load",
            Self::PollEvent => "poll_event",
            Self::Update => "update",
            Self::Draw => "draw",
        };
        f.write_str(name)
    }
}

//=== TransitionError =====================================================

/// Failure raised on the background transition context.
///
/// Never fatal at the moment it happens; the host records it and
/// propagates it on the next frame it evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The outgoing active scene failed to destroy. The successor was not loaded.
    #[error("destroying the outgoing scene failed: {0}")]
    Destroy(#[source] SceneError),

    /// The successor scene failed to load.
    #[error("loading the successor scene failed: {0}")]
    Load(#[source] SceneError),

    /// The worker thread died without publishing an outcome.
    #[error("transition worker panicked")]
    WorkerPanicked,
}

impl TransitionError {
    /// Exit status used for a panicked worker, same as a panicking Rust process.
    pub const WORKER_PANIC_CODE: i32 = 101;

    pub fn code(self) -> i32 {
        match self {
            Self::Destroy(e) | Self::Load(e) => e.code(),
            Self::WorkerPanicked => Self::WORKER_PANIC_CODE,
        }
    }
}

//=== ShutdownError =======================================================

/// Accumulated teardown failures.
///
/// Both scenes are always destroyed; each failure is recorded here instead
/// of aborting the teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("shutdown failed (active: {active:?}, standby: {standby:?}, transition: {transition:?})")]
pub struct ShutdownError {
    pub active: Option<SceneError>,
    pub standby: Option<SceneError>,

    /// A transition drained during shutdown that failed and was never
    /// reported by a frame.
    pub transition: Option<TransitionError>,
}

impl ShutdownError {
    pub fn is_empty(&self) -> bool {
        self.active.is_none() && self.standby.is_none() && self.transition.is_none()
    }

    /// Sum of all recorded codes.
    pub fn code(&self) -> i32 {
        let parts = [
            self.active.map(SceneError::code),
            self.standby.map(SceneError::code),
            self.transition.map(TransitionError::code),
        ];
        parts.into_iter().flatten().fold(0i32, i32::saturating_add)
    }

    pub(crate) fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

//=== HostError ===========================================================

/// Errors propagated by the frame loop, startup and shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HostError {
    /// A lifecycle call on a hosted scene failed.
    #[error("{role} scene failed during {phase}: {source}")]
    Scene {
        role: SceneRole,
        phase: ScenePhase,
        source: SceneError,
    },

    /// A background transition failed; observed on the following frame.
    #[error("scene transition failed: {0}")]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),

    /// A frame was requested after the host was shut down.
    #[error("scene host has already been shut down")]
    Stopped,
}

impl HostError {
    pub(crate) fn scene(role: SceneRole, phase: ScenePhase) -> impl FnOnce(SceneError) -> Self {
        move |source| Self::Scene { role, phase, source }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Scene { source, .. } => source.code(),
            Self::Transition(e) => e.code(),
            Self::Shutdown(e) => e.code(),
            Self::Stopped => SceneError::LIFECYCLE.code(),
        }
    }
}

//=== KeyTrackerError =====================================================

/// Contract violations reported by [`crate::core::input::KeyStateTracker`].
///
/// These are returned to the calling scene and never escalated to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyTrackerError {
    /// The key was not registered when the tracker was built.
    #[error("key {0:?} is not watched by this tracker")]
    UnknownKey(KeyCode),

    /// The key is in the `Invalid` state, which normal operation never reaches.
    #[error("key {0:?} is in the invalid state")]
    InvalidState(KeyCode),
}

impl KeyTrackerError {
    pub fn code(self) -> i32 {
        match self {
            Self::UnknownKey(_) => -1,
            Self::InvalidState(_) => 1,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
