//=========================================================================
// Scene System
//=========================================================================
//
// The five-operation scene contract and the pieces the host uses to
// drive it.
//
// Architecture:
//   SceneFactory ──> Box<dyn Scene> ──> HostedScene (lifecycle guard)
//                                          │
//   Scene::update ──UpdateResult.next──> Transition (background worker)
//                                          │  destroy old, load new
//                                          └─> TransitionOutcome
//
// Lifecycle per instance: Unloaded → Loaded → Destroyed
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::error::{SceneError, SceneResult};
use crate::core::host::HostSettings;
use crate::core::platform_bridge::{PlatformEvent, RenderSurface};

//=== Module Declarations =================================================

mod lifecycle;
mod transition;

//=== Public API ==========================================================

pub use lifecycle::LifecycleState;
pub(crate) use lifecycle::HostedScene;
pub(crate) use transition::{Transition, TransitionOutcome};

//=== Scene Trait =========================================================

/// A unit of gameplay logic driven by the scene host.
///
/// `load` and `destroy` may run on the background transition thread, so
/// they only see the shared settings. Frame calls (`poll_event`, `update`,
/// `draw`) always run on the foreground loop and only while the scene is
/// loaded.
///
/// # Minimal Implementation
///
/// Only `update()` and `draw()` are required:
///
/// ```rust
/// use tandem_engine::prelude::*;
///
/// struct Blank;
///
/// impl Scene for Blank {
///     fn update(&mut self, _ctx: &mut FrameContext<'_>) -> UpdateResult {
///         UpdateResult::ok()
///     }
///
///     fn draw(&mut self, _ctx: &FrameContext<'_>, _surface: &mut dyn RenderSurface) -> SceneResult {
///         Ok(())
///     }
/// }
/// ```
pub trait Scene: Send {
    /// Name used in log messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Acquires resources. Called at most once, before any frame call.
    fn load(&mut self, _settings: &HostSettings) -> SceneResult {
        Ok(())
    }

    /// Receives one platform event (never `CloseRequested`).
    fn poll_event(&mut self, _ctx: &mut FrameContext<'_>, _event: &PlatformEvent) -> SceneResult {
        Ok(())
    }

    /// Advances game logic by the previous frame's delta.
    ///
    /// May hand a successor scene to the host through [`UpdateResult`].
    fn update(&mut self, ctx: &mut FrameContext<'_>) -> UpdateResult;

    /// Submits this frame's draw calls.
    fn draw(&mut self, ctx: &FrameContext<'_>, surface: &mut dyn RenderSurface) -> SceneResult;

    /// Releases everything acquired in `load`. Called at most once.
    fn destroy(&mut self, _settings: &HostSettings) -> SceneResult {
        Ok(())
    }
}

//=== UpdateResult ========================================================

/// Outcome of [`Scene::update`].
///
/// `status` and `next` are independent: a failed update still owns its
/// successor (which the host then drops), and a successful update may or
/// may not request a transition.
#[must_use]
pub struct UpdateResult {
    /// Whether the update succeeded.
    pub status: SceneResult,

    /// Requested successor. Ownership moves to the host.
    pub next: Option<Box<dyn Scene>>,
}

impl UpdateResult {
    /// Success, no transition.
    pub fn ok() -> Self {
        Self {
            status: Ok(()),
            next: None,
        }
    }

    /// Failure, no transition.
    pub fn failed(error: SceneError) -> Self {
        Self {
            status: Err(error),
            next: None,
        }
    }

    /// Success, requesting a transition to `scene`.
    pub fn transition_to<S>(scene: S) -> Self
    where
        S: Scene + 'static,
    {
        Self::ok().with_next(Box::new(scene))
    }

    pub fn with_next(mut self, scene: Box<dyn Scene>) -> Self {
        self.next = Some(scene);
        self
    }
}

impl From<SceneResult> for UpdateResult {
    fn from(status: SceneResult) -> Self {
        Self { status, next: None }
    }
}

impl fmt::Debug for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateResult")
            .field("status", &self.status)
            .field("next", &self.next.as_ref().map(|scene| scene.name()))
            .finish()
    }
}

//=== FrameContext ========================================================

/// Per-frame view of host state handed to frame calls.
pub struct FrameContext<'a> {
    settings: &'a HostSettings,
    delta: Duration,
    exit_requested: &'a mut bool,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(settings: &'a HostSettings, delta: Duration, exit_requested: &'a mut bool) -> Self {
        Self {
            settings,
            delta,
            exit_requested,
        }
    }

    pub fn settings(&self) -> &HostSettings {
        self.settings
    }

    /// Wall-clock duration of the previous frame.
    pub fn delta(&self) -> Duration {
        self.delta
    }

    pub fn delta_micros(&self) -> u128 {
        self.delta.as_micros()
    }

    /// Asks the host to stop after the current frame.
    pub fn request_exit(&mut self) {
        *self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        *self.exit_requested
    }
}

//=== SceneFactory ========================================================

/// Builds the two scenes the host starts with.
///
/// Both are returned unloaded; the host loads them in order.
pub trait SceneFactory {
    fn initial_active(&self) -> Box<dyn Scene>;
    fn initial_standby(&self) -> Box<dyn Scene>;
}

//=========================================================================
// Unit Tests
//=========================================================================
