//=========================================================================
// Scene Lifecycle Guard
//=========================================================================
//
// Wraps a boxed scene with its lifecycle state so the host can never call
// into a scene out of order.
//
// ```text
//   Unloaded ──load ok──> Loaded ──destroy──> Destroyed
//       │
//       └──load err──> Failed
// ```
//
// - `load` outside `Unloaded` and `destroy` outside `Loaded` are skipped
//   with a warning and report success (at-most-once semantics).
// - Frame calls outside `Loaded` report `SceneError::LIFECYCLE`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::{FrameContext, Scene, UpdateResult};
use crate::core::error::{SceneError, SceneResult};
use crate::core::host::HostSettings;
use crate::core::platform_bridge::{PlatformEvent, RenderSurface};

//=== LifecycleState ======================================================

/// Where a hosted scene is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Unloaded,
    Loaded,

    /// `load` returned an error; the scene accepts no further calls.
    Failed,

    Destroyed,
}

//=== HostedScene =========================================================

pub(crate) struct HostedScene {
    scene: Box<dyn Scene>,
    state: LifecycleState,
}

impl HostedScene {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            state: LifecycleState::Unloaded,
        }
    }

    pub(crate) fn name(&self) -> &str {
        self.scene.name()
    }

    pub(crate) fn state(&self) -> LifecycleState {
        self.state
    }

    //--- Lifecycle --------------------------------------------------------

    pub(crate) fn load(&mut self, settings: &HostSettings) -> SceneResult {
        if self.state != LifecycleState::Unloaded {
            warn!(target: "host", "Skipping load of {} in state {:?}", self.name(), self.state);
            return Ok(());
        }

        trace!(target: "host", "Loading {}", self.name());
        let result = self.scene.load(settings);
        self.state = match result {
            Ok(()) => LifecycleState::Loaded,
            Err(_) => LifecycleState::Failed,
        };
        result
    }

    /// Destroys a loaded scene. The scene counts as destroyed even if
    /// `destroy` reports an error.
    pub(crate) fn destroy(&mut self, settings: &HostSettings) -> SceneResult {
        if self.state != LifecycleState::Loaded {
            warn!(target: "host", "Skipping destroy of {} in state {:?}", self.name(), self.state);
            return Ok(());
        }

        trace!(target: "host", "Destroying {}", self.name());
        self.state = LifecycleState::Destroyed;
        self.scene.destroy(settings)
    }

    //--- Frame Calls ------------------------------------------------------

    pub(crate) fn poll_event(&mut self, ctx: &mut FrameContext<'_>, event: &PlatformEvent) -> SceneResult {
        self.ensure_loaded()?;
        self.scene.poll_event(ctx, event)
    }

    pub(crate) fn update(&mut self, ctx: &mut FrameContext<'_>) -> UpdateResult {
        if let Err(error) = self.ensure_loaded() {
            return UpdateResult::failed(error);
        }
        self.scene.update(ctx)
    }

    pub(crate) fn draw(&mut self, ctx: &FrameContext<'_>, surface: &mut dyn RenderSurface) -> SceneResult {
        self.ensure_loaded()?;
        self.scene.draw(ctx, surface)
    }

    fn ensure_loaded(&self) -> SceneResult {
        if self.state == LifecycleState::Loaded {
            Ok(())
        } else {
            warn!(target: "host", "Frame call on {} in state {:?}", self.name(), self.state);
            Err(SceneError::LIFECYCLE)
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
