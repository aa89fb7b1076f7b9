//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tandem_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine entry point
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Host and settings
pub use crate::core::host::{FrameRate, HostSettings, SceneHost, Tunables};

// Scene contract
pub use crate::core::error::{SceneError, SceneResult};
pub use crate::core::scene::{FrameContext, Scene, SceneFactory, UpdateResult};

// Input
pub use crate::core::input::{KeyCode, KeyState, KeyStateTracker};

// Rendering and events
pub use crate::core::platform_bridge::{Color, DrawCommand, EventSource, PlatformEvent, RenderSurface};
