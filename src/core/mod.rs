//=========================================================================
// Core Systems
//
// Everything that runs on the host thread and never touches the window
// system directly.
//
// Layout:
// - `host`             SceneHost frame loop, settings, frame clock
// - `scene`            Scene trait, lifecycle guard, transition worker
// - `input`            KeyCode and the per-frame KeyState tracker
// - `platform_bridge`  EventSource / RenderSurface contracts
// - `error`            error codes and error types shared by the above
//
//=========================================================================

pub mod error;
pub mod host;
pub mod input;
pub mod platform_bridge;
pub mod scene;
