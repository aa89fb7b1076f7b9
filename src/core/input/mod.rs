//=========================================================================
// Input
//=========================================================================
//
// Keyboard input for scene logic.
//
// Architecture:
//   PlatformEvent::{KeyPressed, KeyReleased}
//         ↓  (Scene::poll_event)
//   KeyStateTracker   one per scene activation, keys fixed at load
//         ↓  (Scene::update reads, then frame_end)
//   KeyState          edge (Just*) / level (Long*) per key
//
// Notes:
// Trackers are owned by scenes, not by the host. The host only forwards
// events; it never interprets key codes.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod state_tracker;

//=== Public API ==========================================================

pub use event::KeyCode;
pub use state_tracker::{KeyState, KeyStateTracker};
