//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform layer (winit/SDL/etc.) with the scene host.
//
// This module defines the contract between platform implementations and
// the core, so platform backends can be swapped without changing the
// frame loop.
//
// Components:
// - `interface`: Event, drawing and collaborator trait definitions
// - `event_collector`: Channel-backed event source used by the engine
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::EventCollector;
pub use interface::{Color, DrawCommand, EventSource, PlatformEvent, RenderSurface};
