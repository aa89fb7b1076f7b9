//=========================================================================
// Tandem Engine — Library Root
//
// A minimal real-time game loop: an active/standby scene pair driven
// frame by frame, with scene transitions loaded on a background thread
// while the standby scene keeps the screen alive.
//
// Typical usage:
// ```no_run
// use tandem_engine::prelude::*;
// # struct Scenes;
// # impl SceneFactory for Scenes {
// #     fn initial_active(&self) -> Box<dyn Scene> { unimplemented!() }
// #     fn initial_standby(&self) -> Box<dyn Scene> { unimplemented!() }
// # }
//
// EngineBuilder::new().build(Scenes).run().unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the scene host, the scene contract and the input tracker.
// It has no dependency on the window system and can be driven directly
// with any EventSource / RenderSurface pair.
//
// `scenes` is the bundled demo content used by the binary.
//
pub mod core;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the Winit event loop and window; `engine` wires it to
// the host thread.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder, EngineError};
pub use platform::{FramePacer, FrameSurface, HostSignal, PlatformError};
