//=========================================================================
// Demo Scenes
//=========================================================================
//
// Content for the bundled binary: a paddle court as the active scene and
// a loading bar as standby.
//
//=========================================================================

mod court;
mod loader;

pub use court::{Body, Court, CourtState};
pub use loader::Loader;

use crate::core::scene::{Scene, SceneFactory};

/// Starts on a fresh court with the loader on standby.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoScenes;

impl SceneFactory for DemoScenes {
    fn initial_active(&self) -> Box<dyn Scene> {
        Box::new(Court::new())
    }

    fn initial_standby(&self) -> Box<dyn Scene> {
        Box::new(Loader::new())
    }
}
