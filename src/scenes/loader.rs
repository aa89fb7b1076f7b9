//=========================================================================
// Loader Scene
//=========================================================================
//
// Standby placeholder shown while a transition runs. It owns nothing
// worth loading, ignores input and draws a sweeping progress bar so a
// slow transition is visibly alive.
//
//=========================================================================

use crate::core::error::SceneResult;
use crate::core::platform_bridge::{Color, DrawCommand, RenderSurface};
use crate::core::scene::{FrameContext, Scene, UpdateResult};

const BAR_HEIGHT: f32 = 8.0;
const SWEEP_SECONDS: f32 = 1.5;

/// Loading indicator used as the standby scene.
#[derive(Debug, Default)]
pub struct Loader {
    /// Sweep position in `[0, 1)`.
    phase: f32,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}

impl Scene for Loader {
    fn name(&self) -> &str {
        "loader"
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> UpdateResult {
        self.phase = (self.phase + ctx.delta().as_secs_f32() / SWEEP_SECONDS).fract();
        UpdateResult::ok()
    }

    fn draw(&mut self, ctx: &FrameContext<'_>, surface: &mut dyn RenderSurface) -> SceneResult {
        let width = ctx.settings().width as f32;
        let height = ctx.settings().height as f32;

        surface.submit(DrawCommand::Rect {
            x: 0.0,
            y: (height - BAR_HEIGHT) / 2.0,
            width: width * self.phase,
            height: BAR_HEIGHT,
            color: Color::WHITE,
        });
        Ok(())
    }
}
