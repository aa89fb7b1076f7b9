//=========================================================================
// Frame Surface
//=========================================================================
//
// Bundled `RenderSurface` for the windowed runtime.
//
// Architecture:
// ```text
//   SceneHost ──clear/submit──> FrameSurface.pending
//             ──present()────>  FramePacer::pace (sleep to budget)
//                               pending → presented
//                               notifier(frame) ──> platform redraw
// ```
//
// The surface keeps the last presented draw list instead of rasterising
// it; pixel output belongs to whatever backend consumes that list.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem;
use std::thread;
use std::time::{Duration, Instant};

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::host::{FrameRate, HostSettings};
use crate::core::platform_bridge::{Color, DrawCommand, RenderSurface};

//=== FramePacer ==========================================================

/// Sleeps so consecutive presents are at least one frame budget apart.
#[derive(Debug, Clone)]
pub struct FramePacer {
    budget: Duration,
    last: Option<Instant>,
}

impl FramePacer {
    /// Refresh rate assumed in vsync mode (no swapchain to block on).
    pub const VSYNC_FALLBACK_HZ: u32 = 60;

    pub fn new(frame_rate: FrameRate) -> Self {
        let hz = match frame_rate {
            FrameRate::Capped(fps) => fps.max(1),
            FrameRate::VSync => Self::VSYNC_FALLBACK_HZ,
        };
        Self {
            budget: Duration::from_nanos(1_000_000_000 / u64::from(hz)),
            last: None,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Blocks until a full budget has passed since the previous call and
    /// returns how long it slept. The first call never sleeps.
    pub fn pace(&mut self) -> Duration {
        let slept = match self.last {
            Some(last) => {
                let elapsed = last.elapsed();
                if elapsed < self.budget {
                    let wait = self.budget - elapsed;
                    thread::sleep(wait);
                    wait
                } else {
                    Duration::ZERO
                }
            }
            None => Duration::ZERO,
        };
        self.last = Some(Instant::now());
        slept
    }
}

//=== FrameSurface ========================================================

type PresentNotifier = Box<dyn FnMut(u64) + Send>;

/// Paced, recording render surface.
pub struct FrameSurface {
    clear_color: Color,
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames: u64,
    pacer: FramePacer,
    notifier: Option<PresentNotifier>,
}

impl FrameSurface {
    pub fn new(settings: &HostSettings) -> Self {
        Self {
            clear_color: settings.clear_color,
            pending: Vec::with_capacity(16),
            presented: Vec::with_capacity(16),
            frames: 0,
            pacer: FramePacer::new(settings.frame_rate),
            notifier: None,
        }
    }

    /// Calls `notifier` with the frame number after every present.
    pub fn with_notifier<F>(mut self, notifier: F) -> Self
    where
        F: FnMut(u64) + Send + 'static,
    {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Draw list of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.presented
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn presented_frames(&self) -> u64 {
        self.frames
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }
}

impl RenderSurface for FrameSurface {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.pending.clear();
    }

    fn submit(&mut self, command: DrawCommand) {
        self.pending.push(command);
    }

    fn present(&mut self) {
        self.pacer.pace();
        mem::swap(&mut self.pending, &mut self.presented);
        self.pending.clear();
        self.frames += 1;

        trace!(target: "platform", "Presented frame {} ({} draws)", self.frames, self.presented.len());

        if let Some(notify) = self.notifier.as_mut() {
            notify(self.frames);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
