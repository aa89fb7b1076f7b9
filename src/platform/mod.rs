//=========================================================================
// Platform Subsystem
//=========================================================================
//
// Bridges Winit (OS-level events) with the scene host thread.
//
// Architecture:
// ```text
//  Main Thread:                       Host Thread:
//  ┌──────────────────────────┐      ┌────────────────────────┐
//  │  Winit Event Loop        │      │  SceneHost::run        │
//  │   ↓                      │      │   ↑ EventCollector     │
//  │  InputProcessor          │      │   │                    │
//  │   ├─ drops repeats       │      │  FrameSurface          │
//  │   └─ drops unmapped keys │      │   └─ notifier ─────┐   │
//  │   ↓                      │      └────────────────────┼───┘
//  │  crossbeam Sender ───────┼──PlatformEvent──>         │
//  │                          │                           │
//  │  user_event(HostSignal) <┼──EventLoopProxy───────────┘
//  │   ├─ FramePresented → request_redraw
//  │   └─ HostStopped    → exit
//  └──────────────────────────┘
// ```
//
// Notes:
// - Winit mandates the main thread on macOS/iOS, so this runs on the
//   thread that called `Engine::run()`.
// - Closing the window only asks the host to stop. The event loop keeps
//   running until the host has shut its scenes down and says so.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;
mod surface;

//=== External Crates =====================================================

use std::sync::Arc;

use crossbeam_channel::Sender;
use log::*;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    error::EventLoopError,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::host::HostSettings;
use crate::core::platform_bridge::PlatformEvent;
use input_processor::InputProcessor;

pub use surface::{FramePacer, FrameSurface};

//=== HostSignal ==========================================================

/// Messages from the host thread to the platform event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// A frame was presented; the window should redraw.
    FramePresented,

    /// The host has shut down; the event loop should exit.
    HostStopped,
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] EventLoopError),
}

//=== Platform ============================================================

/// Window owner and event forwarder.
///
/// Not `Send`: it lives on the main thread. The host is reached only
/// through the crossbeam sender.
pub(crate) struct Platform {
    settings: Arc<HostSettings>,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    event_sender: Sender<PlatformEvent>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens in `resumed()`.
    pub(crate) fn new(settings: Arc<HostSettings>, event_sender: Sender<PlatformEvent>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            settings,
            window: None,
            event_sender,
            input_processor: InputProcessor::new(),
        }
    }

    /// Creates the event loop that carries [`HostSignal`]s.
    ///
    /// Must be called on the main thread.
    pub(crate) fn create_event_loop() -> Result<EventLoop<HostSignal>, PlatformError> {
        EventLoop::<HostSignal>::with_user_event()
            .build()
            .map_err(PlatformError::EventLoopCreation)
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the host reports it has stopped.
    pub(crate) fn run(mut self, event_loop: EventLoop<HostSignal>) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends an event to the host. Returns `false` once the host is gone.
    fn forward(&self, event: PlatformEvent) -> bool {
        trace!(target: "platform::input", "Forwarding {:?}", event);
        if self.event_sender.send(event).is_err() {
            warn!(target: "platform", "Host channel disconnected, dropping {:?}", event);
            return false;
        }
        true
    }

    /// Applies a host signal. Returns `true` if the event loop should exit.
    fn handle_signal(&self, signal: HostSignal) -> bool {
        match signal {
            HostSignal::FramePresented => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
                false
            }
            HostSignal::HostStopped => {
                info!(target: "platform", "Host stopped, leaving event loop");
                true
            }
        }
    }

    /// Maps a window event onto what the host consumes, if anything.
    fn translate(&self, event: &WindowEvent) -> Option<PlatformEvent> {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                Some(PlatformEvent::CloseRequested)
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let translated = self.input_processor.process_key_event(key_event);
                if translated.is_none() {
                    trace!(target: "platform::input", "Repeat or unmapped key ignored");
                }
                translated
            }

            WindowEvent::Focused(_) | WindowEvent::Resized(_) => Some(PlatformEvent::Other),

            // Redraws are driven by the host thread.
            _ => None,
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler<HostSignal> for Platform {
    /// Creates the window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        match event_loop.create_window(self.window_attributes()) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.forward(PlatformEvent::CloseRequested);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, signal: HostSignal) {
        if self.handle_signal(signal) {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Some(event) = self.translate(&event) {
            if !self.forward(event) {
                event_loop.exit();
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
