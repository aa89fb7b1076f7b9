//=========================================================================
// Tandem Engine
//
// Main entry point: wires the winit platform to a scene host thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(factory)──>  Engine  ──run()──>  [Runtime]
//         │                                  │
//         ├─ with_settings()                 ├─ spawns host thread
//         └─ with_channel_capacity()         ├─ runs platform (main thread)
//                                            └─ joins host, returns result
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info, warn};
use thiserror::Error;
use winit::event_loop::EventLoopProxy;

//=== Internal Dependencies ===============================================

use crate::core::error::HostError;
use crate::core::host::{HostSettings, SceneHost};
use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::core::scene::SceneFactory;
use crate::platform::{FrameSurface, HostSignal, Platform, PlatformError};

//=== EngineError =========================================================

/// Why [`Engine::run`] did not finish cleanly.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("scene host thread panicked")]
    HostThreadPanicked,
}

impl EngineError {
    /// Process exit status for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Platform(_) => 1,
            Self::Host(e) => e.code(),
            Self::HostThreadPanicked => 101,
        }
    }
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Settings**: [`HostSettings::default`]
/// - **Channel capacity**: 128 events
///
/// # Examples
///
/// ```no_run
/// use tandem_engine::prelude::*;
///
/// struct Blank;
///
/// impl Scene for Blank {
///     fn update(&mut self, _ctx: &mut FrameContext<'_>) -> UpdateResult {
///         UpdateResult::ok()
///     }
///
///     fn draw(&mut self, _ctx: &FrameContext<'_>, _surface: &mut dyn RenderSurface) -> SceneResult {
///         Ok(())
///     }
/// }
///
/// struct Scenes;
///
/// impl SceneFactory for Scenes {
///     fn initial_active(&self) -> Box<dyn Scene> { Box::new(Blank) }
///     fn initial_standby(&self) -> Box<dyn Scene> { Box::new(Blank) }
/// }
///
/// let settings = HostSettings::builder().with_title("Blank").build();
///
/// EngineBuilder::new()
///     .with_settings(settings)
///     .with_channel_capacity(256)
///     .build(Scenes)
///     .run()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    settings: HostSettings,
    channel_capacity: usize,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: HostSettings::default(),
            channel_capacity: 128,
        }
    }

    pub fn with_settings(mut self, settings: HostSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the channel capacity for platform → host communication.
    ///
    /// The platform blocks when the channel is full, so a small value
    /// throttles input rather than dropping it.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds the engine around `factory`, which supplies the initial
    /// active and standby scenes.
    pub fn build<F>(self, factory: F) -> Engine<F>
    where
        F: SceneFactory + Send + 'static,
    {
        info!(
            "Building engine ({:?}, {}x{}, channel: {})",
            self.settings.frame_rate, self.settings.width, self.settings.height, self.channel_capacity
        );

        Engine {
            factory,
            settings: Arc::new(self.settings),
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Tandem Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► SceneHost (Host Thread)
///   │     ├─► active / standby scenes
///   │     └─► transition workers
///   │
///   └─► Platform (Event Loop)
///         └─► Window, keyboard input
///
/// Platform → Host: crossbeam channel (PlatformEvent)
/// Host → Platform: EventLoopProxy (HostSignal)
/// ```
pub struct Engine<F> {
    factory: F,
    settings: Arc<HostSettings>,
    channel_capacity: usize,
}

impl<F> Engine<F>
where
    F: SceneFactory + Send + 'static,
{
    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    /// Starts the runtime and blocks until the host stops.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the event loop and the platform → host channel
    /// 2. Spawns the host thread, which loads both scenes and runs frames
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Host stops (exit request, close, or failure) → shuts scenes down →
    ///    signals the platform → event loop exits
    /// 5. Joins the host thread and returns its result
    ///
    /// A host failure takes precedence over a platform failure.
    pub fn run(self) -> Result<(), EngineError> {
        info!("Starting engine runtime");

        //--- 1. Event loop and channel ------------------------------------
        let event_loop = Platform::create_event_loop()?;
        let proxy = event_loop.create_proxy();

        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(self.channel_capacity);
        info!("Platform channel created (capacity: {})", self.channel_capacity);

        //--- 2. Host thread -----------------------------------------------
        let settings = Arc::clone(&self.settings);
        let factory = self.factory;
        let host_handle = thread::spawn(move || run_host(settings, factory, rx, proxy));
        info!("Host thread spawned");

        //--- 3. Platform --------------------------------------------------
        let platform = Platform::new(self.settings, tx);
        let platform_result = platform.run(event_loop);
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        // The sender was dropped with the platform, so a host still
        // running sees a disconnect and stops.

        //--- 4. Join ------------------------------------------------------
        let host_result = match host_handle.join() {
            Ok(result) => result,
            Err(_) => {
                error!("Host thread panicked");
                return Err(EngineError::HostThreadPanicked);
            }
        };

        info!("Engine shutdown complete");
        host_result?;
        platform_result?;
        Ok(())
    }
}

//=== Host Thread =========================================================

fn run_host<F>(
    settings: Arc<HostSettings>,
    factory: F,
    rx: Receiver<PlatformEvent>,
    proxy: EventLoopProxy<HostSignal>,
) -> Result<(), HostError>
where
    F: SceneFactory,
{
    let redraw = proxy.clone();
    let surface = FrameSurface::new(&settings).with_notifier(move |_| {
        let _ = redraw.send_event(HostSignal::FramePresented);
    });

    let result = SceneHost::start(settings, &factory, EventCollector::new(rx), surface).and_then(SceneHost::run);
    match &result {
        Ok(()) => info!(target: "host", "Host finished cleanly"),
        Err(e) => error!(target: "host", "Host finished with error {}: {}", e.code(), e),
    }

    if proxy.send_event(HostSignal::HostStopped).is_err() {
        warn!(target: "host", "Event loop already closed");
    }
    result
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{SceneError, SceneResult};
    use crate::core::platform_bridge::RenderSurface;
    use crate::core::scene::{FrameContext, Scene, UpdateResult};

    struct Blank;

    impl Scene for Blank {
        fn update(&mut self, _ctx: &mut FrameContext<'_>) -> UpdateResult {
            UpdateResult::ok()
        }

        fn draw(&mut self, _ctx: &FrameContext<'_>, _surface: &mut dyn RenderSurface) -> SceneResult {
            Ok(())
        }
    }

    struct Blanks;

    impl SceneFactory for Blanks {
        fn initial_active(&self) -> Box<dyn Scene> {
            Box::new(Blank)
        }

        fn initial_standby(&self) -> Box<dyn Scene> {
            Box::new(Blank)
        }
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = EngineBuilder::new();
        assert_eq!(builder.settings, HostSettings::default());
        assert_eq!(builder.channel_capacity, 128);
    }

    #[test]
    fn builder_with_channel_capacity() {
        let builder = EngineBuilder::new().with_channel_capacity(256);
        assert_eq!(builder.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        EngineBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let settings = HostSettings::builder().with_title("Chained").with_vsync().build();
        let engine = EngineBuilder::new()
            .with_settings(settings)
            .with_channel_capacity(16)
            .build(Blanks);

        assert_eq!(engine.settings().title, "Chained");
        assert!(engine.settings().vsync());
        assert_eq!(engine.channel_capacity, 16);
    }

    //=====================================================================
    // EngineError Tests
    //=====================================================================

    #[test]
    fn error_codes() {
        let host = EngineError::from(HostError::Scene {
            role: crate::core::error::SceneRole::Active,
            phase: crate::core::error::ScenePhase::Update,
            source: SceneError::GENERIC,
        });
        assert_eq!(host.code(), 1);
        assert_eq!(EngineError::HostThreadPanicked.code(), 101);
    }
}
