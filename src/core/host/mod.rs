//=========================================================================
// Scene Host
//=========================================================================
//
// Owns the active/standby scene pair and drives them one frame at a time.
//
// Architecture:
// ```text
//   SceneHost::run_frame()
//     0. observe transition   completed → promote to active
//                             failed    → record async error
//     1. events               CloseRequested → exit flag
//                             others         → current.poll_event
//     2. surface.clear
//     3. current.update       (may hand over a successor)
//     4. current.draw
//     5. hand-off             in flight    → drop successor
//                             async error  → propagate
//                             successor    → spawn Transition
//     6. surface.present, measure delta
// ```
//
// "current" is the active scene when it is live and the standby scene
// while a transition runs (or after one failed). The standby scene is
// therefore always loaded and always drawable.
//
// Every scene the host ever loads is destroyed exactly once: either by a
// transition worker (outgoing active) or by `shutdown` (active, then
// standby).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::mem;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{HostError, SceneRole, ScenePhase, ShutdownError, TransitionError};
use crate::core::platform_bridge::{EventSource, PlatformEvent, RenderSurface};
use crate::core::scene::{FrameContext, HostedScene, Scene, SceneFactory, Transition, TransitionOutcome, UpdateResult};

//=== Module Declarations =================================================

mod frame_clock;
mod settings;

//=== Public API ==========================================================

pub use settings::{FrameRate, HostSettings, HostSettingsBuilder, SettingsError, Tunables};

#[cfg(feature = "config")]
pub use settings::ConfigError;

use frame_clock::FrameClock;

//=== ActiveSlot ==========================================================

/// What currently occupies the active position.
enum ActiveSlot {
    /// A loaded scene that receives frame calls.
    Live(HostedScene),

    /// The previous active scene is being destroyed and its successor
    /// loaded on a worker thread.
    Transitioning(Transition),

    /// No active scene: a transition failed or the host shut down.
    Vacant,
}

impl ActiveSlot {
    fn take_scene(&mut self) -> Option<HostedScene> {
        if !matches!(self, Self::Live(_)) {
            return None;
        }
        match mem::replace(self, Self::Vacant) {
            Self::Live(scene) => Some(scene),
            _ => None,
        }
    }

    fn take_transition(&mut self) -> Option<Transition> {
        if !matches!(self, Self::Transitioning(_)) {
            return None;
        }
        match mem::replace(self, Self::Vacant) {
            Self::Transitioning(transition) => Some(transition),
            _ => None,
        }
    }
}

//=== HostState ===========================================================

#[derive(Debug, Default)]
struct HostState {
    exit_requested: bool,

    /// Duration of the last completed frame, handed to the next one.
    elapsed: Duration,

    /// Transition failure waiting to be propagated by the next frame.
    async_error: Option<TransitionError>,

    frames: u64,
}

//=== SceneHost ===========================================================

/// Scene lifecycle driver.
///
/// `E` supplies platform events and `R` receives draw calls; both are
/// touched only from the thread that calls [`run_frame`](Self::run_frame).
pub struct SceneHost<E: EventSource, R: RenderSurface> {
    settings: Arc<HostSettings>,
    events: E,
    surface: R,
    active: ActiveSlot,
    standby: Option<HostedScene>,
    state: HostState,
    clock: FrameClock,
}

impl<E: EventSource, R: RenderSurface> SceneHost<E, R> {
    //=== Startup =========================================================

    /// Builds both scenes through `factory` and loads active, then standby.
    ///
    /// On failure no further lifecycle calls are made; both scenes are
    /// dropped.
    pub fn start<F>(
        settings: impl Into<Arc<HostSettings>>,
        factory: &F,
        events: E,
        surface: R,
    ) -> Result<Self, HostError>
    where
        F: SceneFactory + ?Sized,
    {
        let settings = settings.into();
        let mut active = HostedScene::new(factory.initial_active());
        let mut standby = HostedScene::new(factory.initial_standby());

        info!(target: "host", "Starting host (active: {}, standby: {})", active.name(), standby.name());

        active
            .load(&settings)
            .map_err(HostError::scene(SceneRole::Active, ScenePhase::Load))?;
        standby
            .load(&settings)
            .map_err(HostError::scene(SceneRole::Standby, ScenePhase::Load))?;

        Ok(Self {
            settings,
            events,
            surface,
            active: ActiveSlot::Live(active),
            standby: Some(standby),
            state: HostState::default(),
            clock: FrameClock::new(),
        })
    }

    //=== Frame Loop ======================================================

    /// Runs one frame.
    ///
    /// A failing frame call aborts the rest of the frame, so nothing is
    /// presented. A transition failure recorded at the start of this frame
    /// is returned after the standby scene has drawn.
    pub fn run_frame(&mut self) -> Result<(), HostError> {
        self.observe_transition();

        let Self {
            settings,
            events,
            surface,
            active,
            standby,
            state,
            clock,
        } = self;
        let settings_ref: &HostSettings = settings;

        let Some(standby) = standby.as_mut() else {
            return Err(HostError::Stopped);
        };
        let (scene, role) = match &mut *active {
            ActiveSlot::Live(scene) => (scene, SceneRole::Active),
            _ => (standby, SceneRole::Standby),
        };

        //--- 1. Events ----------------------------------------------------

        while let Some(event) = events.poll_event() {
            if event == PlatformEvent::CloseRequested {
                info!(target: "host", "Close requested");
                state.exit_requested = true;
                continue;
            }

            trace!(target: "host", "Forwarding {:?} to {}", event, scene.name());
            let mut ctx = FrameContext::new(settings_ref, state.elapsed, &mut state.exit_requested);
            scene
                .poll_event(&mut ctx, &event)
                .map_err(HostError::scene(role, ScenePhase::PollEvent))?;
        }

        //--- 2-4. Clear, update, draw ---------------------------------------

        surface.clear(settings_ref.clear_color);

        let mut ctx = FrameContext::new(settings_ref, state.elapsed, &mut state.exit_requested);
        let UpdateResult { status, next } = scene.update(&mut ctx);
        status.map_err(HostError::scene(role, ScenePhase::Update))?;

        scene
            .draw(&ctx, &mut *surface)
            .map_err(HostError::scene(role, ScenePhase::Draw))?;

        //--- 5. Hand-off ----------------------------------------------------

        if let ActiveSlot::Transitioning(transition) = &*active {
            if let Some(next) = next {
                debug!(
                    target: "host",
                    "Dropping successor {} requested while {} is loading",
                    next.name(),
                    transition.successor()
                );
            }
        } else if let Some(error) = state.async_error.take() {
            error!(target: "host", "Propagating transition failure: {}", error);
            return Err(error.into());
        } else if let Some(next) = next {
            Self::begin_transition(active, next, settings);
        }

        //--- 6. Present -----------------------------------------------------

        surface.present();
        state.elapsed = clock.restart();
        state.frames += 1;
        Ok(())
    }

    /// Runs frames until exit is requested or a frame fails, then shuts
    /// down.
    ///
    /// A frame failure takes precedence over shutdown failures, which are
    /// only logged in that case.
    pub fn run(mut self) -> Result<(), HostError> {
        info!(target: "host", "Entering frame loop");

        let outcome = loop {
            if let Err(error) = self.run_frame() {
                error!(target: "host", "Frame {} failed: {}", self.state.frames, error);
                break Err(error);
            }
            if self.state.exit_requested {
                info!(target: "host", "Exit requested after {} frames", self.state.frames);
                break Ok(());
            }
        };

        let shutdown = self.shutdown();
        match outcome {
            Err(error) => {
                if let Err(teardown) = shutdown {
                    warn!(target: "host", "Shutdown after failure also failed: {}", teardown);
                }
                Err(error)
            }
            Ok(()) => shutdown,
        }
    }

    //=== Shutdown ========================================================

    /// Drains any transition, then destroys active and standby in that
    /// order. Every failure is collected; none stops the teardown.
    ///
    /// Calling it again is a no-op.
    pub fn shutdown(&mut self) -> Result<(), HostError> {
        if self.is_shut_down() {
            debug!(target: "host", "Shutdown requested again, nothing to do");
            return Ok(());
        }

        info!(target: "host", "Shutting down");
        self.await_transition();

        let mut report = ShutdownError {
            transition: self.state.async_error.take(),
            ..ShutdownError::default()
        };

        if let Some(mut scene) = self.active.take_scene() {
            report.active = scene.destroy(&self.settings).err();
        }
        if let Some(mut scene) = self.standby.take() {
            report.standby = scene.destroy(&self.settings).err();
        }

        if report.is_empty() {
            info!(target: "host", "Shutdown complete");
        } else {
            error!(target: "host", "Shutdown finished with errors (code {})", report.code());
        }
        report.into_result().map_err(HostError::from)
    }

    //=== Transitions =====================================================

    /// Blocks until an in-flight transition finishes and applies its
    /// outcome. Returns immediately when none is running.
    pub fn await_transition(&mut self) {
        if let Some(transition) = self.active.take_transition() {
            let outcome = transition.wait();
            self.apply_outcome(outcome);
        }
    }

    fn observe_transition(&mut self) {
        let ActiveSlot::Transitioning(transition) = &mut self.active else {
            return;
        };
        if let Some(outcome) = transition.poll() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: TransitionOutcome) {
        match outcome {
            TransitionOutcome::Completed(scene) => {
                info!(target: "host", "{} is now active", scene.name());
                self.active = ActiveSlot::Live(scene);
            }
            TransitionOutcome::Failed(error) => {
                warn!(target: "host", "Transition failed, continuing on standby: {}", error);
                self.active = ActiveSlot::Vacant;
                self.state.async_error = Some(error);
            }
        }
    }

    fn begin_transition(active: &mut ActiveSlot, next: Box<dyn Scene>, settings: &Arc<HostSettings>) {
        let outgoing = active.take_scene();
        *active = ActiveSlot::Transitioning(Transition::spawn(outgoing, next, Arc::clone(settings)));
    }

    //=== Accessors =======================================================

    pub fn settings(&self) -> &HostSettings {
        &self.settings
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.active, ActiveSlot::Transitioning(_))
    }

    pub fn exit_requested(&self) -> bool {
        self.state.exit_requested
    }

    pub fn request_exit(&mut self) {
        self.state.exit_requested = true;
    }

    /// Duration of the last completed frame.
    pub fn elapsed(&self) -> Duration {
        self.state.elapsed
    }

    /// Number of frames presented so far.
    pub fn frames(&self) -> u64 {
        self.state.frames
    }

    /// Name of the live active scene, if any.
    pub fn active_scene(&self) -> Option<&str> {
        match &self.active {
            ActiveSlot::Live(scene) => Some(scene.name()),
            _ => None,
        }
    }

    pub fn standby_scene(&self) -> Option<&str> {
        self.standby.as_ref().map(HostedScene::name)
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    fn is_shut_down(&self) -> bool {
        self.standby.is_none() && matches!(self.active, ActiveSlot::Vacant)
    }
}

impl<E: EventSource, R: RenderSurface> Drop for SceneHost<E, R> {
    fn drop(&mut self) {
        if self.is_shut_down() {
            return;
        }
        warn!(target: "host", "Host dropped without shutdown, tearing down now");
        if let Err(error) = self.shutdown() {
            error!(target: "host", "Teardown on drop failed: {}", error);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::SceneError;
    use crate::core::input::KeyCode;
    use crate::core::platform_bridge::{Color, DrawCommand};
    use crate::core::error::SceneResult;
    use crossbeam_channel::{bounded, Receiver, Sender};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    //=====================================================================
    // Test Fakes
    //=====================================================================

    type Journal = Arc<Mutex<Vec<String>>>;

    fn entries(journal: &Journal) -> Vec<String> {
        journal.lock().unwrap().clone()
    }

    fn clear(journal: &Journal) {
        journal.lock().unwrap().clear();
    }

    #[derive(Default)]
    struct ScriptedEvents {
        queue: VecDeque<PlatformEvent>,
    }

    impl ScriptedEvents {
        fn push(&mut self, event: PlatformEvent) {
            self.queue.push_back(event);
        }
    }

    impl EventSource for ScriptedEvents {
        fn poll_event(&mut self) -> Option<PlatformEvent> {
            self.queue.pop_front()
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        presents: usize,
        submitted: Vec<DrawCommand>,
    }

    impl RenderSurface for RecordingSurface {
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
        }

        fn submit(&mut self, command: DrawCommand) {
            self.submitted.push(command);
        }

        fn present(&mut self) {
            self.presents += 1;
        }
    }

    /// Scene that journals every call as `"<name>.<phase>"`.
    struct Probe {
        name: &'static str,
        journal: Journal,
        load_result: SceneResult,
        destroy_result: SceneResult,
        poll_result: SceneResult,
        update_result: SceneResult,
        draw_result: SceneResult,
        panic_on_load: bool,
        load_gate: Option<Receiver<()>>,
        successor: Option<Box<dyn Scene>>,
        exit_on_update: bool,
    }

    impl Probe {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: Arc::clone(journal),
                load_result: Ok(()),
                destroy_result: Ok(()),
                poll_result: Ok(()),
                update_result: Ok(()),
                draw_result: Ok(()),
                panic_on_load: false,
                load_gate: None,
                successor: None,
                exit_on_update: false,
            }
        }

        fn then(mut self, successor: Probe) -> Self {
            self.successor = Some(Box::new(successor));
            self
        }

        fn gated(mut self, gate: Receiver<()>) -> Self {
            self.load_gate = Some(gate);
            self
        }

        fn record(&self, phase: &str) {
            self.journal.lock().unwrap().push(format!("{}.{}", self.name, phase));
        }
    }

    impl Scene for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn load(&mut self, _settings: &HostSettings) -> SceneResult {
            if let Some(gate) = &self.load_gate {
                let _ = gate.recv();
            }
            if self.panic_on_load {
                panic!("{} failed to load", self.name);
            }
            self.record("load");
            self.load_result
        }

        fn poll_event(&mut self, _ctx: &mut FrameContext<'_>, _event: &PlatformEvent) -> SceneResult {
            self.record("event");
            self.poll_result
        }

        fn update(&mut self, ctx: &mut FrameContext<'_>) -> UpdateResult {
            self.record("update");
            if self.exit_on_update {
                ctx.request_exit();
            }
            UpdateResult {
                status: self.update_result,
                next: self.successor.take(),
            }
        }

        fn draw(&mut self, _ctx: &FrameContext<'_>, _surface: &mut dyn RenderSurface) -> SceneResult {
            self.record("draw");
            self.draw_result
        }

        fn destroy(&mut self, _settings: &HostSettings) -> SceneResult {
            self.record("destroy");
            self.destroy_result
        }
    }

    /// Hands out pre-built probes once.
    struct Factory {
        active: Mutex<Option<Probe>>,
        standby: Mutex<Option<Probe>>,
    }

    impl Factory {
        fn new(active: Probe, standby: Probe) -> Self {
            Self {
                active: Mutex::new(Some(active)),
                standby: Mutex::new(Some(standby)),
            }
        }
    }

    impl SceneFactory for Factory {
        fn initial_active(&self) -> Box<dyn Scene> {
            Box::new(self.active.lock().unwrap().take().unwrap())
        }

        fn initial_standby(&self) -> Box<dyn Scene> {
            Box::new(self.standby.lock().unwrap().take().unwrap())
        }
    }

    type TestHost = SceneHost<ScriptedEvents, RecordingSurface>;

    fn start(active: Probe, standby: Probe) -> Result<TestHost, HostError> {
        SceneHost::start(
            HostSettings::default(),
            &Factory::new(active, standby),
            ScriptedEvents::default(),
            RecordingSurface::default(),
        )
    }

    fn gate() -> (Sender<()>, Receiver<()>) {
        bounded(1)
    }

    fn draws(journal: &Journal) -> Vec<String> {
        entries(journal)
            .into_iter()
            .filter(|entry| entry.ends_with(".draw"))
            .collect()
    }

    //=====================================================================
    // Startup
    //=====================================================================

    #[test]
    fn start_loads_active_then_standby() {
        let journal = Journal::default();
        let host = start(Probe::new("a", &journal), Probe::new("b", &journal)).unwrap();

        assert_eq!(entries(&journal), ["a.load", "b.load"]);
        assert_eq!(host.active_scene(), Some("a"));
        assert_eq!(host.standby_scene(), Some("b"));
        assert_eq!(host.frames(), 0);
    }

    #[test]
    fn start_failure_makes_no_further_calls() {
        let journal = Journal::default();
        let mut standby = Probe::new("b", &journal);
        standby.load_result = Err(SceneError::GENERIC);

        let result = start(Probe::new("a", &journal), standby);

        assert!(matches!(
            result,
            Err(HostError::Scene {
                role: SceneRole::Standby,
                phase: ScenePhase::Load,
                ..
            })
        ));
        assert_eq!(entries(&journal), ["a.load", "b.load"]);
    }

    //=====================================================================
    // Frame Loop
    //=====================================================================

    #[test]
    fn frame_runs_phases_in_order() {
        let journal = Journal::default();
        let mut host = start(Probe::new("a", &journal), Probe::new("b", &journal)).unwrap();
        clear(&journal);

        host.events_mut().push(PlatformEvent::KeyPressed(KeyCode::Enter));
        host.events_mut().push(PlatformEvent::Other);
        host.run_frame().unwrap();

        assert_eq!(entries(&journal), ["a.event", "a.event", "a.update", "a.draw"]);
        assert_eq!(host.surface().clears, 1);
        assert_eq!(host.surface().presents, 1);
        assert_eq!(host.frames(), 1);
    }

    #[test]
    fn close_request_is_not_forwarded() {
        let journal = Journal::default();
        let mut host = start(Probe::new("a", &journal), Probe::new("b", &journal)).unwrap();
        clear(&journal);

        host.events_mut().push(PlatformEvent::CloseRequested);
        host.run_frame().unwrap();

        assert!(host.exit_requested());
        assert_eq!(entries(&journal), ["a.update", "a.draw"]);
    }

    #[test]
    fn poll_event_failure_aborts_frame() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal);
        active.poll_result = Err(SceneError::GENERIC);
        let mut host = start(active, Probe::new("b", &journal)).unwrap();
        clear(&journal);

        host.events_mut().push(PlatformEvent::Other);
        host.events_mut().push(PlatformEvent::Other);
        let error = host.run_frame().unwrap_err();

        assert_eq!(
            error,
            HostError::Scene {
                role: SceneRole::Active,
                phase: ScenePhase::PollEvent,
                source: SceneError::GENERIC,
            }
        );
        assert_eq!(entries(&journal), ["a.event"]);
        assert_eq!(host.surface().clears, 0);
        assert_eq!(host.surface().presents, 0);
    }

    #[test]
    fn update_failure_skips_draw() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal);
        active.update_result = Err(SceneError::GENERIC);
        let mut host = start(active, Probe::new("b", &journal)).unwrap();
        clear(&journal);

        let error = host.run_frame().unwrap_err();

        assert_eq!(error.code(), 1);
        assert_eq!(entries(&journal), ["a.update"]);
        assert_eq!(host.surface().presents, 0);
    }

    #[test]
    fn draw_failure_skips_present() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal);
        active.draw_result = SceneError::check(7);
        let mut host = start(active, Probe::new("b", &journal)).unwrap();
        clear(&journal);

        let error = host.run_frame().unwrap_err();

        assert_eq!(
            error,
            HostError::Scene {
                role: SceneRole::Active,
                phase: ScenePhase::Draw,
                source: SceneError::new(7).unwrap(),
            }
        );
        assert_eq!(entries(&journal), ["a.update", "a.draw"]);
        assert_eq!(host.surface().clears, 1);
        assert_eq!(host.surface().presents, 0);
        assert_eq!(host.frames(), 0);
    }

    //=====================================================================
    // Transitions
    //=====================================================================

    #[test]
    fn standby_covers_while_successor_loads() {
        let journal = Journal::default();
        let (open, gate_rx) = gate();
        let successor = Probe::new("c", &journal).gated(gate_rx);
        let mut host = start(Probe::new("a", &journal).then(successor), Probe::new("b", &journal)).unwrap();

        // Frame 1: a draws and requests c.
        host.run_frame().unwrap();
        assert!(host.is_transitioning());

        // Frame 2: c is still blocked in load, so b draws.
        host.run_frame().unwrap();
        assert!(host.is_transitioning());

        open.send(()).unwrap();
        host.await_transition();
        assert_eq!(host.active_scene(), Some("c"));

        // Frame 3: c draws.
        host.run_frame().unwrap();

        assert_eq!(draws(&journal), ["a.draw", "b.draw", "c.draw"]);
        let log = entries(&journal);
        let destroy = log.iter().position(|e| e == "a.destroy").unwrap();
        let load = log.iter().position(|e| e == "c.load").unwrap();
        assert!(destroy < load);
    }

    #[test]
    fn successor_from_standby_is_dropped() {
        let journal = Journal::default();
        let (open, gate_rx) = gate();
        let successor = Probe::new("c", &journal).gated(gate_rx);
        let standby = Probe::new("b", &journal).then(Probe::new("x", &journal));
        let mut host = start(Probe::new("a", &journal).then(successor), standby).unwrap();

        host.run_frame().unwrap();
        host.run_frame().unwrap();

        open.send(()).unwrap();
        host.await_transition();
        host.run_frame().unwrap();
        host.shutdown().unwrap();

        assert!(!entries(&journal).iter().any(|e| e.starts_with("x.")));
    }

    #[test]
    fn events_go_to_standby_while_transitioning() {
        let journal = Journal::default();
        let (open, gate_rx) = gate();
        let successor = Probe::new("c", &journal).gated(gate_rx);
        let mut host = start(Probe::new("a", &journal).then(successor), Probe::new("b", &journal)).unwrap();

        host.run_frame().unwrap();
        assert!(host.is_transitioning());

        host.events_mut().push(PlatformEvent::KeyPressed(KeyCode::Space));
        host.events_mut().push(PlatformEvent::KeyReleased(KeyCode::Space));
        host.run_frame().unwrap();

        let delivered: Vec<String> = entries(&journal)
            .into_iter()
            .filter(|entry| entry.ends_with(".event"))
            .collect();
        assert_eq!(delivered, ["b.event", "b.event"]);

        open.send(()).unwrap();
        host.await_transition();
    }

    #[test]
    fn pending_failure_wins_over_new_successor() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal).then(Probe::new("c", &journal));
        active.destroy_result = Err(SceneError::GENERIC);
        let standby = Probe::new("b", &journal).then(Probe::new("x", &journal));
        let mut host = start(active, standby).unwrap();

        host.run_frame().unwrap();
        host.await_transition();

        // b asks for x in the same frame the destroy failure is observed.
        let error = host.run_frame().unwrap_err();

        assert_eq!(error, HostError::Transition(TransitionError::Destroy(SceneError::GENERIC)));
        assert!(!host.is_transitioning());
        assert_eq!(host.active_scene(), None);
        assert!(entries(&journal).contains(&"b.update".to_string()));
        assert!(!entries(&journal).iter().any(|e| e.starts_with("x.")));
    }

    #[test]
    fn worker_panic_surfaces_next_frame() {
        let journal = Journal::default();
        let mut successor = Probe::new("c", &journal);
        successor.panic_on_load = true;
        let mut host = start(Probe::new("a", &journal).then(successor), Probe::new("b", &journal)).unwrap();

        host.run_frame().unwrap();
        host.await_transition();
        assert!(!host.is_transitioning());

        let error = host.run_frame().unwrap_err();

        assert_eq!(error, HostError::Transition(TransitionError::WorkerPanicked));
        assert_eq!(error.code(), TransitionError::WORKER_PANIC_CODE);
        assert_eq!(draws(&journal), ["a.draw", "b.draw"]);

        clear(&journal);
        host.shutdown().unwrap();
        assert_eq!(entries(&journal), ["b.destroy"]);
    }

    #[test]
    fn destroy_failure_surfaces_next_frame() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal).then(Probe::new("c", &journal));
        active.destroy_result = Err(SceneError::GENERIC);
        let mut host = start(active, Probe::new("b", &journal)).unwrap();

        host.run_frame().unwrap();
        host.await_transition();
        assert!(!host.is_transitioning());
        assert_eq!(host.active_scene(), None);

        let error = host.run_frame().unwrap_err();
        assert_eq!(error, HostError::Transition(TransitionError::Destroy(SceneError::GENERIC)));

        // The failing frame still ran on standby, and c was never loaded.
        assert_eq!(draws(&journal), ["a.draw", "b.draw"]);
        assert!(!entries(&journal).contains(&"c.load".to_string()));

        // Shutdown only has standby left to destroy.
        clear(&journal);
        host.shutdown().unwrap();
        assert_eq!(entries(&journal), ["b.destroy"]);
    }

    #[test]
    fn load_failure_surfaces_next_frame() {
        let journal = Journal::default();
        let mut successor = Probe::new("c", &journal);
        successor.load_result = Err(SceneError::GENERIC);
        let mut host = start(Probe::new("a", &journal).then(successor), Probe::new("b", &journal)).unwrap();

        host.run_frame().unwrap();
        host.await_transition();

        let error = host.run_frame().unwrap_err();
        assert_eq!(error, HostError::Transition(TransitionError::Load(SceneError::GENERIC)));

        clear(&journal);
        host.shutdown().unwrap();
        assert_eq!(entries(&journal), ["b.destroy"]);
    }

    //=====================================================================
    // Shutdown
    //=====================================================================

    #[test]
    fn shutdown_destroys_active_then_standby_once() {
        let journal = Journal::default();
        let mut host = start(Probe::new("a", &journal), Probe::new("b", &journal)).unwrap();
        clear(&journal);

        host.shutdown().unwrap();
        host.shutdown().unwrap();

        assert_eq!(entries(&journal), ["a.destroy", "b.destroy"]);
        assert_eq!(host.run_frame(), Err(HostError::Stopped));
    }

    #[test]
    fn shutdown_accumulates_errors() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal);
        active.destroy_result = Err(SceneError::GENERIC);
        let mut standby = Probe::new("b", &journal);
        standby.destroy_result = Err(SceneError::LIFECYCLE);
        let mut host = start(active, standby).unwrap();
        clear(&journal);

        let error = host.shutdown().unwrap_err();

        assert_eq!(entries(&journal), ["a.destroy", "b.destroy"]);
        assert_eq!(error.code(), 3);
        match error {
            HostError::Shutdown(report) => {
                assert_eq!(report.active, Some(SceneError::GENERIC));
                assert_eq!(report.standby, Some(SceneError::LIFECYCLE));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shutdown_drains_in_flight_transition() {
        let journal = Journal::default();
        let (open, gate_rx) = gate();
        let successor = Probe::new("c", &journal).gated(gate_rx);
        let mut host = start(Probe::new("a", &journal).then(successor), Probe::new("b", &journal)).unwrap();

        host.run_frame().unwrap();
        assert!(host.is_transitioning());

        open.send(()).unwrap();
        host.shutdown().unwrap();

        let log = entries(&journal);
        assert_eq!(log.iter().filter(|e| e.ends_with(".destroy")).count(), 3);
        assert_eq!(&log[log.len() - 2..], ["c.destroy", "b.destroy"]);
    }

    #[test]
    fn drop_tears_down_unshut_host() {
        let journal = Journal::default();
        let host = start(Probe::new("a", &journal), Probe::new("b", &journal)).unwrap();
        clear(&journal);

        drop(host);

        assert_eq!(entries(&journal), ["a.destroy", "b.destroy"]);
    }

    //=====================================================================
    // Run
    //=====================================================================

    #[test]
    fn run_stops_on_exit_request_and_shuts_down() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal);
        active.exit_on_update = true;
        let host = start(active, Probe::new("b", &journal)).unwrap();

        host.run().unwrap();

        let log = entries(&journal);
        assert_eq!(log.iter().filter(|e| e.as_str() == "a.update").count(), 1);
        assert_eq!(&log[log.len() - 2..], ["a.destroy", "b.destroy"]);
    }

    #[test]
    fn run_prefers_frame_error_over_shutdown_error() {
        let journal = Journal::default();
        let mut active = Probe::new("a", &journal);
        active.update_result = Err(SceneError::GENERIC);
        active.destroy_result = Err(SceneError::LIFECYCLE);
        let host = start(active, Probe::new("b", &journal)).unwrap();

        let error = host.run().unwrap_err();

        assert_eq!(
            error,
            HostError::Scene {
                role: SceneRole::Active,
                phase: ScenePhase::Update,
                source: SceneError::GENERIC,
            }
        );
        let log = entries(&journal);
        assert_eq!(&log[log.len() - 2..], ["a.destroy", "b.destroy"]);
    }
}
