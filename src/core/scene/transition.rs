//=========================================================================
// Scene Transition Worker
//=========================================================================
//
// Runs "destroy outgoing, then load successor" on a background thread so
// the foreground loop keeps presenting frames with the standby scene.
//
// Architecture:
// ```text
//   SceneHost ──spawn(outgoing, successor)──> worker thread
//       │                                         │ destroy outgoing
//       │                                         │ load successor
//       │<──────── bounded(1) TransitionOutcome ──┘
//       │
//       └─ poll() each frame / wait() on shutdown
// ```
//
// The worker owns both scenes for the whole job. Nothing else can touch
// them until the outcome has been handed back, so the scene objects need
// no locking.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::{HostedScene, Scene};
use crate::core::error::TransitionError;
use crate::core::host::HostSettings;

//=== TransitionOutcome ===================================================

/// Result of a finished transition job.
pub(crate) enum TransitionOutcome {
    /// The successor loaded and is ready to become active.
    Completed(HostedScene),

    /// The job failed. Both scenes it owned have been dropped.
    Failed(TransitionError),
}

//=== Transition ==========================================================

/// Handle to an in-flight transition job.
pub(crate) struct Transition {
    successor: String,
    outcome: Receiver<TransitionOutcome>,
    worker: Option<JoinHandle<()>>,
}

impl Transition {
    /// Starts the job. `outgoing` is `None` when there is no live active
    /// scene to destroy.
    pub(crate) fn spawn(outgoing: Option<HostedScene>, successor: Box<dyn Scene>, settings: Arc<HostSettings>) -> Self {
        let name = successor.name().to_string();
        info!(
            target: "host::transition",
            "Transition {} -> {} started",
            outgoing.as_ref().map_or("<none>", HostedScene::name),
            name
        );

        let (sender, outcome) = bounded(1);
        let worker = thread::spawn(move || {
            let result = run_job(outgoing, successor, &settings);
            if sender.send(result).is_err() {
                warn!(target: "host::transition", "Host went away before the transition finished");
            }
        });

        Self {
            successor: name,
            outcome,
            worker: Some(worker),
        }
    }

    pub(crate) fn successor(&self) -> &str {
        &self.successor
    }

    /// Non-blocking check for the outcome.
    pub(crate) fn poll(&mut self) -> Option<TransitionOutcome> {
        match self.outcome.try_recv() {
            Ok(outcome) => {
                self.join();
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.join();
                Some(TransitionOutcome::Failed(TransitionError::WorkerPanicked))
            }
        }
    }

    /// Blocks until the job finishes.
    pub(crate) fn wait(mut self) -> TransitionOutcome {
        debug!(target: "host::transition", "Waiting for transition to {}", self.successor);
        let outcome = self
            .outcome
            .recv()
            .unwrap_or(TransitionOutcome::Failed(TransitionError::WorkerPanicked));
        self.join();
        outcome
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!(target: "host::transition", "Transition worker for {} panicked", self.successor);
            }
        }
    }
}

impl Drop for Transition {
    fn drop(&mut self) {
        self.join();
    }
}

//=== Worker Job ==========================================================

fn run_job(outgoing: Option<HostedScene>, successor: Box<dyn Scene>, settings: &HostSettings) -> TransitionOutcome {
    if let Some(mut outgoing) = outgoing {
        if let Err(code) = outgoing.destroy(settings) {
            error!(
                target: "host::transition",
                "Destroy of {} failed with code {}; {} will not be loaded",
                outgoing.name(),
                code,
                successor.name()
            );
            return TransitionOutcome::Failed(TransitionError::Destroy(code));
        }
    }

    let mut incoming = HostedScene::new(successor);
    match incoming.load(settings) {
        Ok(()) => {
            info!(target: "host::transition", "Transition to {} complete", incoming.name());
            TransitionOutcome::Completed(incoming)
        }
        Err(code) => {
            error!(target: "host::transition", "Load of {} failed with code {}", incoming.name(), code);
            TransitionOutcome::Failed(TransitionError::Load(code))
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{SceneError, SceneResult};
    use crate::core::platform_bridge::RenderSurface;
    use crate::core::scene::{FrameContext, LifecycleState, UpdateResult};
    use crossbeam_channel::Sender;
    use std::sync::Mutex;
    use std::time::Duration;

    //--- Test Helpers -----------------------------------------------------

    type Journal = Arc<Mutex<Vec<String>>>;

    struct Step {
        name: &'static str,
        journal: Journal,
        load_result: SceneResult,
        destroy_result: SceneResult,
        gate: Option<Receiver<()>>,
        panic_on_load: bool,
    }

    impl Step {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: Arc::clone(journal),
                load_result: Ok(()),
                destroy_result: Ok(()),
                gate: None,
                panic_on_load: false,
            }
        }
    }

    impl Scene for Step {
        fn name(&self) -> &str {
            self.name
        }

        fn load(&mut self, _settings: &HostSettings) -> SceneResult {
            if let Some(gate) = &self.gate {
                let _ = gate.recv();
            }
            if self.panic_on_load {
                panic!("load exploded");
            }
            self.journal.lock().unwrap().push(format!("{}.load", self.name));
            self.load_result
        }

        fn update(&mut self, _ctx: &mut FrameContext<'_>) -> UpdateResult {
            UpdateResult::ok()
        }

        fn draw(&mut self, _ctx: &FrameContext<'_>, _surface: &mut dyn RenderSurface) -> SceneResult {
            Ok(())
        }

        fn destroy(&mut self, _settings: &HostSettings) -> SceneResult {
            self.journal.lock().unwrap().push(format!("{}.destroy", self.name));
            self.destroy_result
        }
    }

    fn loaded(step: Step) -> HostedScene {
        let mut scene = HostedScene::new(Box::new(step));
        scene.load(&HostSettings::default()).unwrap();
        scene
    }

    fn entries(journal: &Journal) -> Vec<String> {
        journal.lock().unwrap().clone()
    }

    fn gate() -> (Sender<()>, Receiver<()>) {
        bounded(1)
    }

    //=====================================================================
    // Tests
    //=====================================================================

    #[test]
    fn destroys_then_loads() {
        let journal = Journal::default();
        let outgoing = loaded(Step::new("a", &journal));
        let successor = Box::new(Step::new("c", &journal));

        let transition = Transition::spawn(Some(outgoing), successor, Arc::new(HostSettings::default()));
        assert_eq!(transition.successor(), "c");

        match transition.wait() {
            TransitionOutcome::Completed(scene) => {
                assert_eq!(scene.name(), "c");
                assert_eq!(scene.state(), LifecycleState::Loaded);
            }
            TransitionOutcome::Failed(error) => panic!("unexpected failure: {error}"),
        }
        assert_eq!(entries(&journal), ["a.load", "a.destroy", "c.load"]);
    }

    #[test]
    fn destroy_failure_skips_load() {
        let journal = Journal::default();
        let mut step = Step::new("a", &journal);
        step.destroy_result = Err(SceneError::GENERIC);
        let outgoing = loaded(step);

        let transition = Transition::spawn(
            Some(outgoing),
            Box::new(Step::new("c", &journal)),
            Arc::new(HostSettings::default()),
        );

        assert!(matches!(
            transition.wait(),
            TransitionOutcome::Failed(TransitionError::Destroy(code)) if code == SceneError::GENERIC
        ));
        assert_eq!(entries(&journal), ["a.load", "a.destroy"]);
    }

    #[test]
    fn load_failure_is_reported() {
        let journal = Journal::default();
        let mut successor = Step::new("c", &journal);
        successor.load_result = Err(SceneError::GENERIC);

        let transition = Transition::spawn(None, Box::new(successor), Arc::new(HostSettings::default()));

        assert!(matches!(
            transition.wait(),
            TransitionOutcome::Failed(TransitionError::Load(_))
        ));
    }

    #[test]
    fn poll_is_empty_until_the_job_finishes() {
        let journal = Journal::default();
        let (open, gate_rx) = gate();
        let mut successor = Step::new("c", &journal);
        successor.gate = Some(gate_rx);

        let mut transition = Transition::spawn(None, Box::new(successor), Arc::new(HostSettings::default()));
        assert!(transition.poll().is_none());

        open.send(()).unwrap();
        let outcome = loop {
            if let Some(outcome) = transition.poll() {
                break outcome;
            }
            thread::sleep(Duration::from_millis(1));
        };
        assert!(matches!(outcome, TransitionOutcome::Completed(_)));
    }

    #[test]
    fn worker_panic_is_reported() {
        let journal = Journal::default();
        let mut successor = Step::new("c", &journal);
        successor.panic_on_load = true;

        let transition = Transition::spawn(None, Box::new(successor), Arc::new(HostSettings::default()));

        assert!(matches!(
            transition.wait(),
            TransitionOutcome::Failed(TransitionError::WorkerPanicked)
        ));
    }
}
