//=========================================================================
// Court Scene
//=========================================================================
//
// Paddle-and-ball court driven by the KeyState tracker.
//
// Controls:
//   Left / Right   accelerate the paddle (while held)
//   Enter          toggle pause (on release)
//   Escape         game over, then exit (on release)
//   R              request a fresh court through a scene transition
//
// States:
// ```text
//   Playing ──Enter──> Paused ──Enter──> Playing
//      │                  │
//      └──Escape──> GameOver <──Escape──┘   (requests exit)
// ```
//
// Draw set: {ball, paddle} while Playing or Paused, nothing on GameOver.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::Duration;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::error::{KeyTrackerError, SceneError, SceneResult};
use crate::core::host::HostSettings;
use crate::core::input::{KeyCode, KeyState, KeyStateTracker};
use crate::core::platform_bridge::{Color, DrawCommand, PlatformEvent, RenderSurface};
use crate::core::scene::{FrameContext, Scene, UpdateResult};

//=== Tunables ============================================================

const DEFAULT_PADDLE_ACCEL: f32 = 40.0;
const DEFAULT_FRICTION: f32 = 0.1;
const BALL_SPEED: f32 = 240.0;

const PADDLE_SIZE: (f32, f32) = (120.0, 16.0);
const BALL_SIZE: f32 = 16.0;

//=== Body ================================================================

/// Axis-aligned rectangle with velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Body {
    /// Per-frame integration: `acc -= friction * vel; vel += acc; pos += vel * dt`.
    pub fn integrate(&mut self, ax: f32, ay: f32, friction: f32, dt: f32) {
        let ax = ax - friction * self.vx;
        let ay = ay - friction * self.vy;
        self.vx += ax;
        self.vy += ay;
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    /// Keeps the body inside `width` x `height`, reflecting velocity off
    /// the walls it hits.
    fn bounce_within(&mut self, width: f32, height: f32) {
        if self.x < 0.0 {
            self.x = 0.0;
            self.vx = self.vx.abs();
        } else if self.x + self.width > width {
            self.x = width - self.width;
            self.vx = -self.vx.abs();
        }

        if self.y < 0.0 {
            self.y = 0.0;
            self.vy = self.vy.abs();
        } else if self.y + self.height > height {
            self.y = height - self.height;
            self.vy = -self.vy.abs();
        }
    }

    fn overlaps(&self, other: &Body) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    fn command(&self) -> DrawCommand {
        DrawCommand::Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            color: self.color,
        }
    }
}

//=== CourtState ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourtState {
    Playing,
    Paused,
    GameOver,
}

//=== Court ===============================================================

/// The playable scene.
pub struct Court {
    round: u32,
    keys: Option<KeyStateTracker>,
    state: CourtState,
    paddle: Body,
    ball: Body,
    bounds: (f32, f32),
    paddle_accel: f32,
    friction: f32,
}

impl Court {
    pub const KEYS: [KeyCode; 5] = [
        KeyCode::Escape,
        KeyCode::Enter,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::KeyR,
    ];

    pub fn new() -> Self {
        Self::round(1)
    }

    /// A court for the given round number (shown in logs only).
    pub fn round(round: u32) -> Self {
        let bounds = (800.0, 600.0);
        Self {
            round,
            keys: None,
            state: CourtState::Playing,
            paddle: Self::paddle_for(bounds),
            ball: Self::ball_for(bounds),
            bounds,
            paddle_accel: DEFAULT_PADDLE_ACCEL,
            friction: DEFAULT_FRICTION,
        }
    }

    pub fn state(&self) -> CourtState {
        self.state
    }

    pub fn paddle(&self) -> &Body {
        &self.paddle
    }

    pub fn ball(&self) -> &Body {
        &self.ball
    }

    /// Bodies drawn in the current state.
    pub fn draw_set(&self) -> Vec<&Body> {
        match self.state {
            CourtState::Playing | CourtState::Paused => vec![&self.ball, &self.paddle],
            CourtState::GameOver => Vec::new(),
        }
    }

    //--- Layout -----------------------------------------------------------

    fn paddle_for((width, height): (f32, f32)) -> Body {
        let (w, h) = PADDLE_SIZE;
        Body {
            x: (width - w) / 2.0,
            y: height - h - 24.0,
            vx: 0.0,
            vy: 0.0,
            width: w,
            height: h,
            color: Color::YELLOW,
        }
    }

    fn ball_for((width, height): (f32, f32)) -> Body {
        Body {
            x: (width - BALL_SIZE) / 2.0,
            y: height / 3.0,
            vx: BALL_SPEED,
            vy: BALL_SPEED,
            width: BALL_SIZE,
            height: BALL_SIZE,
            color: Color::WHITE,
        }
    }

    //--- State Handling ---------------------------------------------------

    fn pause(&mut self) {
        self.paddle.color = Color::BLUE;
        self.ball.color = Color::MAGENTA;
        self.state = CourtState::Paused;
    }

    fn resume(&mut self) {
        self.paddle.color = Color::YELLOW;
        self.ball.color = Color::WHITE;
        self.state = CourtState::Playing;
    }

    fn step_physics(&mut self, accel: f32, dt: f32) {
        let (width, height) = self.bounds;

        self.paddle.integrate(accel, 0.0, self.friction, dt);
        self.paddle.bounce_within(width, height);

        self.ball.integrate(0.0, 0.0, 0.0, dt);
        self.ball.bounce_within(width, height);

        if self.ball.vy > 0.0 && self.ball.overlaps(&self.paddle) {
            self.ball.y = self.paddle.y - self.ball.height;
            self.ball.vy = -self.ball.vy;
        }
    }
}

impl Default for Court {
    fn default() -> Self {
        Self::new()
    }
}

//=== Scene Implementation ================================================

impl Scene for Court {
    fn name(&self) -> &str {
        "court"
    }

    fn load(&mut self, settings: &HostSettings) -> SceneResult {
        let delay = settings.tunables.get_or("load_delay_ms", 0u64);
        if delay > 0 {
            debug!(target: "scenes", "Court round {} simulating {}ms load", self.round, delay);
            thread::sleep(Duration::from_millis(delay));
        }

        self.bounds = (settings.width as f32, settings.height as f32);
        self.paddle = Self::paddle_for(self.bounds);
        self.ball = Self::ball_for(self.bounds);
        self.paddle_accel = settings.tunables.get_or("paddle_accel", DEFAULT_PADDLE_ACCEL);
        self.friction = settings.tunables.get_or("friction", DEFAULT_FRICTION);
        self.keys = Some(KeyStateTracker::new(Self::KEYS));

        info!(target: "scenes", "Court round {} loaded", self.round);
        Ok(())
    }

    fn poll_event(&mut self, _ctx: &mut FrameContext<'_>, event: &PlatformEvent) -> SceneResult {
        let keys = self.keys.as_mut().ok_or(SceneError::LIFECYCLE)?;
        match keys.handle_event(event) {
            Ok(_) | Err(KeyTrackerError::UnknownKey(_)) => Ok(()),
            Err(error) => Err(SceneError::new(error.code()).unwrap_or(SceneError::GENERIC)),
        }
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) -> UpdateResult {
        let Some(keys) = self.keys.as_mut() else {
            return UpdateResult::failed(SceneError::LIFECYCLE);
        };

        let escape = keys.view_key(KeyCode::Escape) == KeyState::JustReleased;
        let enter = keys.view_key(KeyCode::Enter) == KeyState::JustReleased;
        let restart = keys.view_key(KeyCode::KeyR) == KeyState::JustReleased;
        let left = keys.view_key(KeyCode::ArrowLeft).is_down();
        let right = keys.view_key(KeyCode::ArrowRight).is_down();
        keys.frame_end();

        if escape {
            self.state = CourtState::GameOver;
        }

        let mut accel = 0.0;
        match self.state {
            CourtState::Playing => {
                if enter {
                    self.pause();
                } else if left {
                    accel = -self.paddle_accel;
                } else if right {
                    accel = self.paddle_accel;
                }
            }
            CourtState::Paused => {
                if enter {
                    self.resume();
                }
            }
            CourtState::GameOver => ctx.request_exit(),
        }

        if self.state == CourtState::Playing {
            self.step_physics(accel, ctx.delta().as_secs_f32());
        }

        if restart && self.state != CourtState::GameOver {
            info!(target: "scenes", "Restart requested after round {}", self.round);
            return UpdateResult::transition_to(Court::round(self.round + 1));
        }
        UpdateResult::ok()
    }

    fn draw(&mut self, _ctx: &FrameContext<'_>, surface: &mut dyn RenderSurface) -> SceneResult {
        for body in self.draw_set() {
            surface.submit(body.command());
        }
        Ok(())
    }

    fn destroy(&mut self, _settings: &HostSettings) -> SceneResult {
        self.keys = None;
        debug!(target: "scenes", "Court round {} destroyed", self.round);
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
