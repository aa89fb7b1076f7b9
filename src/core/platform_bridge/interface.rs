//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contracts between the scene host and its external collaborators.
//
//   EventSource    produces raw platform events, polled until empty
//   RenderSurface  opaque sink for clear / draw submissions / present
//
// The host never inspects pixels and never talks to the window system
// directly; swapping Winit for another backend only touches `platform`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;

//=== PlatformEvent =======================================================

/// A discrete event produced by the platform for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformEvent {
    /// The user or OS asked to close the window.
    ///
    /// Handled by the host itself; never forwarded to scenes.
    CloseRequested,

    /// A physical key went down.
    KeyPressed(KeyCode),

    /// A physical key went up.
    KeyReleased(KeyCode),

    /// Any other window event (resize, focus change, ...).
    Other,
}

impl PlatformEvent {
    /// Returns the key code and press state for keyboard events.
    pub fn key(&self) -> Option<(KeyCode, bool)> {
        match *self {
            Self::KeyPressed(code) => Some((code, true)),
            Self::KeyReleased(code) => Some((code, false)),
            _ => None,
        }
    }
}

//=== EventSource =========================================================

/// Producer of raw platform events.
///
/// The host calls [`poll_event`](Self::poll_event) repeatedly at the start
/// of every frame until it returns `None`.
pub trait EventSource {
    /// Returns the next pending event, or `None` once the queue is empty.
    fn poll_event(&mut self) -> Option<PlatformEvent>;
}

//=== Drawing =============================================================

/// RGBA colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(serde::Deserialize, serde::Serialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A single draw submission. Opaque to the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned filled rectangle in surface pixels (top-left origin).
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
}

//=== RenderSurface =======================================================

/// Render target owned by the host and touched only by the foreground loop.
///
/// Scenes reach it exclusively through [`crate::core::scene::Scene::draw`].
pub trait RenderSurface {
    /// Starts a new frame, discarding previous submissions.
    fn clear(&mut self, color: Color);

    /// Queues a draw submission for the current frame.
    fn submit(&mut self, command: DrawCommand);

    /// Finishes the frame. Implementations may block to honour frame pacing.
    fn present(&mut self);
}

//=========================================================================
// Unit Tests
//=========================================================================
