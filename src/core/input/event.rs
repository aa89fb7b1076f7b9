//=========================================================================
// Key Codes
//
// Portable identifiers for physical keyboard keys.
//
// The platform layer (Winit) converts its own key codes into these before
// anything reaches a scene, so scene logic and the KeyState tracker never
// depend on the windowing backend.
//
// Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    KeyCode (this module) inside PlatformEvent
//         ↓
//    Scene::poll_event → KeyStateTracker::update
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of keyboard layout.
///
/// Coverage:
/// - Alphanumeric keys (A-Z, 0-9)
/// - Arrow keys
/// - Common special keys (Space, Enter, Escape, etc.)
///
/// Additional keys can be added as needed without breaking existing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    /// Directional navigation keys
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    /// Spacebar
    Space,

    /// Return/Enter key
    Enter,

    /// Escape key
    Escape,

    /// Tab key
    Tab,

    /// Backspace key
    Backspace,

    /// Delete key
    Delete,

    /// Fallback for keys not explicitly mapped by the platform layer.
    ///
    /// The bundled platform drops these before they are sent, but other
    /// event sources may still produce them.
    Unidentified
}

impl KeyCode {
    /// Returns `true` for the `Unidentified` fallback.
    pub fn is_unidentified(self) -> bool {
        matches!(self, Self::Unidentified)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
