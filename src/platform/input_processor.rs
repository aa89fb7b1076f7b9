//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit keyboard input into engine `PlatformEvent`s.
//
// Architecture:
//   Winit KeyEvent → InputProcessor → PlatformEvent::{KeyPressed, KeyReleased}
//
// OS auto-repeat is filtered here: a held key produces exactly one
// `KeyPressed` until it is released. Keys with no engine `KeyCode`
// (F13-F24, media keys, exotic layouts) are dropped.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::platform_bridge::PlatformEvent;

//=== InputProcessor ======================================================

/// Stateless translator from Winit key events to platform events.
#[derive(Debug, Default)]
pub(crate) struct InputProcessor;

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Converts a Winit key event (filters repeats and unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<PlatformEvent> {
        self.translate(key_event.physical_key, key_event.state, key_event.repeat)
    }

    fn translate(&self, physical: PhysicalKey, state: ElementState, repeat: bool) -> Option<PlatformEvent> {
        if repeat {
            return None;
        }

        let code = match physical {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };
        if code.is_unidentified() {
            return None;
        }

        Some(match state {
            ElementState::Pressed => PlatformEvent::KeyPressed(code),
            ElementState::Released => PlatformEvent::KeyReleased(code),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Unmapped keys return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            //--- Digits -------------------------------------------------------

            W::Digit0 => Self::Digit0,
            W::Digit1 => Self::Digit1,
            W::Digit2 => Self::Digit2,
            W::Digit3 => Self::Digit3,
            W::Digit4 => Self::Digit4,
            W::Digit5 => Self::Digit5,
            W::Digit6 => Self::Digit6,
            W::Digit7 => Self::Digit7,
            W::Digit8 => Self::Digit8,
            W::Digit9 => Self::Digit9,

            //--- Letters ------------------------------------------------------

            W::KeyA => Self::KeyA,
            W::KeyB => Self::KeyB,
            W::KeyC => Self::KeyC,
            W::KeyD => Self::KeyD,
            W::KeyE => Self::KeyE,
            W::KeyF => Self::KeyF,
            W::KeyG => Self::KeyG,
            W::KeyH => Self::KeyH,
            W::KeyI => Self::KeyI,
            W::KeyJ => Self::KeyJ,
            W::KeyK => Self::KeyK,
            W::KeyL => Self::KeyL,
            W::KeyM => Self::KeyM,
            W::KeyN => Self::KeyN,
            W::KeyO => Self::KeyO,
            W::KeyP => Self::KeyP,
            W::KeyQ => Self::KeyQ,
            W::KeyR => Self::KeyR,
            W::KeyS => Self::KeyS,
            W::KeyT => Self::KeyT,
            W::KeyU => Self::KeyU,
            W::KeyV => Self::KeyV,
            W::KeyW => Self::KeyW,
            W::KeyX => Self::KeyX,
            W::KeyY => Self::KeyY,
            W::KeyZ => Self::KeyZ,

            //--- Navigation and editing ---------------------------------------

            W::ArrowUp => Self::ArrowUp,
            W::ArrowDown => Self::ArrowDown,
            W::ArrowLeft => Self::ArrowLeft,
            W::ArrowRight => Self::ArrowRight,
            W::Space => Self::Space,
            W::Enter | W::NumpadEnter => Self::Enter,
            W::Escape => Self::Escape,
            W::Tab => Self::Tab,
            W::Backspace => Self::Backspace,
            W::Delete => Self::Delete,

            _ => Self::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
