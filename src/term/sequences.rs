//! Escape-sequence catalog
//!
//! Pure lookup functions from a semantic request plus the identified
//! terminal to the literal control bytes for that terminal family. The
//! numeric cursor-shape codes are not interchangeable between families:
//! iTerm2 uses a proprietary OSC 50 extension while mintty and Terminal.app
//! speak DECSCUSR, and even those two disagree on blink variants.

use serde::{Deserialize, Serialize};

use crate::term::detect::TerminalKind;

/// Bytes the terminal sends when the window gains focus (mode 1004).
pub const FOCUS_GAINED_REPORT: &[u8] = b"\x1b[I";

/// Bytes the terminal sends when the window loses focus (mode 1004).
pub const FOCUS_LOST_REPORT: &[u8] = b"\x1b[O";

/// A terminal control sequence.
///
/// Always produced by this module (or [`crate::term::mux::wrap`]); an empty
/// sequence means the terminal has no equivalent and the caller installs
/// nothing for that slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EscapeSequence(Vec<u8>);

impl EscapeSequence {
    /// The "not supported here" sequence.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Cursor shapes a terminal can render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorShape {
    #[default]
    Block,
    Bar,
    Underline,
}

impl CursorShape {
    /// Map the numeric selector used by host configuration systems
    /// (0 = block, 1 = bar, 2 = underline).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Block),
            1 => Some(Self::Bar),
            2 => Some(Self::Underline),
            _ => None,
        }
    }
}

/// Alternate screen buffer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Save,
    Restore,
}

/// Save or restore the screen via the alternate buffer (DECSET 1049).
///
/// Only iTerm2 is known to handle the pair cleanly here; other families
/// get the empty sequence.
pub fn screen(op: Screen, kind: TerminalKind) -> EscapeSequence {
    match (kind, op) {
        (TerminalKind::ITerm, Screen::Save) => EscapeSequence::from_bytes(b"\x1b[?1049h".to_vec()),
        (TerminalKind::ITerm, Screen::Restore) => {
            EscapeSequence::from_bytes(b"\x1b[?1049l".to_vec())
        }
        _ => EscapeSequence::empty(),
    }
}

/// Set the cursor shape, using the numeric table for `kind`.
pub fn cursor_shape(shape: CursorShape, kind: TerminalKind) -> EscapeSequence {
    match kind {
        // iTerm2 proprietary: OSC 50 with CursorShape=0/1/2, BEL-terminated
        TerminalKind::ITerm => {
            let code = match shape {
                CursorShape::Block => 0,
                CursorShape::Bar => 1,
                CursorShape::Underline => 2,
            };
            EscapeSequence::from_bytes(format!("\x1b]50;CursorShape={}\x07", code).into_bytes())
        }
        // mintty: DECSCUSR, steady variants
        TerminalKind::Mintty => {
            let code = match shape {
                CursorShape::Block => 2,
                CursorShape::Underline => 4,
                CursorShape::Bar => 6,
            };
            EscapeSequence::from_bytes(format!("\x1b[{} q", code).into_bytes())
        }
        // Terminal.app: DECSCUSR, blinking variants (blink follows the user's
        // profile setting there)
        TerminalKind::TerminalApp => {
            let code = match shape {
                CursorShape::Block => 1,
                CursorShape::Underline => 3,
                CursorShape::Bar => 5,
            };
            EscapeSequence::from_bytes(format!("\x1b[{} q", code).into_bytes())
        }
        TerminalKind::Unsupported => EscapeSequence::empty(),
    }
}

/// Ask the terminal to report window focus changes (DECSET 1004).
pub fn enable_focus_reporting(kind: TerminalKind) -> EscapeSequence {
    focus_reporting(kind, b'h')
}

/// Stop focus-change reports (DECRST 1004).
pub fn disable_focus_reporting(kind: TerminalKind) -> EscapeSequence {
    focus_reporting(kind, b'l')
}

fn focus_reporting(kind: TerminalKind, toggle: u8) -> EscapeSequence {
    match kind {
        TerminalKind::ITerm | TerminalKind::Mintty | TerminalKind::TerminalApp => {
            let mut bytes = b"\x1b[?1004".to_vec();
            bytes.push(toggle);
            EscapeSequence::from_bytes(bytes)
        }
        TerminalKind::Unsupported => EscapeSequence::empty(),
    }
}
