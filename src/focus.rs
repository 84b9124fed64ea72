//! Focus event bridge
//!
//! Terminals with focus reporting enabled deliver `ESC [ O` / `ESC [ I`
//! through the ordinary input stream. The bridge claims two keys from the
//! extended function-key range (unused by default, and long enough that
//! they cannot be confused with a bare Escape press during the keypress
//! timeout) and binds them to those byte strings. When the editor then
//! sees one of the synthetic keys it calls [`FocusBridge::handle`], which
//! fires the buffer-scoped notification appropriate for the current edit
//! mode and puts the editor back in the observable state it was in.

use crossterm::event::KeyCode;
use tracing::debug;

use crate::editor::{CmdlineState, DispatchError, EditMode, FocusChange, HostEditor};
use crate::term::sequences::{FOCUS_GAINED_REPORT, FOCUS_LOST_REPORT};

/// Synthetic key carrying the focus-lost report.
pub const FOCUS_LOST_KEY: KeyCode = KeyCode::F(24);

/// Synthetic key carrying the focus-gained report.
pub const FOCUS_GAINED_KEY: KeyCode = KeyCode::F(25);

/// Mode-aware translation of terminal focus reports into editor events.
pub struct FocusBridge;

impl FocusBridge {
    /// Bind the terminal's focus report bytes to the two synthetic keys.
    ///
    /// The mappings stay live for the rest of the session.
    pub fn install<E: HostEditor + ?Sized>(editor: &mut E) {
        editor.map_key_bytes(FOCUS_LOST_KEY, FOCUS_LOST_REPORT);
        editor.map_key_bytes(FOCUS_GAINED_KEY, FOCUS_GAINED_REPORT);
        debug!("focus report keys bound");
    }

    /// The focus change a synthetic key press stands for, if any.
    pub fn change_for_key(key: KeyCode) -> Option<FocusChange> {
        if key == FOCUS_LOST_KEY {
            Some(FocusChange::Lost)
        } else if key == FOCUS_GAINED_KEY {
            Some(FocusChange::Gained)
        } else {
            None
        }
    }

    /// Fire the notification for `change` in the editor's current mode.
    ///
    /// Each mode captures whatever context the dispatch could disturb,
    /// fires, and restores: pending operators are cancelled first, visual
    /// mode is re-entered on the same selection, insert mode keeps its
    /// cursor, and command-line mode gets its text and column back
    /// verbatim. Restoration is a drop guard, so it also runs when a
    /// listener errors; the error itself propagates unmodified.
    pub fn handle<E: HostEditor + ?Sized>(
        editor: &mut E,
        change: FocusChange,
    ) -> Result<(), DispatchError> {
        let buffer = editor.current_buffer();
        let saved = match editor.mode() {
            EditMode::Normal => Saved::Nothing,
            EditMode::OperatorPending => {
                editor.cancel_pending_operator();
                Saved::Nothing
            }
            EditMode::Visual => Saved::Visual,
            EditMode::Insert => Saved::Cursor(editor.cursor()),
            EditMode::CommandLine => Saved::Cmdline(editor.cmdline()),
        };

        let scope = RestoreScope { editor, saved };
        scope.editor.fire_focus_event(change, buffer)
    }
}

/// Context captured before dispatch.
enum Saved {
    Nothing,
    Cursor((usize, usize)),
    Visual,
    Cmdline(CmdlineState),
}

/// Puts the captured context back when dropped, error or not.
struct RestoreScope<'a, E: HostEditor + ?Sized> {
    editor: &'a mut E,
    saved: Saved,
}

impl<E: HostEditor + ?Sized> Drop for RestoreScope<'_, E> {
    fn drop(&mut self) {
        match std::mem::replace(&mut self.saved, Saved::Nothing) {
            Saved::Nothing => {}
            Saved::Cursor(pos) => self.editor.set_cursor(pos),
            Saved::Visual => self.editor.reselect_visual(),
            Saved::Cmdline(state) => self.editor.set_cmdline(&state),
        }
    }
}
