//! Host-editor interface
//!
//! The editor side of the bridge: hook strings, key bindings, focus events,
//! and the per-mode context the focus handlers save and restore. The
//! embedding editor implements [`HostEditor`]; this crate only drives it.
//! None of the editor's own machinery (settings, mappings, event dispatch,
//! command-line editing) is reimplemented here.

use crossterm::event::KeyCode;
use thiserror::Error;

/// Identifies a buffer for event scoping.
pub type BufferId = u64;

/// Edit modes the focus bridge distinguishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditMode {
    Normal,
    Insert,
    Visual,
    OperatorPending,
    CommandLine,
}

/// Hook slots whose contents the installer composes into.
///
/// These are the editor's start-up/shutdown terminal strings and the
/// insert-mode transition strings; the editor emits a slot's bytes to the
/// terminal when the corresponding transition happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookSlot {
    Startup,
    Shutdown,
    InsertEnter,
    InsertLeave,
}

/// Focus transition reported by the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusChange {
    Gained,
    Lost,
}

impl FocusChange {
    /// Event name the editor's listeners see.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Gained => "FocusGained",
            Self::Lost => "FocusLost",
        }
    }
}

/// Command-line editing snapshot: buffer text and 1-based cursor column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CmdlineState {
    pub text: String,
    pub column: usize,
}

/// Failure raised by the editor's event-dispatch machinery (an erroring
/// listener). The bridge propagates it unmodified; masking listener bugs
/// would be worse than a visible failure.
#[derive(Error, Debug)]
#[error("focus event listener failed: {message}")]
pub struct DispatchError {
    pub message: String,
}

impl DispatchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The editor collaborators this layer drives.
///
/// Hook slots hold byte strings the editor writes to the terminal on the
/// matching transition. Key mappings associate raw terminal input bytes
/// with a synthetic key code, which the editor then routes back into
/// [`crate::focus::FocusBridge::handle`].
pub trait HostEditor {
    /// Running under a graphical front end; the whole layer stays inert.
    fn is_gui(&self) -> bool {
        false
    }

    /// The editor's current edit mode.
    fn mode(&self) -> EditMode;

    /// Current content of a hook slot.
    fn hook(&self, slot: HookSlot) -> Vec<u8>;

    /// Replace a hook slot's content.
    fn set_hook(&mut self, slot: HookSlot, content: Vec<u8>);

    /// Associate a synthetic key code with the raw bytes the terminal
    /// sends, so those bytes arrive as one recognizable key press.
    fn map_key_bytes(&mut self, key: KeyCode, bytes: &[u8]);

    /// Buffer the user is editing right now.
    fn current_buffer(&self) -> BufferId;

    /// Fire a buffer-scoped focus notification through the editor's event
    /// system. Listener errors come back unmodified.
    fn fire_focus_event(
        &mut self,
        change: FocusChange,
        buffer: BufferId,
    ) -> Result<(), DispatchError>;

    /// Cursor position as (line, column).
    fn cursor(&self) -> (usize, usize);

    /// Move the cursor to (line, column).
    fn set_cursor(&mut self, pos: (usize, usize));

    /// Abort a pending operator so the half-typed command cannot apply to
    /// whatever the focus handler does.
    fn cancel_pending_operator(&mut self);

    /// Re-enter visual mode on the most recent selection.
    fn reselect_visual(&mut self);

    /// Snapshot of the in-progress command line.
    fn cmdline(&self) -> CmdlineState;

    /// Restore the command line to a previous snapshot, text and cursor
    /// column both.
    fn set_cmdline(&mut self, state: &CmdlineState);
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted editor used by the lifecycle and focus tests.

    use super::*;

    #[derive(Default)]
    pub(crate) struct FakeEditor {
        pub gui: bool,
        pub mode: Option<EditMode>,
        pub startup: Vec<u8>,
        pub shutdown: Vec<u8>,
        pub insert_enter: Vec<u8>,
        pub insert_leave: Vec<u8>,
        pub key_maps: Vec<(KeyCode, Vec<u8>)>,
        pub buffer: BufferId,
        pub events: Vec<(FocusChange, BufferId)>,
        pub cursor: (usize, usize),
        pub cmdline: CmdlineState,
        /// Most recent visual selection span, as ((line, col), (line, col)).
        pub selection: Option<((usize, usize), (usize, usize))>,
        pub visual_active: bool,
        pub pending_operator: Option<char>,
        /// When set, every dispatch fails with this message.
        pub fail_dispatch: Option<String>,
        /// When set, listeners clobber cursor and command line, so the
        /// tests can tell whether the bridge actually restored them.
        pub clobber_on_dispatch: bool,
        /// Ordered record of the context-sensitive operations.
        pub journal: Vec<String>,
    }

    impl FakeEditor {
        pub fn in_mode(mode: EditMode) -> Self {
            Self {
                mode: Some(mode),
                buffer: 1,
                ..Self::default()
            }
        }

        fn slot_mut(&mut self, slot: HookSlot) -> &mut Vec<u8> {
            match slot {
                HookSlot::Startup => &mut self.startup,
                HookSlot::Shutdown => &mut self.shutdown,
                HookSlot::InsertEnter => &mut self.insert_enter,
                HookSlot::InsertLeave => &mut self.insert_leave,
            }
        }
    }

    impl HostEditor for FakeEditor {
        fn is_gui(&self) -> bool {
            self.gui
        }

        fn mode(&self) -> EditMode {
            self.mode.expect("test editor has no mode set")
        }

        fn hook(&self, slot: HookSlot) -> Vec<u8> {
            match slot {
                HookSlot::Startup => self.startup.clone(),
                HookSlot::Shutdown => self.shutdown.clone(),
                HookSlot::InsertEnter => self.insert_enter.clone(),
                HookSlot::InsertLeave => self.insert_leave.clone(),
            }
        }

        fn set_hook(&mut self, slot: HookSlot, content: Vec<u8>) {
            *self.slot_mut(slot) = content;
        }

        fn map_key_bytes(&mut self, key: KeyCode, bytes: &[u8]) {
            self.key_maps.push((key, bytes.to_vec()));
        }

        fn current_buffer(&self) -> BufferId {
            self.buffer
        }

        fn fire_focus_event(
            &mut self,
            change: FocusChange,
            buffer: BufferId,
        ) -> Result<(), DispatchError> {
            self.journal.push(format!("fire:{}", change.event_name()));
            if self.clobber_on_dispatch {
                self.cursor = (0, 0);
                self.cmdline = CmdlineState {
                    text: String::new(),
                    column: 1,
                };
            }
            if let Some(message) = &self.fail_dispatch {
                return Err(DispatchError::new(message.clone()));
            }
            self.events.push((change, buffer));
            Ok(())
        }

        fn cursor(&self) -> (usize, usize) {
            self.cursor
        }

        fn set_cursor(&mut self, pos: (usize, usize)) {
            self.journal.push("set_cursor".to_string());
            self.cursor = pos;
        }

        fn cancel_pending_operator(&mut self) {
            self.journal.push("cancel_operator".to_string());
            self.pending_operator = None;
        }

        fn reselect_visual(&mut self) {
            self.journal.push("reselect_visual".to_string());
            self.visual_active = true;
        }

        fn cmdline(&self) -> CmdlineState {
            self.cmdline.clone()
        }

        fn set_cmdline(&mut self, state: &CmdlineState) {
            self.journal.push("set_cmdline".to_string());
            self.cmdline = state.clone();
        }
    }
}
