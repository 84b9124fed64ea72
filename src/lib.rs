//! termbridge - focus events and per-mode cursor shapes for terminal editors
//!
//! Modal editors running inside a terminal cannot see window focus changes
//! and cannot change the cursor shape per edit mode on their own; both need
//! emulator-specific escape sequences, and both break again when tmux sits
//! between the editor and the emulator. termbridge is that missing layer.
//!
//! # Features
//!
//! - **Terminal detection**: iTerm2, mintty, and Terminal.app recognized
//!   from the environment; anything else leaves the layer inert
//! - **Focus events**: terminal focus reports are bound to two spare
//!   function keys and surfaced as buffer-scoped FocusGained/FocusLost
//!   events, with per-mode context restore (normal, insert, visual,
//!   operator-pending, command-line)
//! - **Cursor shapes**: block/bar/underline per mode, with the right
//!   numeric table for each terminal family
//! - **tmux safe**: the sequences that need it travel inside the DCS
//!   passthrough envelope, the ones that must not stay outside
//!
//! # Quick Start
//!
//! ```text
//! let mut bridge = Bridge::detect(Config::load());
//! bridge.activate(&mut editor);          // once, at editor start-up
//! ...
//! bridge.handle_focus(&mut editor, FocusChange::Lost)?;   // on F24
//! bridge.handle_focus(&mut editor, FocusChange::Gained)?; // on F25
//! ```
//!
//! The editor supplies a [`HostEditor`] implementation: hook strings it
//! writes to the terminal on start-up/shutdown/insert transitions, a
//! key-byte mapping table, a focus event dispatcher, and the little bits
//! of mode context the focus handlers save and restore.

pub mod config;
pub mod editor;
pub mod focus;
pub mod lifecycle;
pub mod term;

pub use config::{Assume, Config, Features};
pub use editor::{
    BufferId, CmdlineState, DispatchError, EditMode, FocusChange, HookSlot, HostEditor,
};
pub use focus::{FocusBridge, FOCUS_GAINED_KEY, FOCUS_LOST_KEY};
pub use lifecycle::{Bridge, ComposedSequences, SequenceSetBuilder};
pub use term::detect::{Env, TerminalKind};
pub use term::sequences::{CursorShape, EscapeSequence};
