//! Lifecycle installation
//!
//! Composes the concrete byte strings for the editor's start-up, shutdown,
//! and insert-mode hooks and installs them exactly once. Ordering inside
//! the start-up and shutdown payloads is a contract with the emulators,
//! not a style choice, so it is enforced by [`SequenceSetBuilder::build`]
//! being the only way to obtain a [`ComposedSequences`].

use tracing::{debug, info};

use crate::config::{Config, Features};
use crate::editor::{DispatchError, FocusChange, HookSlot, HostEditor};
use crate::focus::FocusBridge;
use crate::term::detect::{self, Env, TerminalKind};
use crate::term::mux;
use crate::term::sequences::{self, Screen, FOCUS_GAINED_REPORT, FOCUS_LOST_REPORT};

/// The final byte strings installed into the editor's hook slots, plus the
/// raw reports the focus keys are bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedSequences {
    /// Prepended to the start-up hook.
    pub on_start: Vec<u8>,
    /// Installed as the shutdown hook.
    pub on_exit: Vec<u8>,
    /// Prepended to the insert-enter hook.
    pub on_insert_enter: Vec<u8>,
    /// Prepended to the insert-leave hook.
    pub on_insert_leave: Vec<u8>,
    /// Bytes the terminal sends on focus lost.
    pub focus_lost_bytes: &'static [u8],
    /// Bytes the terminal sends on focus gained.
    pub focus_gained_bytes: &'static [u8],
}

/// Builds the ordered sequence set for one terminal.
pub struct SequenceSetBuilder<'a> {
    config: &'a Config,
    kind: TerminalKind,
    multiplexer: bool,
}

impl<'a> SequenceSetBuilder<'a> {
    pub fn new(config: &'a Config, kind: TerminalKind, multiplexer: bool) -> Self {
        Self {
            config,
            kind,
            multiplexer,
        }
    }

    /// Compose the hook payloads in their required order.
    ///
    /// Start-up order: cursor to normal shape, arm focus reporting, then
    /// save the screen. The shape reset and the arming must land before
    /// the save, and shutdown mirrors the pair in reverse (disarm, then
    /// restore); violating this order corrupts the emulator's restored
    /// screen state.
    ///
    /// Under a multiplexer the cursor sequences travel wrapped, and
    /// focus-reporting enable is emitted wrapped *and* unwrapped so both
    /// the multiplexer's layer and the real terminal are armed. The screen
    /// pair and the disable sequence are never wrapped: tmux keeps its own
    /// alternate screen, and forwarding a second save/restore through it
    /// corrupts the display.
    pub fn build(self) -> ComposedSequences {
        let mut cursor_normal = sequences::cursor_shape(self.config.normal_shape, self.kind);
        let mut cursor_insert = sequences::cursor_shape(self.config.insert_shape, self.kind);
        let enable_focus = sequences::enable_focus_reporting(self.kind);
        let disable_focus = sequences::disable_focus_reporting(self.kind);
        let save_screen = sequences::screen(Screen::Save, self.kind);
        let restore_screen = sequences::screen(Screen::Restore, self.kind);

        let mut arm_focus = Vec::new();
        if self.multiplexer {
            arm_focus.extend_from_slice(mux::wrap(&enable_focus).as_bytes());
            cursor_normal = mux::wrap(&cursor_normal);
            cursor_insert = mux::wrap(&cursor_insert);
        }
        arm_focus.extend_from_slice(enable_focus.as_bytes());

        let mut on_start = Vec::new();
        on_start.extend_from_slice(cursor_normal.as_bytes());
        on_start.extend_from_slice(&arm_focus);
        on_start.extend_from_slice(save_screen.as_bytes());

        let mut on_exit = Vec::new();
        on_exit.extend_from_slice(disable_focus.as_bytes());
        on_exit.extend_from_slice(restore_screen.as_bytes());

        ComposedSequences {
            on_start,
            on_exit,
            on_insert_enter: cursor_insert.as_bytes().to_vec(),
            on_insert_leave: cursor_normal.as_bytes().to_vec(),
            focus_lost_bytes: FOCUS_LOST_REPORT,
            focus_gained_bytes: FOCUS_GAINED_REPORT,
        }
    }
}

/// The terminal bridge: detection result, configuration, and the one-shot
/// installer.
pub struct Bridge {
    config: Config,
    kind: TerminalKind,
    multiplexer: bool,
    activated: bool,
}

impl Bridge {
    /// Detect the surrounding terminal from the process environment.
    pub fn detect(config: Config) -> Self {
        Self::with_env(config, &Env::system())
    }

    /// Detect against an explicit environment snapshot.
    pub fn with_env(config: Config, env: &Env) -> Self {
        let kind = detect::identify(env, &config.assume);
        let multiplexer = detect::has_multiplexer(env);
        Self {
            config,
            kind,
            multiplexer,
            activated: false,
        }
    }

    pub fn kind(&self) -> TerminalKind {
        self.kind
    }

    pub fn has_multiplexer(&self) -> bool {
        self.multiplexer
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Compose the sequence set for the detected terminal.
    pub fn sequences(&self) -> ComposedSequences {
        SequenceSetBuilder::new(&self.config, self.kind, self.multiplexer).build()
    }

    /// Install hooks and focus key bindings into the editor.
    ///
    /// A no-op on an unsupported terminal or a graphical front end. Also a
    /// no-op on every call after the first: the start-up and insert hooks
    /// are merged with their existing content, so running the installation
    /// twice would duplicate it.
    pub fn activate<E: HostEditor + ?Sized>(&mut self, editor: &mut E) {
        if !self.kind.is_supported() {
            debug!("unsupported terminal, bridge stays inert");
            return;
        }
        if editor.is_gui() {
            debug!("graphical front end, bridge stays inert");
            return;
        }
        if self.activated {
            debug!("bridge already activated, ignoring");
            return;
        }
        self.activated = true;

        let features = self.config.features();
        let set = self.sequences();

        if features.contains(Features::FIX_FOCUS) {
            // Start-up merges: our payload first, whatever the user already
            // had after it.
            let mut start = set.on_start.clone();
            start.extend_from_slice(&editor.hook(HookSlot::Startup));
            editor.set_hook(HookSlot::Startup, start);

            // Shutdown replaces the slot outright.
            editor.set_hook(HookSlot::Shutdown, set.on_exit.clone());

            FocusBridge::install(editor);
        }

        if features.contains(Features::FIX_CURSOR) {
            let mut enter = set.on_insert_enter.clone();
            enter.extend_from_slice(&editor.hook(HookSlot::InsertEnter));
            editor.set_hook(HookSlot::InsertEnter, enter);

            let mut leave = set.on_insert_leave.clone();
            leave.extend_from_slice(&editor.hook(HookSlot::InsertLeave));
            editor.set_hook(HookSlot::InsertLeave, leave);
        }

        info!(
            kind = self.kind.name(),
            multiplexer = self.multiplexer,
            fix_focus = features.contains(Features::FIX_FOCUS),
            fix_cursor = features.contains(Features::FIX_CURSOR),
            "terminal bridge activated"
        );
    }

    /// Handle a focus change delivered through one of the synthetic keys.
    pub fn handle_focus<E: HostEditor + ?Sized>(
        &self,
        editor: &mut E,
        change: FocusChange,
    ) -> Result<(), DispatchError> {
        FocusBridge::handle(editor, change)
    }
}
