//! Terminal emulator detection
//!
//! Classifies the surrounding terminal from environment variables, the same
//! way the emulators advertise themselves to child processes. An
//! unrecognized terminal is not an error; it simply disables the layer.

use std::collections::HashMap;
use std::env;

use crate::config::Assume;

/// `iTerm2` exports the active profile name.
pub const ITERM_PROFILE: &str = "ITERM_PROFILE";

/// mintty marks its children with this variable.
pub const MINTTY_MARKER: &str = "MINTTY";

/// Set by several emulators; Terminal.app uses the value below.
pub const TERM_PROGRAM: &str = "TERM_PROGRAM";

/// `TERM_PROGRAM` value published by Terminal.app.
pub const APPLE_TERMINAL: &str = "Apple_Terminal";

/// tmux exports the server socket path to every pane.
pub const TMUX_SESSION: &str = "TMUX";

/// Terminal emulators this layer knows how to talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TerminalKind {
    /// iTerm2 (macOS)
    ITerm,
    /// mintty (Cygwin / MSYS2 / Git for Windows)
    Mintty,
    /// Terminal.app (macOS)
    TerminalApp,
    /// Anything else; the layer stays inert.
    Unsupported,
}

impl TerminalKind {
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Human-readable name for logs and the probe binary.
    pub fn name(self) -> &'static str {
        match self {
            Self::ITerm => "iTerm2",
            Self::Mintty => "mintty",
            Self::TerminalApp => "Terminal.app",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Read-only snapshot of the environment variables the detector consults.
///
/// [`Env::system`] captures the live process environment;
/// [`Env::from_vars`] builds a synthetic one so embedders and tests can run
/// detection deterministically.
#[derive(Clone, Debug, Default)]
pub struct Env {
    vars: HashMap<String, String>,
}

impl Env {
    /// Snapshot the consulted variables from the process environment.
    pub fn system() -> Self {
        let mut vars = HashMap::new();
        for key in [ITERM_PROFILE, MINTTY_MARKER, TERM_PROGRAM, TMUX_SESSION] {
            if let Ok(value) = env::var(key) {
                vars.insert(key.to_string(), value);
            }
        }
        Self { vars }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_vars<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Classify the surrounding terminal.
///
/// Each rule can be forced on through the corresponding [`Assume`] flag,
/// for environments where auto-detection fails (e.g. a stripped login
/// environment inside the right emulator).
pub fn identify(env: &Env, assume: &Assume) -> TerminalKind {
    if assume.iterm || env.var(ITERM_PROFILE).is_some() {
        TerminalKind::ITerm
    } else if assume.mintty || env.var(MINTTY_MARKER).is_some() {
        TerminalKind::Mintty
    } else if assume.terminal_app || env.var(TERM_PROGRAM) == Some(APPLE_TERMINAL) {
        TerminalKind::TerminalApp
    } else {
        TerminalKind::Unsupported
    }
}

/// Whether a terminal multiplexer sits between us and the emulator.
pub fn has_multiplexer(env: &Env) -> bool {
    env.var(TMUX_SESSION).is_some()
}
