//! Terminal protocol layer.
//!
//! Everything that is knowledge about terminals rather than about the
//! editor lives here:
//!
//! - **detect**: which emulator are we running in, and is tmux in between
//! - **sequences**: the per-family escape-sequence catalog
//! - **mux**: the tmux DCS passthrough envelope
//!
//! # Architecture
//!
//! ```text
//! identify(Env) ──► TerminalKind ──► sequences::*  ──► EscapeSequence
//!                                        │
//!                   has_multiplexer ──► mux::wrap (subset only)
//! ```

pub mod detect;
pub mod mux;
pub mod sequences;
