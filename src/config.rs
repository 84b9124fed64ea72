//! Configuration for the terminal bridge.
//!
//! This module provides:
//! - The immutable [`Config`] value built once at start-up
//! - TOML configuration file loading from `~/.termbridge/config.toml`
//! - Forced-terminal assumptions for environments that defeat detection
//!
//! # Configuration File
//!
//! ```toml
//! # Behavior groups, both on by default
//! fix_cursor = true
//! fix_focus = true
//!
//! # Cursor shapes: "block", "bar", "underline"
//! normal_shape = "block"
//! insert_shape = "bar"
//!
//! [assume]
//! # Force a terminal kind when auto-detection fails
//! iterm = false
//! mintty = false
//! terminal_app = false
//! ```
//!
//! The host editor's own settings system can also feed this struct
//! directly; [`crate::term::sequences::CursorShape::from_code`] accepts the
//! numeric 0/1/2 selectors such systems usually expose.

use std::fs;
use std::path::PathBuf;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::term::sequences::CursorShape;

/// Main configuration, read once and then only passed by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Switch cursor shape on insert-mode enter/leave
    pub fix_cursor: bool,
    /// Translate terminal focus reports into editor focus events
    pub fix_focus: bool,
    /// Cursor shape outside insert mode
    pub normal_shape: CursorShape,
    /// Cursor shape in insert mode
    pub insert_shape: CursorShape,
    /// Detection overrides
    pub assume: Assume,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fix_cursor: true,
            fix_focus: true,
            normal_shape: CursorShape::Block,
            insert_shape: CursorShape::Bar,
            assume: Assume::default(),
        }
    }
}

/// Forced-terminal assumptions, one per detection rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Assume {
    pub iterm: bool,
    pub mintty: bool,
    pub terminal_app: bool,
}

bitflags! {
    /// The behavior groups as a flag set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Features: u8 {
        const FIX_CURSOR = 0b01;
        const FIX_FOCUS  = 0b10;
    }
}

impl From<&Config> for Features {
    fn from(config: &Config) -> Self {
        let mut features = Features::empty();
        if config.fix_cursor {
            features |= Features::FIX_CURSOR;
        }
        if config.fix_focus {
            features |= Features::FIX_FOCUS;
        }
        features
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults on any
    /// missing or unreadable file.
    pub fn load() -> Self {
        if let Some(path) = Self::get_config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".termbridge").join("config.toml"))
    }

    /// The enabled behavior groups.
    pub fn features(&self) -> Features {
        Features::from(self)
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
