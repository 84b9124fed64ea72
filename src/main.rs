//! termbridge probe - show what the bridge would do in this terminal
//!
//! Prints the detected terminal kind, multiplexer presence, and every
//! composed escape sequence in caret-free escaped notation. Run it inside
//! the terminal (and tmux session) you are debugging:
//!
//! ```text
//! termbridge                  # detect from the environment
//! termbridge --assume-iterm   # preview the iTerm2 sequences anywhere
//! termbridge --tmux           # preview with a multiplexer interposed
//! ```

use std::env;

use tracing_subscriber::EnvFilter;

use termbridge::term::detect::{ITERM_PROFILE, MINTTY_MARKER, TERM_PROGRAM, TMUX_SESSION};
use termbridge::{Bridge, Config, Env, FocusChange};

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Probe options on top of the loaded configuration
#[derive(Default)]
struct Args {
    /// Pretend a multiplexer is interposed
    force_tmux: bool,
    assume_iterm: bool,
    assume_mintty: bool,
    assume_terminal_app: bool,
}

fn print_version() {
    eprintln!("termbridge {}", VERSION);
}

fn print_help() {
    eprintln!("termbridge {} - terminal focus/cursor bridge probe", VERSION);
    eprintln!();
    eprintln!("Usage: termbridge [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --assume-iterm         Force iTerm2 detection");
    eprintln!("  --assume-mintty        Force mintty detection");
    eprintln!("  --assume-terminal-app  Force Terminal.app detection");
    eprintln!("  --tmux                 Pretend a multiplexer is interposed");
    eprintln!("  -v, --version          Show version");
    eprintln!("  -h, --help             Show this help");
    eprintln!();
    eprintln!("Configuration: ~/.termbridge/config.toml");
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "--assume-iterm" => {
                parsed.assume_iterm = true;
            }
            "--assume-mintty" => {
                parsed.assume_mintty = true;
            }
            "--assume-terminal-app" => {
                parsed.assume_terminal_app = true;
            }
            "--tmux" => {
                parsed.force_tmux = true;
            }
            arg => {
                return Err(format!("Unknown argument: {}. Use -h for help.", arg));
            }
        }
        i += 1;
    }

    Ok(parsed)
}

/// Snapshot the real environment, with the probe's overrides applied.
fn probe_env(args: &Args) -> Env {
    let mut vars: Vec<(String, String)> = Vec::new();
    for key in [ITERM_PROFILE, MINTTY_MARKER, TERM_PROGRAM, TMUX_SESSION] {
        if let Ok(value) = env::var(key) {
            vars.push((key.to_string(), value));
        }
    }
    if args.force_tmux {
        vars.push((TMUX_SESSION.to_string(), "forced".to_string()));
    }
    Env::from_vars(vars)
}

/// Render bytes so escape sequences survive being printed to a terminal.
fn escaped(bytes: &[u8]) -> String {
    let mut out = String::new();
    for &byte in bytes {
        match byte {
            0x1b => out.push_str("\\e"),
            0x07 => out.push_str("\\a"),
            b' '..=b'~' => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    if out.is_empty() {
        out.push_str("(none)");
    }
    out
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load();
    config.assume.iterm |= args.assume_iterm;
    config.assume.mintty |= args.assume_mintty;
    config.assume.terminal_app |= args.assume_terminal_app;

    let env = probe_env(&args);
    let bridge = Bridge::with_env(config, &env);
    let set = bridge.sequences();
    let config = bridge.config();

    println!("termbridge {}", VERSION);
    println!("terminal:      {}", bridge.kind().name());
    println!(
        "multiplexer:   {}",
        if bridge.has_multiplexer() { "yes (tmux)" } else { "no" }
    );
    println!(
        "fix_cursor:    {}  (normal={:?}, insert={:?})",
        if config.fix_cursor { "on" } else { "off" },
        config.normal_shape,
        config.insert_shape,
    );
    println!(
        "fix_focus:     {}",
        if config.fix_focus { "on" } else { "off" }
    );
    println!();
    println!("on-start:      {}", escaped(&set.on_start));
    println!("on-exit:       {}", escaped(&set.on_exit));
    println!("insert-enter:  {}", escaped(&set.on_insert_enter));
    println!("insert-leave:  {}", escaped(&set.on_insert_leave));
    println!(
        "focus-lost:    {}  -> {:?} events",
        escaped(set.focus_lost_bytes),
        FocusChange::Lost,
    );
    println!(
        "focus-gained:  {}  -> {:?} events",
        escaped(set.focus_gained_bytes),
        FocusChange::Gained,
    );

    if !bridge.kind().is_supported() {
        println!();
        println!("This terminal is not supported; the bridge would stay inert.");
    }

    Ok(())
}
