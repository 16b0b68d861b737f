//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Progress goes to stdout and respects the quiet flag. Warnings go to
//! stderr; fatal errors are printed once by [`crate::cli::report`].
//! Diagnostics belong in the `log` facade, not here.

use std::fmt::Display;
use std::path::Path;

use colored::Colorize;

/// How much progress output a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// `--quiet`: warnings and progress suppressed.
    Quiet,
    Normal,
    /// `--debug`: per-step detail on stderr as well.
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over `--debug`.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        match (quiet, debug) {
            (true, _) => Verbosity::Quiet,
            (false, true) => Verbosity::Debug,
            (false, false) => Verbosity::Normal,
        }
    }

    fn shows_progress(self) -> bool {
        self != Verbosity::Quiet
    }
}

/// Progress line on stdout.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_progress() {
        println!("{}", message);
    }
}

/// Detail line on stderr, `--debug` only.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("{} {}", "[debug]".dimmed(), message);
    }
}

pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_progress() {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
}

/// Final success line on stdout.
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity.shows_progress() {
        println!("{} {}", "✓".green(), message);
    }
}

/// Highlight a path.
pub fn format_path(path: &Path) -> String {
    path.display().to_string().yellow().to_string()
}

/// One item per line, each behind `prefix`.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(prefix);
        out.push_str(&item.to_string());
    }
    out
}
