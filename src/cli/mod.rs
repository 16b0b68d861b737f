//! cli
//!
//! Command-line interface layer for strapi-codemods.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Set up logging and load configuration
//! - Delegate to command handlers
//! - Report failures once, at the top
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] for execution. Errors travel back up as
//! `anyhow::Error` and are printed by [`report::report`].

pub mod args;
pub mod commands;
pub mod report;

pub use args::{Cli, Shell};

use crate::core::config::Config;
use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let config = Config::load(cli.config.as_deref())?;

    let ctx = engine::Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(&config),
        dry_run: false,
    };
    log::debug!("context: {:?}", ctx);

    commands::dispatch(cli.command, &ctx, &config)
}

/// Diagnostics go to stderr: `debug` with `--debug`, `warn` otherwise.
/// `RUST_LOG` overrides both.
fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(level);
    // Already initialized when embedded in tests.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
