//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Turns its arguments into an engine request
//! 2. Calls the engine to execute it
//! 3. Formats and displays the outcome
//!
//! Handlers do NOT touch the project directly.

mod completion;
mod migrate;

pub use completion::{completion, write_completion};
pub use migrate::{migrate, request_for};

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::engine::Context;
use anyhow::Result;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context, config: &Config) -> Result<()> {
    match command {
        Command::Migrate { dry_run, target } => {
            let ctx = Context {
                dry_run,
                ..ctx.clone()
            };
            migrate::migrate(target, &ctx, config)
        }
        Command::Completion { shell } => completion::completion(shell),
    }
}
