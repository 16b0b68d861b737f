//! engine
//!
//! Orchestrates a migration: Validate -> Resolve -> Plan -> Execute.
//!
//! # Architecture
//!
//! The engine is the single coordinator between the CLI and the
//! collaborators that touch the filesystem:
//!
//! 1. **Validate**: a supplied primary path must exist
//! 2. **Resolve**: missing fields are prompted for, every path made absolute
//! 3. **Plan**: the fixed step sequence for the migration kind
//! 4. **Execute**: run the steps in order, stopping at the first failure
//!
//! # Invariants
//!
//! - Exactly one migration kind runs per invocation.
//! - No destructive step runs before every check of its plan has passed.
//! - A failure leaves earlier steps applied; nothing is rolled back.
//!
//! # Example
//!
//! ```ignore
//! use strapi_codemods::engine::{Collaborators, Context, MigrationDispatcher, MigrationRequest};
//!
//! let ctx = Context::default();
//! let mut dispatcher = MigrationDispatcher::new(&ctx, collaborators);
//! let outcome = dispatcher.run(&MigrationRequest::plugin(Some("./seo".into()), None))?;
//! ```

pub mod error;
pub mod gate;
pub mod plan;
pub mod request;
pub mod resolve;
pub mod runner;

use std::path::PathBuf;

pub use error::MigrateError;
pub use gate::{GitWorkingTreeGuard, ManifestValidator, ProjectKindValidator, WorkingTreeGuard};
pub use plan::{Plan, PlanStep};
pub use request::{MigrateOptions, MigrationKind, MigrationRequest};
pub use resolve::ResolvedRequest;
pub use runner::{Collaborators, FlowState, MigrationDispatcher, MigrationOutcome};

use crate::ui::output::Verbosity;

/// Execution context for a migration run.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Directory relative paths resolve against (defaults to the process cwd).
    pub cwd: Option<PathBuf>,
    /// Enable debug output.
    pub debug: bool,
    /// Suppress progress output.
    pub quiet: bool,
    /// Whether missing parameters may be prompted for.
    pub interactive: bool,
    /// Build and print the plan without running it.
    pub dry_run: bool,
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    /// The directory relative paths resolve against.
    pub fn base_dir(&self) -> Result<PathBuf, MigrateError> {
        match &self.cwd {
            Some(cwd) if cwd.is_absolute() => Ok(cwd.clone()),
            Some(cwd) => {
                let current = std::env::current_dir().map_err(MigrateError::WorkingDirectory)?;
                Ok(crate::core::paths::absolutize(cwd, &current))
            }
            None => std::env::current_dir().map_err(MigrateError::WorkingDirectory),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_cwd_is_used_as_is() {
        let ctx = Context {
            cwd: Some(PathBuf::from("/srv")),
            ..Context::default()
        };
        assert_eq!(ctx.base_dir().unwrap(), PathBuf::from("/srv"));
    }

    #[test]
    fn missing_cwd_falls_back_to_process_dir() {
        let ctx = Context::default();
        assert_eq!(ctx.base_dir().unwrap(), std::env::current_dir().unwrap());
    }

    #[test]
    fn verbosity_prefers_quiet() {
        let ctx = Context {
            quiet: true,
            debug: true,
            ..Context::default()
        };
        assert_eq!(ctx.verbosity(), Verbosity::Quiet);
    }
}
