//! engine::error
//!
//! The failure taxonomy of a migration run.
//!
//! Every variant is fatal to the invocation. Nothing is recovered locally
//! or retried; errors propagate to the single reporting boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitError;
use crate::migrations::{MigrationError, MigrationOp};
use crate::ui::prompts::PromptError;

/// Errors from a migration run.
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The primary path does not exist.
    #[error("{} does not exist", .path.display())]
    PathNotFound { path: PathBuf },

    /// The project has uncommitted changes.
    #[error("the git working tree at {} has uncommitted changes ({details})", .path.display())]
    DirtyWorkingTree { path: PathBuf, details: String },

    /// The path is not a migratable v3 project.
    #[error("{} is not a Strapi v3 application or plugin: {reason}", .path.display())]
    InvalidProjectKind { path: PathBuf, reason: String },

    /// A destructive step failed.
    #[error("migration step '{op}' failed: {source}")]
    TransformationFailure {
        op: MigrationOp,
        #[source]
        source: MigrationError,
    },

    /// A parameter could not be collected.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The repository could not be inspected.
    #[error(transparent)]
    Git(#[from] GitError),

    /// The current directory could not be determined.
    #[error("cannot determine the current directory: {0}")]
    WorkingDirectory(#[source] std::io::Error),
}

impl MigrateError {
    /// Follow-up advice printed under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            MigrateError::DirtyWorkingTree { .. } => Some(
                "Commit or stash your changes so the migration can be reverted with git, \
                 or pass --skip-working-tree-check to run anyway.",
            ),
            MigrateError::TransformationFailure { .. } => Some(
                "Steps that already ran were not rolled back. Restore the project from \
                 version control (for example `git checkout -- . && git clean -fd`) \
                 before running the migration again.",
            ),
            MigrateError::InvalidProjectKind { .. } => Some(
                "Point the command at the root of a Strapi v3 project (the folder \
                 containing its package.json).",
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_not_found_names_path() {
        let err = MigrateError::PathNotFound {
            path: PathBuf::from("/tmp/missing"),
        };
        assert_eq!(err.to_string(), "/tmp/missing does not exist");
        assert!(err.hint().is_none());
    }

    #[test]
    fn transformation_failure_points_at_version_control() {
        let err = MigrateError::TransformationFailure {
            op: MigrationOp::ApiFolder,
            source: MigrationError::Other("bad route file".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "migration step 'api-folder' failed: bad route file"
        );
        assert!(err.hint().unwrap().contains("version control"));
    }

    #[test]
    fn prompt_errors_are_transparent() {
        let err = MigrateError::from(PromptError::Cancelled);
        assert_eq!(err.to_string(), "prompt cancelled by user");
    }
}
