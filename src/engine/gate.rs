//! engine::gate
//!
//! Preconditions checked before any destructive step.
//!
//! # Gates
//!
//! - [`ensure_path_exists`]: the primary path exists.
//! - [`WorkingTreeGuard`]: the project can be restored from git.
//! - [`ProjectKindValidator`]: the project is a v3 application or plugin.
//!
//! The guard and validator are traits so the dispatcher can be driven by
//! test doubles; [`GitWorkingTreeGuard`] and [`ManifestValidator`] are the
//! real implementations.
//!
//! # Invariants
//!
//! - Gates never modify the filesystem.
//! - A failed gate is always a typed [`MigrateError`], never a panic.

use std::path::Path;

use super::error::MigrateError;
use crate::core::project;
use crate::git::{Git, GitError};

/// Fail with [`MigrateError::PathNotFound`] unless `path` exists.
///
/// `path` must already be absolute so the error names the resolved path.
pub fn ensure_path_exists(path: &Path) -> Result<(), MigrateError> {
    if path.exists() {
        Ok(())
    } else {
        Err(MigrateError::PathNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Checks that a project has no uncommitted changes.
pub trait WorkingTreeGuard {
    fn ensure_clean(&self, path: &Path) -> Result<(), MigrateError>;
}

/// Checks that a path holds a v3 project.
pub trait ProjectKindValidator {
    fn validate(&self, path: &Path) -> Result<(), MigrateError>;
}

/// Working tree guard backed by the repository's git status.
#[derive(Debug, Clone, Copy)]
pub struct GitWorkingTreeGuard {
    include_untracked: bool,
}

impl GitWorkingTreeGuard {
    pub fn new(include_untracked: bool) -> Self {
        Self { include_untracked }
    }
}

impl Default for GitWorkingTreeGuard {
    fn default() -> Self {
        Self::new(true)
    }
}

impl WorkingTreeGuard for GitWorkingTreeGuard {
    fn ensure_clean(&self, path: &Path) -> Result<(), MigrateError> {
        let git = match Git::open(path) {
            Ok(git) => git,
            Err(GitError::NotARepo { .. }) => {
                log::warn!(
                    "{} is not inside a git repository; skipping working tree check",
                    path.display()
                );
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if let Some(operation) = git.in_progress() {
            return Err(MigrateError::DirtyWorkingTree {
                path: path.to_path_buf(),
                details: format!("{} in progress", operation),
            });
        }

        let status = git.worktree_status(self.include_untracked)?;
        if status.is_clean() {
            log::debug!("working tree at {} is clean", path.display());
            Ok(())
        } else {
            Err(MigrateError::DirtyWorkingTree {
                path: path.to_path_buf(),
                details: status.summary(),
            })
        }
    }
}

/// Project kind validator that inspects `package.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestValidator;

impl ProjectKindValidator for ManifestValidator {
    fn validate(&self, path: &Path) -> Result<(), MigrateError> {
        let kind = project::detect(path).map_err(|err| MigrateError::InvalidProjectKind {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        log::debug!("{} is a v3 {}", path.display(), kind);
        Ok(())
    }
}
