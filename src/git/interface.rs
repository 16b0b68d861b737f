//! git::interface
//!
//! Read-only repository inspection on top of git2.
//!
//! The migrator never writes to a repository. It only asks two questions
//! about the project it is about to rewrite: is some git operation half
//! done, and does `git status` report anything. Both answers come from
//! [`Git`], which folds git2 failures into [`GitError`].
//!
//! # Example
//!
//! ```ignore
//! use strapi_codemods::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("./my-app"))?;
//! let status = git.worktree_status(true)?;
//! if !status.is_clean() {
//!     println!("uncommitted changes: {}", status.summary());
//! }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from repository inspection.
#[derive(Debug, Error)]
pub enum GitError {
    /// No repository contains the path.
    #[error("{} is not inside a git repository", .path.display())]
    NotARepo { path: PathBuf },

    /// The repository has no working directory to inspect.
    #[error("{} is a bare repository", .path.display())]
    BareRepo { path: PathBuf },

    /// The repository is locked by another git process.
    #[error("repository is locked: {0}")]
    Locked(String),

    /// Any other libgit2 failure.
    #[error("git: {0}")]
    Internal(String),
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        match err.code() {
            git2::ErrorCode::Locked => GitError::Locked(err.message().to_string()),
            _ => GitError::Internal(err.message().to_string()),
        }
    }
}

/// A git operation that was started but not finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InProgress {
    Rebase,
    Merge,
    CherryPick,
    Revert,
    Bisect,
    ApplyMailbox,
}

impl InProgress {
    fn from_state(state: git2::RepositoryState) -> Option<Self> {
        use git2::RepositoryState as S;
        match state {
            S::Clean => None,
            S::Rebase | S::RebaseInteractive | S::RebaseMerge => Some(InProgress::Rebase),
            S::Merge => Some(InProgress::Merge),
            S::CherryPick | S::CherryPickSequence => Some(InProgress::CherryPick),
            S::Revert | S::RevertSequence => Some(InProgress::Revert),
            S::Bisect => Some(InProgress::Bisect),
            S::ApplyMailbox | S::ApplyMailboxOrRebase => Some(InProgress::ApplyMailbox),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InProgress::Rebase => "rebase",
            InProgress::Merge => "merge",
            InProgress::CherryPick => "cherry-pick",
            InProgress::Revert => "revert",
            InProgress::Bisect => "bisect",
            InProgress::ApplyMailbox => "am",
        }
    }
}

impl std::fmt::Display for InProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts of what `git status` would report.
///
/// A file can count in more than one bucket (staged and then edited again).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    pub staged: usize,
    pub unstaged: usize,
    /// Zero unless untracked files were requested.
    pub untracked: usize,
    pub conflicted: usize,
}

impl WorktreeStatus {
    /// Nothing to report.
    pub fn is_clean(&self) -> bool {
        self.staged + self.unstaged + self.untracked + self.conflicted == 0
    }

    /// Short description such as `"2 staged, 1 untracked"`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            (self.conflicted, "conflicted"),
            (self.staged, "staged"),
            (self.unstaged, "unstaged"),
            (self.untracked, "untracked"),
        ]
        .iter()
        .filter(|(count, _)| *count > 0)
        .map(|(count, label)| format!("{count} {label}"))
        .collect();

        if parts.is_empty() {
            "no changes".to_string()
        } else {
            parts.join(", ")
        }
    }

    fn tally(&mut self, status: git2::Status) {
        if status.is_conflicted() {
            self.conflicted += 1;
            return;
        }
        if status.intersects(
            git2::Status::INDEX_NEW
                | git2::Status::INDEX_MODIFIED
                | git2::Status::INDEX_DELETED
                | git2::Status::INDEX_RENAMED
                | git2::Status::INDEX_TYPECHANGE,
        ) {
            self.staged += 1;
        }
        if status.intersects(
            git2::Status::WT_MODIFIED
                | git2::Status::WT_DELETED
                | git2::Status::WT_RENAMED
                | git2::Status::WT_TYPECHANGE,
        ) {
            self.unstaged += 1;
        }
        if status.is_wt_new() {
            self.untracked += 1;
        }
    }
}

/// Handle on the repository that contains a project.
///
/// This is the only place in the crate that touches `git2`.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("workdir", &self.repo.workdir())
            .finish()
    }
}

impl Git {
    /// Open the repository containing `path`.
    ///
    /// Searches upward from `path`, so a project nested in a monorepo is
    /// inspected through the monorepo's repository.
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo {
                path: path.to_path_buf(),
            });
        }

        Ok(Self { repo })
    }

    /// The working directory of the repository.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// The unfinished operation, if any.
    pub fn in_progress(&self) -> Option<InProgress> {
        InProgress::from_state(self.repo.state())
    }

    /// Tally the working tree. Ignored files never count.
    pub fn worktree_status(&self, include_untracked: bool) -> Result<WorktreeStatus, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(include_untracked)
            .recurse_untracked_dirs(include_untracked)
            .include_ignored(false);

        let mut status = WorktreeStatus::default();
        for entry in self.repo.statuses(Some(&mut opts))?.iter() {
            status.tally(entry.status());
        }
        Ok(status)
    }
}
