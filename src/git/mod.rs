//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. No other module imports `git2`.
//! The migrator uses it read-only, to decide whether a project can be
//! restored from version control before it is rewritten.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Working tree status
//! - In-progress operation detection (rebase, merge, ...)

mod interface;

pub use interface::{Git, GitError, InProgress, WorktreeStatus};
