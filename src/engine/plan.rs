//! engine::plan
//!
//! Fixed step sequences for each migration kind.
//!
//! # Architecture
//!
//! A plan is the sole intermediate representation between a resolved
//! request and the collaborators that act on the filesystem. Plans are:
//! - **Deterministic**: the same request always produces the same steps
//! - **Previewable**: `--dry-run` prints them without running anything
//! - **Typed**: every step carries the absolute paths it acts on
//!
//! # Sequences
//!
//! ```text
//! application:  [check working tree] -> check project -> dependencies
//!                 -> folder structure -> api folder
//! dependencies: check project -> dependencies
//! plugin:       check project (source) -> plugin (source, destination)
//! ```
//!
//! # Invariants
//!
//! - Planning performs no I/O.
//! - Every check precedes every destructive step.
//!
//! # Example
//!
//! ```
//! use strapi_codemods::engine::plan::{Plan, PlanStep};
//! use strapi_codemods::engine::request::{MigrateOptions, MigrationKind};
//! use strapi_codemods::engine::resolve::ResolvedRequest;
//! use std::path::PathBuf;
//!
//! let resolved = ResolvedRequest {
//!     kind: MigrationKind::Dependencies,
//!     source: PathBuf::from("/srv/blog"),
//!     destination: None,
//!     options: MigrateOptions::default(),
//!     source_prompted: false,
//! };
//!
//! let plan = Plan::for_request(&resolved);
//! assert_eq!(plan.steps.len(), 2);
//! assert!(!plan.steps[0].is_destructive());
//! assert!(plan.steps[1].is_destructive());
//! ```

use std::path::PathBuf;

use super::request::MigrationKind;
use super::resolve::ResolvedRequest;
use crate::core::paths;
use crate::migrations::MigrationOp;

/// A typed plan step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Require a clean git working tree.
    CheckWorkingTree { path: PathBuf },

    /// Require a v3 project.
    CheckProjectKind { path: PathBuf },

    /// Rewrite the dependency manifest.
    MigrateDependencies { path: PathBuf },

    /// Move the application into the v4 folder layout.
    MigrateFolderStructure { path: PathBuf },

    /// Transform the API folder.
    MigrateApiFolder { path: PathBuf },

    /// Create the v4 plugin from the v3 plugin.
    MigratePlugin {
        source: PathBuf,
        destination: PathBuf,
    },
}

impl PlanStep {
    /// The migration operation this step invokes, if it is destructive.
    pub fn operation(&self) -> Option<MigrationOp> {
        match self {
            PlanStep::CheckWorkingTree { .. } | PlanStep::CheckProjectKind { .. } => None,
            PlanStep::MigrateDependencies { .. } => Some(MigrationOp::Dependencies),
            PlanStep::MigrateFolderStructure { .. } => Some(MigrationOp::ApplicationFolderStructure),
            PlanStep::MigrateApiFolder { .. } => Some(MigrationOp::ApiFolder),
            PlanStep::MigratePlugin { .. } => Some(MigrationOp::Plugin),
        }
    }

    /// Whether this step rewrites files.
    pub fn is_destructive(&self) -> bool {
        self.operation().is_some()
    }
}

impl std::fmt::Display for PlanStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStep::CheckWorkingTree { path } => {
                write!(f, "check git working tree of {}", path.display())
            }
            PlanStep::CheckProjectKind { path } => {
                write!(f, "check that {} is a Strapi v3 project", path.display())
            }
            PlanStep::MigrateDependencies { path } => {
                write!(f, "migrate dependencies of {}", path.display())
            }
            PlanStep::MigrateFolderStructure { path } => {
                write!(f, "migrate folder structure of {}", path.display())
            }
            PlanStep::MigrateApiFolder { path } => {
                write!(f, "migrate API folder of {}", path.display())
            }
            PlanStep::MigratePlugin {
                source,
                destination,
            } => write!(
                f,
                "migrate plugin {} into {}",
                source.display(),
                destination.display()
            ),
        }
    }
}

/// An ordered, all-or-nothing step sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub kind: MigrationKind,
    pub steps: Vec<PlanStep>,
}

impl Plan {
    /// Create an empty plan.
    pub fn new(kind: MigrationKind) -> Self {
        Self {
            kind,
            steps: Vec::new(),
        }
    }

    /// Append a step.
    pub fn with_step(mut self, step: PlanStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Build the fixed sequence for a resolved request.
    pub fn for_request(request: &ResolvedRequest) -> Self {
        let source = request.source.clone();

        match request.kind {
            MigrationKind::Application => {
                let mut plan = Plan::new(MigrationKind::Application);
                if !request.options.skip_working_tree_check {
                    plan = plan.with_step(PlanStep::CheckWorkingTree {
                        path: source.clone(),
                    });
                }
                plan.with_step(PlanStep::CheckProjectKind {
                    path: source.clone(),
                })
                .with_step(PlanStep::MigrateDependencies {
                    path: source.clone(),
                })
                .with_step(PlanStep::MigrateFolderStructure {
                    path: source.clone(),
                })
                .with_step(PlanStep::MigrateApiFolder { path: source })
            }

            MigrationKind::Dependencies => Plan::new(MigrationKind::Dependencies)
                .with_step(PlanStep::CheckProjectKind {
                    path: source.clone(),
                })
                .with_step(PlanStep::MigrateDependencies { path: source }),

            MigrationKind::Plugin => {
                let destination = request
                    .destination
                    .clone()
                    .unwrap_or_else(|| paths::plugin_destination(&source));
                Plan::new(MigrationKind::Plugin)
                    .with_step(PlanStep::CheckProjectKind {
                        path: source.clone(),
                    })
                    .with_step(PlanStep::MigratePlugin {
                        source,
                        destination,
                    })
            }
        }
    }

    /// Destructive operations in execution order.
    pub fn operations(&self) -> Vec<MigrationOp> {
        self.steps.iter().filter_map(PlanStep::operation).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
