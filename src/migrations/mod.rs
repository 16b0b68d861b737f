//! migrations
//!
//! The capability set of tree-rewriting operations.
//!
//! # Design
//!
//! The orchestrator never rewrites files itself. Every destructive step is
//! one call on [`MigrationOps`], identified by a stable [`MigrationOp`] name.
//! Each call takes fully resolved absolute paths and either succeeds or
//! fails with a [`MigrationError`]; there is no partial result.
//!
//! # Implementations
//!
//! - [`command::CommandMigrations`] runs an external helper program per
//!   operation, as configured under `[helpers]`.
//! - [`mock::MockMigrations`] records calls and can fail on demand.

pub mod command;
pub mod mock;

use std::path::Path;

use thiserror::Error;

/// Names of the migration operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationOp {
    /// Rewrite the dependency manifest to v4 packages.
    Dependencies,
    /// Move the application into the v4 folder layout.
    ApplicationFolderStructure,
    /// Transform the API folder (content types, controllers, routes).
    ApiFolder,
    /// Scaffold a v4 plugin from a v3 plugin tree.
    Plugin,
}

impl MigrationOp {
    /// Every operation, in the order an application migration runs them.
    pub const ALL: [MigrationOp; 4] = [
        MigrationOp::Dependencies,
        MigrationOp::ApplicationFolderStructure,
        MigrationOp::ApiFolder,
        MigrationOp::Plugin,
    ];

    /// Stable operation name.
    pub fn name(&self) -> &'static str {
        match self {
            MigrationOp::Dependencies => "dependencies",
            MigrationOp::ApplicationFolderStructure => "application-folder-structure",
            MigrationOp::ApiFolder => "api-folder",
            MigrationOp::Plugin => "plugin",
        }
    }

    /// Key of this operation's helper under `[helpers]`.
    pub fn config_key(&self) -> &'static str {
        match self {
            MigrationOp::Dependencies => "dependencies",
            MigrationOp::ApplicationFolderStructure => "application_folder_structure",
            MigrationOp::ApiFolder => "api_folder",
            MigrationOp::Plugin => "plugin",
        }
    }
}

impl std::fmt::Display for MigrationOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors from a migration operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MigrationError {
    /// No helper is bound to the operation.
    #[error("no helper configured for '{op}' (set [helpers.{}] in the config file)", .op.config_key())]
    NotConfigured { op: MigrationOp },

    /// The helper could not be started.
    #[error("failed to run '{program}': {message}")]
    Spawn { program: String, message: String },

    /// The helper ran and reported failure.
    #[error("'{program}' exited with {}", exit_description(.code))]
    Failed { program: String, code: Option<i32> },

    /// Any other failure reported by an implementation.
    #[error("{0}")]
    Other(String),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// The migration operations the orchestrator invokes.
///
/// Every method performs one irreversible filesystem transformation.
pub trait MigrationOps {
    /// Rewrite the dependency manifest at `path`.
    fn migrate_dependencies(&self, path: &Path) -> Result<(), MigrationError>;

    /// Move the application at `path` into the v4 folder layout.
    fn migrate_application_folder_structure(&self, path: &Path) -> Result<(), MigrationError>;

    /// Transform the API folder of the application at `path`.
    fn migrate_api_folder(&self, path: &Path) -> Result<(), MigrationError>;

    /// Create a v4 plugin at `destination` from the v3 plugin at `source`.
    fn migrate_plugin(&self, source: &Path, destination: &Path) -> Result<(), MigrationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable() {
        let names: Vec<_> = MigrationOp::ALL.iter().map(MigrationOp::name).collect();
        assert_eq!(
            names,
            vec![
                "dependencies",
                "application-folder-structure",
                "api-folder",
                "plugin"
            ]
        );
    }

    #[test]
    fn not_configured_names_config_key() {
        let err = MigrationError::NotConfigured {
            op: MigrationOp::ApplicationFolderStructure,
        };
        assert!(err
            .to_string()
            .contains("[helpers.application_folder_structure]"));
    }

    #[test]
    fn failed_display() {
        let err = MigrationError::Failed {
            program: "node".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "'node' exited with status 2");

        let err = MigrationError::Failed {
            program: "node".to_string(),
            code: None,
        };
        assert_eq!(err.to_string(), "'node' exited with a signal");
    }
}
