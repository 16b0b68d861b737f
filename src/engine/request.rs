//! engine::request
//!
//! What one invocation asked for.

use std::path::{Path, PathBuf};

/// The three migration kinds. Exactly one runs per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationKind {
    /// Dependencies, folder structure and API folder of an application.
    Application,
    /// Only the dependency manifest of an application or plugin.
    Dependencies,
    /// A v3 plugin into a new v4 plugin tree.
    Plugin,
}

impl MigrationKind {
    pub fn name(&self) -> &'static str {
        match self {
            MigrationKind::Application => "application",
            MigrationKind::Dependencies => "dependencies",
            MigrationKind::Plugin => "plugin",
        }
    }
}

impl std::fmt::Display for MigrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller-controlled switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Do not require a clean git working tree (application only).
    pub skip_working_tree_check: bool,
}

/// A migration request as supplied by the caller.
///
/// Paths are kept exactly as given; resolution to absolute form happens in
/// [`crate::engine::resolve`]. Empty paths are treated as not supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    kind: MigrationKind,
    source_path: Option<PathBuf>,
    destination_path: Option<PathBuf>,
    options: MigrateOptions,
}

impl MigrationRequest {
    /// `migrate application [path]`
    pub fn application(path: Option<PathBuf>, options: MigrateOptions) -> Self {
        Self::new(MigrationKind::Application, path, None, options)
    }

    /// `migrate dependencies [path]`
    pub fn dependencies(path: Option<PathBuf>) -> Self {
        Self::new(
            MigrationKind::Dependencies,
            path,
            None,
            MigrateOptions::default(),
        )
    }

    /// `migrate plugin [path] [destination]`
    pub fn plugin(path: Option<PathBuf>, destination: Option<PathBuf>) -> Self {
        Self::new(
            MigrationKind::Plugin,
            path,
            destination,
            MigrateOptions::default(),
        )
    }

    fn new(
        kind: MigrationKind,
        source_path: Option<PathBuf>,
        destination_path: Option<PathBuf>,
        options: MigrateOptions,
    ) -> Self {
        Self {
            kind,
            source_path: source_path.filter(|p| !p.as_os_str().is_empty()),
            destination_path: destination_path.filter(|p| !p.as_os_str().is_empty()),
            options,
        }
    }

    pub fn kind(&self) -> MigrationKind {
        self.kind
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn destination_path(&self) -> Option<&Path> {
        self.destination_path.as_deref()
    }

    pub fn options(&self) -> MigrateOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_paths_count_as_missing() {
        let request = MigrationRequest::plugin(Some(PathBuf::new()), Some(PathBuf::from("")));
        assert_eq!(request.source_path(), None);
        assert_eq!(request.destination_path(), None);
    }

    #[test]
    fn only_application_carries_options() {
        let options = MigrateOptions {
            skip_working_tree_check: true,
        };
        let request = MigrationRequest::application(Some(PathBuf::from("app")), options);
        assert_eq!(request.kind(), MigrationKind::Application);
        assert!(request.options().skip_working_tree_check);

        let request = MigrationRequest::dependencies(None);
        assert!(!request.options().skip_working_tree_check);
    }
}
