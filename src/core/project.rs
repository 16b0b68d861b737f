//! core::project
//!
//! Project kind markers.
//!
//! A directory is a migratable v3 project when its `package.json` shows v3
//! evidence and no v4 evidence:
//!
//! - **Application**: depends on `strapi` or any `strapi-*` package.
//! - **Plugin**: carries a top-level `strapi` descriptor, or is named
//!   `strapi-plugin-*`.
//! - **Already migrated**: depends on any `@strapi/*` package.
//!
//! A tree that has been through the migration once carries `@strapi/*`
//! dependencies, so a second run is rejected here rather than re-applied.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// File holding the project markers.
pub const MANIFEST_FILE: &str = "package.json";

/// Scope every v4 package is published under.
const V4_SCOPE: &str = "@strapi/";

/// Errors from reading or classifying a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no package.json found in {}", .path.display())]
    MissingManifest { path: PathBuf },

    #[error("failed to read '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse '{}': {message}", .path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("already uses Strapi v4 packages ({})", .packages.join(", "))]
    AlreadyMigrated { packages: Vec<String> },

    #[error("no Strapi v3 dependency or plugin descriptor in package.json")]
    NoMarkers,
}

/// The kinds of v3 project the migrator recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    Application,
    Plugin,
}

impl std::fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectKind::Application => write!(f, "application"),
            ProjectKind::Plugin => write!(f, "plugin"),
        }
    }
}

/// The parts of `package.json` that carry project markers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: serde_json::Map<String, Value>,
    #[serde(default)]
    pub dev_dependencies: serde_json::Map<String, Value>,
    #[serde(default)]
    pub peer_dependencies: serde_json::Map<String, Value>,
    /// Plugin descriptor (`"strapi": { "name": ..., "kind": "plugin" }`).
    #[serde(default)]
    pub strapi: Option<Value>,
}

impl Manifest {
    /// Read `package.json` from a project directory.
    pub fn read(project: &Path) -> Result<Self, ProjectError> {
        let path = project.join(MANIFEST_FILE);
        if !path.is_file() {
            return Err(ProjectError::MissingManifest {
                path: project.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|e| ProjectError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::parse(&contents).map_err(|message| ProjectError::ParseError { path, message })
    }

    /// Parse manifest contents.
    pub fn parse(contents: &str) -> Result<Self, String> {
        serde_json::from_str(contents).map_err(|e| e.to_string())
    }

    /// All declared package names across dependency tables.
    pub fn package_names(&self) -> BTreeSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
            .collect()
    }

    /// Classify the manifest as a v3 project.
    pub fn classify(&self) -> Result<ProjectKind, ProjectError> {
        let packages = self.package_names();

        let v4: Vec<String> = packages
            .iter()
            .filter(|name| name.starts_with(V4_SCOPE))
            .map(|name| name.to_string())
            .collect();
        if !v4.is_empty() {
            return Err(ProjectError::AlreadyMigrated { packages: v4 });
        }

        let is_plugin = self.strapi.as_ref().is_some_and(Value::is_object)
            || self
                .name
                .as_deref()
                .is_some_and(|name| name.starts_with("strapi-plugin-"));
        if is_plugin {
            return Ok(ProjectKind::Plugin);
        }

        let is_application = packages
            .iter()
            .any(|name| *name == "strapi" || name.starts_with("strapi-"));
        if is_application {
            return Ok(ProjectKind::Application);
        }

        Err(ProjectError::NoMarkers)
    }
}

/// Read and classify the project at `path`.
pub fn detect(path: &Path) -> Result<ProjectKind, ProjectError> {
    Manifest::read(path)?.classify()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(json: &str) -> Result<ProjectKind, ProjectError> {
        Manifest::parse(json).unwrap().classify()
    }

    #[test]
    fn v3_application() {
        let kind = classify(
            r#"{"name": "blog", "dependencies": {"strapi": "3.6.8", "strapi-admin": "3.6.8"}}"#,
        )
        .unwrap();
        assert_eq!(kind, ProjectKind::Application);
    }

    #[test]
    fn v3_plugin_descriptor() {
        let kind = classify(
            r#"{"name": "my-plugin", "strapi": {"name": "my-plugin", "kind": "plugin"}}"#,
        )
        .unwrap();
        assert_eq!(kind, ProjectKind::Plugin);
    }

    #[test]
    fn v3_plugin_by_name() {
        let kind = classify(r#"{"name": "strapi-plugin-seo", "peerDependencies": {}}"#).unwrap();
        assert_eq!(kind, ProjectKind::Plugin);
    }

    #[test]
    fn v4_application_rejected() {
        let err = classify(r#"{"dependencies": {"@strapi/strapi": "4.0.0"}}"#).unwrap_err();
        match err {
            ProjectError::AlreadyMigrated { packages } => {
                assert_eq!(packages, vec!["@strapi/strapi".to_string()]);
            }
            other => panic!("expected AlreadyMigrated, got {other:?}"),
        }
    }

    #[test]
    fn v4_wins_over_v3_markers() {
        let err = classify(
            r#"{"dependencies": {"strapi": "3.6.8"}, "devDependencies": {"@strapi/utils": "4.0.0"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProjectError::AlreadyMigrated { .. }));
    }

    #[test]
    fn unrelated_package_rejected() {
        let err = classify(r#"{"name": "web", "dependencies": {"react": "18.0.0"}}"#).unwrap_err();
        assert!(matches!(err, ProjectError::NoMarkers));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        assert!(Manifest::parse("{ not json").is_err());
    }

    #[test]
    fn missing_manifest() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = detect(dir.path()).unwrap_err();
        assert!(matches!(err, ProjectError::MissingManifest { .. }));
    }

    #[test]
    fn detect_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"dependencies": {"strapi": "3.6.8"}}"#,
        )
        .unwrap();
        assert_eq!(detect(dir.path()).unwrap(), ProjectKind::Application);
    }
}
