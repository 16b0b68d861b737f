//! core::paths
//!
//! Centralized path resolution for migration targets.
//!
//! # Invariants
//!
//! - Every path handed to a guard or a migration helper is absolute.
//! - Resolution is lexical: `.` and `..` are folded and trailing separators
//!   dropped, without touching the filesystem (the plugin destination may
//!   not exist yet, so `canonicalize` is not an option).
//!
//! # Example
//!
//! ```
//! use strapi_codemods::core::paths::{absolutize, plugin_destination};
//! use std::path::{Path, PathBuf};
//!
//! let source = absolutize(Path::new("plugins/../my-plugin/"), Path::new("/work"));
//! assert_eq!(source, PathBuf::from("/work/my-plugin"));
//! assert_eq!(plugin_destination(&source), PathBuf::from("/work/my-plugin-v4"));
//! ```

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Suffix appended to a v3 plugin path to name its default v4 destination.
pub const V4_SUFFIX: &str = "-v4";

/// Resolve `path` against `base` and normalize it lexically.
///
/// Absolute inputs ignore `base`. `..` never climbs above the root.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // pop() is a no-op at the root
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Default destination for a migrated plugin: the source path plus `-v4`.
///
/// `source` is expected to be absolute already.
pub fn plugin_destination(source: &Path) -> PathBuf {
    let mut raw: OsString = source.as_os_str().to_os_string();
    raw.push(V4_SUFFIX);
    PathBuf::from(raw)
}

/// Check whether `path` is an existing directory with at least one entry.
pub fn is_non_empty_dir(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_joins_base() {
        assert_eq!(
            absolutize(Path::new("app"), Path::new("/home/dev")),
            PathBuf::from("/home/dev/app")
        );
    }

    #[test]
    fn absolute_path_ignores_base() {
        assert_eq!(
            absolutize(Path::new("/srv/app"), Path::new("/home/dev")),
            PathBuf::from("/srv/app")
        );
    }

    #[test]
    fn dots_are_folded() {
        assert_eq!(
            absolutize(Path::new("./a/./b/../c"), Path::new("/root")),
            PathBuf::from("/root/a/c")
        );
    }

    #[test]
    fn parent_never_escapes_root() {
        assert_eq!(
            absolutize(Path::new("../../.."), Path::new("/x")),
            PathBuf::from("/")
        );
    }

    #[test]
    fn trailing_separator_is_dropped() {
        assert_eq!(
            absolutize(Path::new("/tmp/my-plugin/"), Path::new("/")),
            PathBuf::from("/tmp/my-plugin")
        );
    }

    #[test]
    fn destination_appends_suffix() {
        assert_eq!(
            plugin_destination(Path::new("/tmp/my-plugin")),
            PathBuf::from("/tmp/my-plugin-v4")
        );
    }

    #[test]
    fn non_empty_dir_detection() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(!is_non_empty_dir(dir.path()));
        std::fs::write(dir.path().join("index.js"), "").unwrap();
        assert!(is_non_empty_dir(dir.path()));
        assert!(!is_non_empty_dir(&dir.path().join("missing")));
    }
}
