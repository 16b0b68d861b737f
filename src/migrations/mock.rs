//! migrations::mock
//!
//! Mock migration operations for deterministic testing.
//!
//! # Design
//!
//! The mock records every call in order and can be configured to fail one
//! operation, so tests can check step ordering and fail-fast behavior
//! without touching the filesystem.
//!
//! # Example
//!
//! ```
//! use strapi_codemods::migrations::mock::{MockCall, MockMigrations};
//! use strapi_codemods::migrations::{MigrationError, MigrationOp, MigrationOps};
//! use std::path::Path;
//!
//! let ops = MockMigrations::new()
//!     .fail_on(MigrationOp::ApiFolder, MigrationError::Other("boom".into()));
//!
//! ops.migrate_dependencies(Path::new("/app")).unwrap();
//! assert!(ops.migrate_api_folder(Path::new("/app")).is_err());
//! assert_eq!(ops.ops(), vec![MigrationOp::Dependencies, MigrationOp::ApiFolder]);
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{MigrationError, MigrationOp, MigrationOps};

/// Recorded call for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Dependencies { path: PathBuf },
    ApplicationFolderStructure { path: PathBuf },
    ApiFolder { path: PathBuf },
    Plugin { source: PathBuf, destination: PathBuf },
}

impl MockCall {
    /// The operation this call invoked.
    pub fn op(&self) -> MigrationOp {
        match self {
            MockCall::Dependencies { .. } => MigrationOp::Dependencies,
            MockCall::ApplicationFolderStructure { .. } => MigrationOp::ApplicationFolderStructure,
            MockCall::ApiFolder { .. } => MigrationOp::ApiFolder,
            MockCall::Plugin { .. } => MigrationOp::Plugin,
        }
    }
}

/// Mock migration operations.
///
/// Clones share state, so a test can keep a handle while the dispatcher
/// borrows another.
#[derive(Debug, Clone, Default)]
pub struct MockMigrations {
    inner: Arc<Mutex<MockInner>>,
}

#[derive(Debug, Default)]
struct MockInner {
    fail_on: Option<(MigrationOp, MigrationError)>,
    calls: Vec<MockCall>,
}

impl MockMigrations {
    /// Create a mock where every operation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the mock to fail `op` with `error`.
    pub fn fail_on(self, op: MigrationOp, error: MigrationError) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some((op, error));
        }
        self
    }

    /// Get all recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Get the operations invoked, in order.
    pub fn ops(&self) -> Vec<MigrationOp> {
        self.calls().iter().map(MockCall::op).collect()
    }

    fn record(&self, call: MockCall) -> Result<(), MigrationError> {
        let mut inner = self.inner.lock().unwrap();
        let op = call.op();
        inner.calls.push(call);
        match &inner.fail_on {
            Some((fail_op, error)) if *fail_op == op => Err(error.clone()),
            _ => Ok(()),
        }
    }
}

impl MigrationOps for MockMigrations {
    fn migrate_dependencies(&self, path: &Path) -> Result<(), MigrationError> {
        self.record(MockCall::Dependencies {
            path: path.to_path_buf(),
        })
    }

    fn migrate_application_folder_structure(&self, path: &Path) -> Result<(), MigrationError> {
        self.record(MockCall::ApplicationFolderStructure {
            path: path.to_path_buf(),
        })
    }

    fn migrate_api_folder(&self, path: &Path) -> Result<(), MigrationError> {
        self.record(MockCall::ApiFolder {
            path: path.to_path_buf(),
        })
    }

    fn migrate_plugin(&self, source: &Path, destination: &Path) -> Result<(), MigrationError> {
        self.record(MockCall::Plugin {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
        })
    }
}
