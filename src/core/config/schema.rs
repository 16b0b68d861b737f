//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing: helper programs must be
//! non-empty and helper arguments may only use the placeholders their
//! operation provides.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::migrations::MigrationOp;

/// Placeholder for the project path (single-path operations).
pub const PATH_PLACEHOLDER: &str = "{path}";
/// Placeholder for the v3 plugin path.
pub const SOURCE_PLACEHOLDER: &str = "{source}";
/// Placeholder for the v4 plugin path.
pub const DESTINATION_PLACEHOLDER: &str = "{destination}";

/// Top-level configuration.
///
/// # Example
///
/// ```toml
/// interactive = true
///
/// [working_tree]
/// include_untracked = true
/// skip_check = false
///
/// [helpers.dependencies]
/// program = "node"
/// args = ["./v4/migrate-dependencies.js", "{path}"]
///
/// [helpers.plugin]
/// program = "node"
/// args = ["./v4/migrate-plugin.js", "{source}", "{destination}"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Default interactive mode
    pub interactive: Option<bool>,

    /// Working tree check settings
    pub working_tree: Option<WorkingTreeConfig>,

    /// External programs bound to each migration operation
    pub helpers: Option<HelpersConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(helpers) = &self.helpers {
            helpers.validate()?;
        }
        Ok(())
    }
}

/// Working tree check settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorkingTreeConfig {
    /// Whether untracked files make the tree dirty (default: true)
    pub include_untracked: Option<bool>,

    /// Skip the check unless the flag says otherwise (default: false)
    pub skip_check: Option<bool>,
}

/// One external helper per migration operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HelpersConfig {
    pub dependencies: Option<HelperCommand>,
    pub application_folder_structure: Option<HelperCommand>,
    pub api_folder: Option<HelperCommand>,
    pub plugin: Option<HelperCommand>,
}

impl HelpersConfig {
    /// Look up the helper bound to an operation.
    pub fn get(&self, op: MigrationOp) -> Option<&HelperCommand> {
        match op {
            MigrationOp::Dependencies => self.dependencies.as_ref(),
            MigrationOp::ApplicationFolderStructure => self.application_folder_structure.as_ref(),
            MigrationOp::ApiFolder => self.api_folder.as_ref(),
            MigrationOp::Plugin => self.plugin.as_ref(),
        }
    }

    /// Validate every configured helper against its operation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for op in MigrationOp::ALL {
            if let Some(helper) = self.get(op) {
                helper.validate(op)?;
            }
        }
        Ok(())
    }
}

/// An external program plus its argument template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HelperCommand {
    /// Program to run (looked up on `PATH` when not a path)
    pub program: String,

    /// Arguments; placeholders are substituted per invocation
    #[serde(default)]
    pub args: Vec<String>,
}

impl HelperCommand {
    /// Placeholders an operation provides to its helper.
    pub fn placeholders_for(op: MigrationOp) -> &'static [&'static str] {
        match op {
            MigrationOp::Plugin => &[SOURCE_PLACEHOLDER, DESTINATION_PLACEHOLDER],
            _ => &[PATH_PLACEHOLDER],
        }
    }

    /// Validate the helper for use with `op`.
    pub fn validate(&self, op: MigrationOp) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "helpers.{}: program must not be empty",
                op.config_key()
            )));
        }

        let allowed = Self::placeholders_for(op);
        for arg in &self.args {
            for placeholder in placeholders_in(arg) {
                if !allowed.contains(&placeholder) {
                    return Err(ConfigError::InvalidValue(format!(
                        "helpers.{}: unknown placeholder '{}', expected one of: {}",
                        op.config_key(),
                        placeholder,
                        allowed.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Find every `{name}` token in an argument.
///
/// Only lowercase identifiers count, so braces in inline JSON or shell
/// snippets pass through untouched.
fn placeholders_in(arg: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = arg;
    while let Some(start) = rest.find('{') {
        let tail = &rest[start..];
        match placeholder_len(tail) {
            Some(len) => {
                found.push(&tail[..len]);
                rest = &tail[len..];
            }
            None => rest = &tail[1..],
        }
    }
    found
}

/// Length of the `{identifier}` token at the start of `text`, if any.
pub(crate) fn placeholder_len(text: &str) -> Option<usize> {
    let name = text.strip_prefix('{')?;
    let end = name.find('}')?;
    let ident = &name[..end];
    let valid = !ident.is_empty() && ident.bytes().all(|b| b.is_ascii_lowercase() || b == b'_');
    valid.then_some(end + 2)
}
