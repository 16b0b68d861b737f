//! migrations::command
//!
//! Migration operations backed by external helper programs.
//!
//! Each operation is bound to a [`HelperCommand`] in the `[helpers]` config
//! table. Placeholders in the argument template are replaced with the
//! resolved paths, the program runs with the project (or plugin source) as
//! its working directory, and its exit status decides success. Helper
//! output is passed straight through to the terminal.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use super::{MigrationError, MigrationOp, MigrationOps};
use crate::core::config::schema::{
    placeholder_len, DESTINATION_PLACEHOLDER, PATH_PLACEHOLDER, SOURCE_PLACEHOLDER,
};
use crate::core::config::{HelperCommand, HelpersConfig};

/// Runs configured helper programs.
#[derive(Debug, Clone, Default)]
pub struct CommandMigrations {
    helpers: HelpersConfig,
}

impl CommandMigrations {
    /// Create from the `[helpers]` config table.
    pub fn new(helpers: HelpersConfig) -> Self {
        Self { helpers }
    }

    /// Build the argument list for one invocation.
    ///
    /// Each argument is scanned once, left to right, so text coming from a
    /// substituted path is never itself substituted. Paths are passed as
    /// raw OS strings.
    pub fn render_args(helper: &HelperCommand, vars: &[(&str, &Path)]) -> Vec<OsString> {
        helper
            .args
            .iter()
            .map(|arg| {
                let mut rendered = OsString::new();
                let mut rest = arg.as_str();
                while let Some(start) = rest.find('{') {
                    rendered.push(&rest[..start]);
                    let tail = &rest[start..];
                    let token = placeholder_len(tail).map(|len| &tail[..len]);
                    match token.and_then(|t| vars.iter().find(|(name, _)| *name == t)) {
                        Some((name, path)) => {
                            rendered.push(path.as_os_str());
                            rest = &tail[name.len()..];
                        }
                        None => {
                            rendered.push("{");
                            rest = &tail[1..];
                        }
                    }
                }
                rendered.push(rest);
                rendered
            })
            .collect()
    }

    fn run(
        &self,
        op: MigrationOp,
        workdir: &Path,
        vars: &[(&str, &Path)],
    ) -> Result<(), MigrationError> {
        let helper = self
            .helpers
            .get(op)
            .ok_or(MigrationError::NotConfigured { op })?;
        let args = Self::render_args(helper, vars);

        log::info!("running helper for {}: {} {:?}", op, helper.program, args);

        let status = Command::new(&helper.program)
            .args(&args)
            .current_dir(workdir)
            .status()
            .map_err(|e| MigrationError::Spawn {
                program: helper.program.clone(),
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(MigrationError::Failed {
                program: helper.program.clone(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

impl MigrationOps for CommandMigrations {
    fn migrate_dependencies(&self, path: &Path) -> Result<(), MigrationError> {
        self.run(MigrationOp::Dependencies, path, &[(PATH_PLACEHOLDER, path)])
    }

    fn migrate_application_folder_structure(&self, path: &Path) -> Result<(), MigrationError> {
        self.run(
            MigrationOp::ApplicationFolderStructure,
            path,
            &[(PATH_PLACEHOLDER, path)],
        )
    }

    fn migrate_api_folder(&self, path: &Path) -> Result<(), MigrationError> {
        self.run(MigrationOp::ApiFolder, path, &[(PATH_PLACEHOLDER, path)])
    }

    fn migrate_plugin(&self, source: &Path, destination: &Path) -> Result<(), MigrationError> {
        self.run(
            MigrationOp::Plugin,
            source,
            &[
                (SOURCE_PLACEHOLDER, source),
                (DESTINATION_PLACEHOLDER, destination),
            ],
        )
    }
}
