//! engine::runner
//!
//! The migration dispatcher: the single entry point for running a migration.
//!
//! # Lifecycle
//!
//! ```text
//! Idle -> ValidatingPath -> ApplicationFlow | DependenciesFlow | PluginFlow -> Done
//!                  \______________________________________________________/-> Failed
//! ```
//!
//! 1. **ValidatingPath**: a supplied primary path must exist.
//! 2. **Flow**: missing fields are prompted for (a prompted path is
//!    validated right away), the fixed plan is built, and each step runs
//!    in order.
//! 3. The first error moves the dispatcher to `Failed` and is returned.
//!    Later steps never run and nothing is rolled back; the working tree
//!    check exists so that git can undo a half-applied migration.
//!
//! # Example
//!
//! ```ignore
//! let mut dispatcher = MigrationDispatcher::new(&ctx, collaborators);
//! dispatcher.run(&MigrationRequest::dependencies(Some("./blog".into())))?;
//! ```

use std::path::Path;

use super::error::MigrateError;
use super::gate::{ensure_path_exists, ProjectKindValidator, WorkingTreeGuard};
use super::plan::{Plan, PlanStep};
use super::request::{MigrationKind, MigrationRequest};
use super::resolve::{resolve, ResolvedRequest};
use super::Context;
use crate::core::paths;
use crate::migrations::{MigrationOp, MigrationOps};
use crate::ui::output;
use crate::ui::prompts::Prompter;

/// Dispatcher states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    ValidatingPath,
    ApplicationFlow,
    DependenciesFlow,
    PluginFlow,
    Done,
    Failed,
}

impl From<MigrationKind> for FlowState {
    fn from(kind: MigrationKind) -> Self {
        match kind {
            MigrationKind::Application => FlowState::ApplicationFlow,
            MigrationKind::Dependencies => FlowState::DependenciesFlow,
            MigrationKind::Plugin => FlowState::PluginFlow,
        }
    }
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Every step ran.
    Completed(Plan),
    /// Dry run: the plan was built but nothing ran.
    Planned(Plan),
}

impl MigrationOutcome {
    pub fn plan(&self) -> &Plan {
        match self {
            MigrationOutcome::Completed(plan) | MigrationOutcome::Planned(plan) => plan,
        }
    }
}

/// The collaborators a run calls into.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub prompter: &'a dyn Prompter,
    pub working_tree: &'a dyn WorkingTreeGuard,
    pub project_kind: &'a dyn ProjectKindValidator,
    pub migrations: &'a dyn MigrationOps,
}

/// Runs one migration request through its flow.
pub struct MigrationDispatcher<'a> {
    ctx: &'a Context,
    collaborators: Collaborators<'a>,
    state: FlowState,
    history: Vec<FlowState>,
}

impl<'a> MigrationDispatcher<'a> {
    pub fn new(ctx: &'a Context, collaborators: Collaborators<'a>) -> Self {
        Self {
            ctx,
            collaborators,
            state: FlowState::Idle,
            history: vec![FlowState::Idle],
        }
    }

    /// Current state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Every state entered so far, starting with `Idle`.
    pub fn history(&self) -> &[FlowState] {
        &self.history
    }

    /// Run `request` to completion or to its first failure.
    pub fn run(&mut self, request: &MigrationRequest) -> Result<MigrationOutcome, MigrateError> {
        match self.drive(request) {
            Ok(outcome) => {
                self.transition(FlowState::Done);
                Ok(outcome)
            }
            Err(err) => {
                log::debug!("migration failed in {:?}: {}", self.state, err);
                self.transition(FlowState::Failed);
                Err(err)
            }
        }
    }

    fn drive(&mut self, request: &MigrationRequest) -> Result<MigrationOutcome, MigrateError> {
        let base = self.ctx.base_dir()?;

        self.transition(FlowState::ValidatingPath);
        if let Some(source) = request.source_path() {
            ensure_path_exists(&paths::absolutize(source, &base))?;
        }

        self.transition(request.kind().into());
        let resolved = resolve(request, self.collaborators.prompter, &base)?;
        if resolved.source_prompted {
            ensure_path_exists(&resolved.source)?;
        }

        let plan = Plan::for_request(&resolved);
        log::debug!("plan for {}: {:?}", plan.kind, plan.steps);

        if self.ctx.dry_run {
            self.preview(&plan);
            return Ok(MigrationOutcome::Planned(plan));
        }

        self.flag_existing_destination(&resolved);

        for step in &plan.steps {
            self.execute(step)?;
        }

        Ok(MigrationOutcome::Completed(plan))
    }

    fn execute(&self, step: &PlanStep) -> Result<(), MigrateError> {
        let verbosity = self.ctx.verbosity();
        log::info!("{}", step);
        if step.is_destructive() {
            output::print(format!("Running: {}", step), verbosity);
        }

        let c = &self.collaborators;
        let (op, result) = match step {
            PlanStep::CheckWorkingTree { path } => return c.working_tree.ensure_clean(path),
            PlanStep::CheckProjectKind { path } => return c.project_kind.validate(path),
            PlanStep::MigrateDependencies { path } => (
                MigrationOp::Dependencies,
                c.migrations.migrate_dependencies(path),
            ),
            PlanStep::MigrateFolderStructure { path } => (
                MigrationOp::ApplicationFolderStructure,
                c.migrations.migrate_application_folder_structure(path),
            ),
            PlanStep::MigrateApiFolder { path } => {
                (MigrationOp::ApiFolder, c.migrations.migrate_api_folder(path))
            }
            PlanStep::MigratePlugin {
                source,
                destination,
            } => (
                MigrationOp::Plugin,
                c.migrations.migrate_plugin(source, destination),
            ),
        };

        result.map_err(|source| MigrateError::TransformationFailure { op, source })?;
        output::debug(format!("finished: {}", step), verbosity);
        Ok(())
    }

    fn preview(&self, plan: &Plan) {
        let verbosity = self.ctx.verbosity();
        output::print(
            format!("Dry run: {} migration would run these steps:", plan.kind),
            verbosity,
        );
        let lines: Vec<String> = plan
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect();
        output::print(output::format_list(&lines, "  "), verbosity);
    }

    /// Warn when the plugin destination already has content.
    fn flag_existing_destination(&self, resolved: &ResolvedRequest) {
        let Some(destination) = resolved.destination.as_deref() else {
            return;
        };
        if let Some(warning) = destination_warning(destination) {
            log::warn!("plugin destination {} is occupied", destination.display());
            output::warn(warning, self.ctx.verbosity());
        }
    }

    fn transition(&mut self, next: FlowState) {
        log::debug!("dispatcher: {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
    }
}

/// Describe what already occupies a plugin destination, if anything.
fn destination_warning(destination: &Path) -> Option<String> {
    if destination.is_file() {
        Some(format!(
            "{} already exists as a file; the plugin helper decides whether to replace it",
            output::format_path(destination)
        ))
    } else if paths::is_non_empty_dir(destination) {
        Some(format!(
            "{} already exists and is not empty; the plugin helper decides what happens to its contents",
            output::format_path(destination)
        ))
    } else {
        None
    }
}
