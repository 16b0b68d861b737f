//! migrate command - Run one of the three migrations

use anyhow::Result;

use crate::cli::args::MigrateCommand;
use crate::core::config::Config;
use crate::engine::{
    Collaborators, Context, GitWorkingTreeGuard, ManifestValidator, MigrateOptions,
    MigrationDispatcher, MigrationOutcome, MigrationRequest, PlanStep,
};
use crate::migrations::command::CommandMigrations;
use crate::ui::output;
use crate::ui::prompts::prompter_for;

/// Translate the parsed subcommand into a request.
///
/// The skip flag is on when given on the command line or set in the config.
pub fn request_for(target: MigrateCommand, config: &Config) -> MigrationRequest {
    match target {
        MigrateCommand::Application {
            path,
            skip_working_tree_check,
        } => MigrationRequest::application(
            path,
            MigrateOptions {
                skip_working_tree_check: skip_working_tree_check
                    || config.skip_working_tree_check(),
            },
        ),
        MigrateCommand::Dependencies { path } => MigrationRequest::dependencies(path),
        MigrateCommand::Plugin {
            path,
            destination_path,
        } => MigrationRequest::plugin(path, destination_path),
    }
}

/// Run a migration with the real collaborators.
pub fn migrate(target: MigrateCommand, ctx: &Context, config: &Config) -> Result<()> {
    let request = request_for(target, config);

    let prompter = prompter_for(ctx.interactive);
    let working_tree = GitWorkingTreeGuard::new(config.include_untracked());
    let migrations = CommandMigrations::new(config.helpers());
    let collaborators = Collaborators {
        prompter: prompter.as_ref(),
        working_tree: &working_tree,
        project_kind: &ManifestValidator,
        migrations: &migrations,
    };

    let mut dispatcher = MigrationDispatcher::new(ctx, collaborators);
    let verbosity = ctx.verbosity();

    match dispatcher.run(&request)? {
        MigrationOutcome::Completed(plan) => {
            let destination = plan.steps.iter().find_map(|step| match step {
                PlanStep::MigratePlugin { destination, .. } => Some(destination),
                _ => None,
            });
            match destination {
                Some(destination) => output::success(
                    format!("Plugin migrated to {}", output::format_path(destination)),
                    verbosity,
                ),
                None => output::success(format!("{} migration complete", plan.kind), verbosity),
            }
        }
        MigrationOutcome::Planned(_) => {
            output::print("Dry run: nothing was changed.", verbosity);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::schema::{GlobalConfig, WorkingTreeConfig};
    use crate::engine::MigrationKind;
    use std::path::PathBuf;

    #[test]
    fn config_can_default_the_skip_flag() {
        let config = Config::from_global(GlobalConfig {
            working_tree: Some(WorkingTreeConfig {
                include_untracked: None,
                skip_check: Some(true),
            }),
            ..GlobalConfig::default()
        })
        .unwrap();

        let request = request_for(
            MigrateCommand::Application {
                path: None,
                skip_working_tree_check: false,
            },
            &config,
        );
        assert!(request.options().skip_working_tree_check);
    }

    #[test]
    fn plugin_arguments_pass_through() {
        let request = request_for(
            MigrateCommand::Plugin {
                path: Some(PathBuf::from("seo")),
                destination_path: None,
            },
            &Config::default(),
        );
        assert_eq!(request.kind(), MigrationKind::Plugin);
        assert_eq!(request.source_path(), Some(PathBuf::from("seo").as_path()));
        assert_eq!(request.destination_path(), None);
    }
}
