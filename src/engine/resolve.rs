//! engine::resolve
//!
//! Completes a [`MigrationRequest`] into a [`ResolvedRequest`].
//!
//! # Pipeline
//!
//! Each migration kind declares its optional fields as an ordered list of
//! prompt descriptors. A field supplied on the command line is kept as-is
//! and its descriptor is skipped; a missing field is asked for. The plugin
//! destination defaults to `<absolute source>-v4`, where the source is
//! either the supplied argument or the answer given one step earlier.
//!
//! # Invariants
//!
//! - The resolved source is non-empty and absolute.
//! - The resolved destination (plugin only) is absolute.
//! - Resolution never touches the filesystem.

use std::path::{Path, PathBuf};

use super::error::MigrateError;
use super::request::{MigrateOptions, MigrationKind, MigrationRequest};
use crate::core::paths;
use crate::ui::prompts::{prompt_user, PromptDescriptor, PromptError, PromptField, Prompter};

/// A request with every field filled in and every path absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub kind: MigrationKind,
    /// Absolute path of the v3 project or plugin.
    pub source: PathBuf,
    /// Absolute path of the v4 plugin (plugin migrations only).
    pub destination: Option<PathBuf>,
    pub options: MigrateOptions,
    /// Whether `source` came from a prompt rather than the command line.
    pub source_prompted: bool,
}

/// The prompt descriptors for a request, in the order they are asked.
pub fn descriptors<'a>(request: &'a MigrationRequest, base: &'a Path) -> Vec<PromptDescriptor<'a>> {
    let ask_source = request.source_path().is_none();

    match request.kind() {
        MigrationKind::Application => vec![PromptDescriptor::input(
            PromptField::SourcePath,
            "Enter the path to your Strapi application",
        )
        .when(ask_source)],

        MigrationKind::Dependencies => vec![PromptDescriptor::input(
            PromptField::SourcePath,
            "Enter the path to your Strapi application or plugin",
        )
        .when(ask_source)],

        MigrationKind::Plugin => vec![
            PromptDescriptor::input(
                PromptField::SourcePath,
                "Enter the path to your v3 Strapi plugin",
            )
            .when(ask_source),
            PromptDescriptor::input(
                PromptField::DestinationPath,
                "Where would you like to create your v4 plugin?",
            )
            .when(request.destination_path().is_none())
            .with_default(move |answers| {
                let source = request
                    .source_path()
                    .map(Path::to_path_buf)
                    .or_else(|| answers.get(PromptField::SourcePath).map(PathBuf::from))?;
                let destination = paths::plugin_destination(&paths::absolutize(&source, base));
                Some(destination.display().to_string())
            }),
        ],
    }
}

/// Fill in missing fields by prompting and make every path absolute.
///
/// `base` is the directory relative paths are resolved against.
pub fn resolve(
    request: &MigrationRequest,
    prompter: &dyn Prompter,
    base: &Path,
) -> Result<ResolvedRequest, MigrateError> {
    let answers = prompt_user(&descriptors(request, base), prompter)?;

    let (source, source_prompted) = match request.source_path() {
        Some(path) => (path.to_path_buf(), false),
        None => {
            let answer = answers
                .get(PromptField::SourcePath)
                .ok_or(PromptError::EmptyAnswer {
                    field: PromptField::SourcePath,
                })?;
            (PathBuf::from(answer), true)
        }
    };
    let source = paths::absolutize(&source, base);

    let destination = match request.kind() {
        MigrationKind::Plugin => {
            let supplied = request.destination_path().map(Path::to_path_buf).or_else(|| {
                // The offered default is display text; rebuild it from the source path.
                if answers.took_default(PromptField::DestinationPath) {
                    None
                } else {
                    answers.get(PromptField::DestinationPath).map(PathBuf::from)
                }
            });
            Some(match supplied {
                Some(path) => paths::absolutize(&path, base),
                None => paths::plugin_destination(&source),
            })
        }
        MigrationKind::Application | MigrationKind::Dependencies => None,
    };

    Ok(ResolvedRequest {
        kind: request.kind(),
        source,
        destination,
        options: request.options(),
        source_prompted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::prompts::{NonInteractivePrompter, ScriptedPrompter};

    const BASE: &str = "/work";

    #[test]
    fn supplied_source_is_not_prompted() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let request = MigrationRequest::dependencies(Some(PathBuf::from("blog")));

        let resolved = resolve(&request, &prompter, Path::new(BASE)).unwrap();
        assert_eq!(resolved.source, PathBuf::from("/work/blog"));
        assert!(!resolved.source_prompted);
        assert_eq!(resolved.destination, None);
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn missing_source_is_prompted_and_absolutized() {
        let prompter = ScriptedPrompter::new(["./apps/blog/"]);
        let request = MigrationRequest::application(None, MigrateOptions::default());

        let resolved = resolve(&request, &prompter, Path::new(BASE)).unwrap();
        assert_eq!(resolved.source, PathBuf::from("/work/apps/blog"));
        assert!(resolved.source_prompted);
        assert_eq!(
            prompter.asked(),
            vec![(
                "Enter the path to your Strapi application".to_string(),
                None
            )]
        );
    }

    #[test]
    fn plugin_destination_defaults_from_supplied_source() {
        let request = MigrationRequest::plugin(Some(PathBuf::from("/tmp/my-plugin")), None);

        let resolved = resolve(&request, &NonInteractivePrompter, Path::new(BASE)).unwrap();
        assert_eq!(resolved.source, PathBuf::from("/tmp/my-plugin"));
        assert_eq!(
            resolved.destination,
            Some(PathBuf::from("/tmp/my-plugin-v4"))
        );
    }

    #[test]
    fn plugin_destination_default_offered_from_prompted_source() {
        let prompter = ScriptedPrompter::new(["plugins/seo", ""]);
        let request = MigrationRequest::plugin(None, None);

        let resolved = resolve(&request, &prompter, Path::new(BASE)).unwrap();
        assert_eq!(resolved.source, PathBuf::from("/work/plugins/seo"));
        assert_eq!(
            resolved.destination,
            Some(PathBuf::from("/work/plugins/seo-v4"))
        );
        assert_eq!(
            prompter.asked()[1].1.as_deref(),
            Some("/work/plugins/seo-v4")
        );
    }

    #[cfg(unix)]
    #[test]
    fn plugin_destination_default_keeps_non_utf8_source_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let source = PathBuf::from(OsStr::from_bytes(b"/tmp/plug\xffin"));
        let request = MigrationRequest::plugin(Some(source), None);

        let resolved = resolve(&request, &NonInteractivePrompter, Path::new(BASE)).unwrap();
        assert_eq!(
            resolved.destination,
            Some(PathBuf::from(OsStr::from_bytes(b"/tmp/plug\xffin-v4")))
        );
    }

    #[test]
    fn plugin_destination_answer_overrides_default() {
        let prompter = ScriptedPrompter::new(["../out/seo"]);
        let request = MigrationRequest::plugin(Some(PathBuf::from("seo")), None);

        let resolved = resolve(&request, &prompter, Path::new(BASE)).unwrap();
        assert_eq!(resolved.destination, Some(PathBuf::from("/out/seo")));
    }

    #[test]
    fn supplied_destination_is_absolutized_not_prompted() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let request =
            MigrationRequest::plugin(Some(PathBuf::from("seo")), Some(PathBuf::from("seo-next")));

        let resolved = resolve(&request, &prompter, Path::new(BASE)).unwrap();
        assert_eq!(resolved.destination, Some(PathBuf::from("/work/seo-next")));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn non_interactive_missing_source_fails() {
        let request = MigrationRequest::dependencies(None);

        let err = resolve(&request, &NonInteractivePrompter, Path::new(BASE)).unwrap_err();
        assert!(matches!(
            err,
            MigrateError::Prompt(PromptError::MissingArgument {
                field: PromptField::SourcePath
            })
        ));
    }

    #[test]
    fn descriptor_order_is_source_then_destination() {
        let request = MigrationRequest::plugin(None, None);
        let base = Path::new(BASE);
        let fields: Vec<_> = descriptors(&request, base)
            .iter()
            .map(|d| d.field)
            .collect();
        assert_eq!(
            fields,
            vec![PromptField::SourcePath, PromptField::DestinationPath]
        );
    }
}
