//! ui::prompts
//!
//! Interactive parameter collection.
//!
//! # Design
//!
//! A caller describes every parameter it may need as an ordered list of
//! [`PromptDescriptor`]s. [`prompt_user`] walks the list in order, skips
//! descriptors that do not apply (the value was supplied on the command
//! line), and asks for the rest. A descriptor's default is computed from
//! the answers collected so far, so a later default may build on an
//! earlier answer.
//!
//! Rendering is behind the [`Prompter`] trait. In non-interactive mode
//! defaults are accepted as-is, and a parameter without a default fails
//! with a clear error instead of blocking.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::sync::Mutex;

use dialoguer::Input;
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("missing required argument '{field}' (prompts are disabled; pass it on the command line)")]
    MissingArgument { field: PromptField },

    #[error("'{field}' must not be empty")]
    EmptyAnswer { field: PromptField },

    #[error("IO error: {0}")]
    IoError(String),
}

/// Parameters that can be collected by prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PromptField {
    /// The v3 project (or plugin) path.
    SourcePath,
    /// Where the v4 plugin is created.
    DestinationPath,
}

impl PromptField {
    /// Name of the field as shown to the operator.
    pub fn name(&self) -> &'static str {
        match self {
            PromptField::SourcePath => "path",
            PromptField::DestinationPath => "destination-path",
        }
    }
}

impl std::fmt::Display for PromptField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Answers collected by one [`prompt_user`] call.
///
/// Only prompted fields are present. A field whose answer is the offered
/// default is remembered as such, so callers can rebuild the default from
/// typed values instead of its rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    values: BTreeMap<PromptField, String>,
    defaulted: BTreeSet<PromptField>,
}

impl Answers {
    /// Get the answer for a field, if it was prompted.
    pub fn get(&self, field: PromptField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Record an answer.
    pub fn insert(&mut self, field: PromptField, value: String) {
        self.defaulted.remove(&field);
        self.values.insert(field, value);
    }

    /// Record that `field` took its offered default.
    pub fn insert_default(&mut self, field: PromptField, value: String) {
        self.values.insert(field, value);
        self.defaulted.insert(field);
    }

    /// Whether the answer for `field` is the default it was offered.
    pub fn took_default(&self, field: PromptField) -> bool {
        self.defaulted.contains(&field)
    }

    /// Number of prompted fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was prompted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Computes a descriptor's default from earlier answers.
pub type DefaultFn<'a> = Box<dyn Fn(&Answers) -> Option<String> + 'a>;

/// Describes one parameter to collect.
pub struct PromptDescriptor<'a> {
    /// Field the answer is stored under.
    pub field: PromptField,
    /// Question shown to the operator.
    pub message: String,
    /// Whether to ask at all (typically: the value was not supplied).
    pub applies: bool,
    default: Option<DefaultFn<'a>>,
}

impl<'a> PromptDescriptor<'a> {
    /// A free-text input for `field`. Applies unless [`when`](Self::when)
    /// says otherwise.
    pub fn input(field: PromptField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            applies: true,
            default: None,
        }
    }

    /// Only ask when `applies` is true.
    pub fn when(mut self, applies: bool) -> Self {
        self.applies = applies;
        self
    }

    /// Derive the default from the answers collected so far.
    pub fn with_default(mut self, default: impl Fn(&Answers) -> Option<String> + 'a) -> Self {
        self.default = Some(Box::new(default));
        self
    }

    /// Evaluate the default against `answers`.
    pub fn default_for(&self, answers: &Answers) -> Option<String> {
        self.default.as_ref().and_then(|f| f(answers))
    }
}

impl std::fmt::Debug for PromptDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptDescriptor")
            .field("field", &self.field)
            .field("message", &self.message)
            .field("applies", &self.applies)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// Renders a single text question.
pub trait Prompter {
    /// Ask `message`; an empty reply means "use the default".
    fn input(&self, message: &str, default: Option<&str>) -> Result<String, PromptError>;
}

/// Terminal prompter backed by `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn input(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let mut input = Input::<String>::new().with_prompt(message);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }

        input.interact_text().map_err(|err| match err {
            dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
                PromptError::Cancelled
            }
            other => PromptError::IoError(other.to_string()),
        })
    }
}

/// Prompter for non-interactive runs: accepts defaults, refuses to ask.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn input(&self, _message: &str, default: Option<&str>) -> Result<String, PromptError> {
        default
            .map(str::to_string)
            .ok_or(PromptError::NotInteractive)
    }
}

/// Prompter that replays queued answers and records every question.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedPrompter {
    /// Queue `answers`; an empty string stands for pressing Enter.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, with the default each was offered.
    pub fn asked(&self) -> Vec<(String, Option<String>)> {
        self.asked.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        self.asked
            .lock()
            .unwrap()
            .push((message.to_string(), default.map(str::to_string)));
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PromptError::IoError("no scripted answer left".to_string()))
    }
}

/// Pick the prompter for the current mode.
pub fn prompter_for(interactive: bool) -> Box<dyn Prompter> {
    if interactive {
        Box::new(DialoguerPrompter)
    } else {
        Box::new(NonInteractivePrompter)
    }
}

/// Collect answers for every applicable descriptor, in order.
///
/// Blank replies fall back to the descriptor's default; a blank reply
/// with no default is [`PromptError::EmptyAnswer`].
pub fn prompt_user(
    descriptors: &[PromptDescriptor<'_>],
    prompter: &dyn Prompter,
) -> Result<Answers, PromptError> {
    let mut answers = Answers::default();

    for descriptor in descriptors.iter().filter(|d| d.applies) {
        let default = descriptor.default_for(&answers);
        let reply = prompter
            .input(&descriptor.message, default.as_deref())
            .map_err(|err| match err {
                PromptError::NotInteractive => PromptError::MissingArgument {
                    field: descriptor.field,
                },
                other => other,
            })?;

        let reply = reply.trim();
        match default {
            Some(default) if reply.is_empty() || reply == default => {
                log::debug!("prompted {} = {} (default)", descriptor.field, default);
                answers.insert_default(descriptor.field, default);
            }
            None if reply.is_empty() => {
                return Err(PromptError::EmptyAnswer {
                    field: descriptor.field,
                });
            }
            _ => {
                log::debug!("prompted {} = {}", descriptor.field, reply);
                answers.insert(descriptor.field, reply.to_string());
            }
        }
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_descriptors_contribute_nothing() {
        let prompter = ScriptedPrompter::new(["/dest"]);
        let descriptors = [
            PromptDescriptor::input(PromptField::SourcePath, "source?").when(false),
            PromptDescriptor::input(PromptField::DestinationPath, "dest?"),
        ];

        let answers = prompt_user(&descriptors, &prompter).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get(PromptField::SourcePath), None);
        assert_eq!(answers.get(PromptField::DestinationPath), Some("/dest"));
        assert_eq!(prompter.asked().len(), 1);
    }

    #[test]
    fn later_default_reads_earlier_answer() {
        let prompter = ScriptedPrompter::new(["/src", ""]);
        let descriptors = [
            PromptDescriptor::input(PromptField::SourcePath, "source?"),
            PromptDescriptor::input(PromptField::DestinationPath, "dest?").with_default(|a| {
                a.get(PromptField::SourcePath)
                    .map(|source| format!("{source}-copy"))
            }),
        ];

        let answers = prompt_user(&descriptors, &prompter).unwrap();
        assert_eq!(
            answers.get(PromptField::DestinationPath),
            Some("/src-copy")
        );
        assert_eq!(
            prompter.asked()[1],
            ("dest?".to_string(), Some("/src-copy".to_string()))
        );
    }

    #[test]
    fn default_answers_are_marked() {
        let prompter = ScriptedPrompter::new(["", "/out", "/typed"]);
        let with_default = |field| {
            PromptDescriptor::input(field, "where?").with_default(|_| Some("/out".to_string()))
        };

        let blank = prompt_user(&[with_default(PromptField::DestinationPath)], &prompter).unwrap();
        assert!(blank.took_default(PromptField::DestinationPath));

        let echoed = prompt_user(&[with_default(PromptField::DestinationPath)], &prompter).unwrap();
        assert!(echoed.took_default(PromptField::DestinationPath));

        let typed = prompt_user(&[with_default(PromptField::DestinationPath)], &prompter).unwrap();
        assert!(!typed.took_default(PromptField::DestinationPath));
        assert_eq!(typed.get(PromptField::DestinationPath), Some("/typed"));
    }

    #[test]
    fn nothing_applies_means_no_questions() {
        let prompter = ScriptedPrompter::new(Vec::<String>::new());
        let descriptors =
            [PromptDescriptor::input(PromptField::SourcePath, "source?").when(false)];

        let answers = prompt_user(&descriptors, &prompter).unwrap();
        assert!(answers.is_empty());
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn blank_answer_without_default_is_rejected() {
        let prompter = ScriptedPrompter::new(["   "]);
        let descriptors = [PromptDescriptor::input(PromptField::SourcePath, "source?")];

        let err = prompt_user(&descriptors, &prompter).unwrap_err();
        assert_eq!(
            err,
            PromptError::EmptyAnswer {
                field: PromptField::SourcePath
            }
        );
    }

    #[test]
    fn answers_are_trimmed() {
        let prompter = ScriptedPrompter::new(["  ./app \n"]);
        let descriptors = [PromptDescriptor::input(PromptField::SourcePath, "source?")];

        let answers = prompt_user(&descriptors, &prompter).unwrap();
        assert_eq!(answers.get(PromptField::SourcePath), Some("./app"));
    }

    #[test]
    fn non_interactive_accepts_defaults() {
        let descriptors = [PromptDescriptor::input(PromptField::DestinationPath, "dest?")
            .with_default(|_| Some("/out".to_string()))];

        let answers = prompt_user(&descriptors, &NonInteractivePrompter).unwrap();
        assert_eq!(answers.get(PromptField::DestinationPath), Some("/out"));
    }

    #[test]
    fn non_interactive_without_default_names_field() {
        let descriptors = [PromptDescriptor::input(PromptField::SourcePath, "source?")];

        let err = prompt_user(&descriptors, &NonInteractivePrompter).unwrap_err();
        assert_eq!(
            err,
            PromptError::MissingArgument {
                field: PromptField::SourcePath
            }
        );
        assert!(err.to_string().contains("'path'"));
    }
}
