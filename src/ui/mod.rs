//! ui
//!
//! Talking to the operator.
//!
//! - [`prompts`] - Ordered, conditional parameter prompts
//! - [`output`] - Progress, warnings and path highlighting
//!
//! Prompts are behind the [`prompts::Prompter`] trait; with prompts disabled
//! a missing parameter either takes its default or fails.

pub mod output;
pub mod prompts;
