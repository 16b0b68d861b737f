//! strapi-codemods - Migrate Strapi v3 applications and plugins to v4
//!
//! A single-binary orchestrator that validates a project, collects any
//! missing parameters, checks its preconditions, and runs the migration
//! steps for one of three targets: a whole application, only its
//! dependencies, or a plugin.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Validate → Resolve → Plan → Execute
//! - [`core`] - Configuration, path rules and project detection
//! - [`git`] - Single interface for all Git inspection
//! - [`migrations`] - The destructive migration operations
//! - [`ui`] - Prompts and terminal output
//!
//! # Correctness Invariants
//!
//! 1. A missing primary path fails before anything else runs
//! 2. Every precondition of a plan passes before its first destructive step
//! 3. Steps run in a fixed order and the first failure stops the rest
//! 4. Nothing is rolled back; failures point the user at version control

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod migrations;
pub mod ui;
