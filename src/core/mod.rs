//! core
//!
//! Domain types, configuration and path rules.
//!
//! # Modules
//!
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Path normalization and the plugin destination rule
//! - [`project`] - `package.json` inspection and project kind detection
//!
//! Nothing in `core` prompts, prints or runs external programs.

pub mod config;
pub mod paths;
pub mod project;
