//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Resolve relative paths against that directory
//! - `--config <file>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::config::Config;

/// strapi-codemods - Migrate Strapi v3 applications and plugins to v4
#[derive(Parser, Debug)]
#[command(name = "strapi-codemods")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Resolve relative paths as if started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Use this config file instead of the standard locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(
        long = "interactive",
        global = true,
        conflicts_with = "no_interactive"
    )]
    pub interactive_flag: bool,

    /// Disable interactive prompts; missing arguments become errors
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set, the config does
    ///   not disable prompts, AND stdin is a terminal
    pub fn interactive(&self, config: &Config) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            config.interactive() && std::io::stdin().is_terminal()
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Migrate a Strapi v3 project to v4
    #[command(
        name = "migrate",
        long_about = "Migrate a Strapi v3 application, its dependencies, or a v3 plugin to v4.\n\n\
            Each migration runs a fixed sequence of steps and stops at the first failure. \
            Steps that already ran are NOT rolled back, so run migrations on a project \
            that is committed to git.\n\n\
            Any path left out is asked for interactively. With --no-interactive a \
            missing path is an error, except the plugin destination, which defaults \
            to the plugin path with a -v4 suffix.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Migrate a whole application (requires a clean git working tree)
    strapi-codemods migrate application ./my-app

    # Only update package.json dependencies
    strapi-codemods migrate dependencies ./my-app

    # Migrate a plugin into ./my-plugin-v4
    strapi-codemods migrate plugin ./my-plugin

    # Preview the steps without running them
    strapi-codemods migrate --dry-run application ./my-app"
    )]
    Migrate {
        /// Print the steps that would run without running them
        #[arg(long, global = true)]
        dry_run: bool,

        #[command(subcommand)]
        target: MigrateCommand,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts.\n\n\
            Outputs a completion script for the specified shell to stdout.",
        after_help = "\
INSTALLATION:
    # Bash (add to ~/.bashrc)
    eval \"$(strapi-codemods completion bash)\"

    # Zsh (add to ~/.zshrc)
    eval \"$(strapi-codemods completion zsh)\"

    # Fish
    strapi-codemods completion fish > ~/.config/fish/completions/strapi-codemods.fish

    # PowerShell
    strapi-codemods completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// The three migration targets.
#[derive(Subcommand, Debug)]
pub enum MigrateCommand {
    /// Migrate the dependencies, folder structure and API folder of an application
    #[command(
        name = "application",
        after_help = "\
The application must be committed to git so a failed migration can be
reverted. Use --skip-working-tree-check to run on uncommitted changes."
    )]
    Application {
        /// Path to the Strapi v3 application
        path: Option<PathBuf>,

        /// Do not require a clean git working tree
        #[arg(long)]
        skip_working_tree_check: bool,
    },

    /// Migrate only the package.json dependencies of an application or plugin
    #[command(name = "dependencies")]
    Dependencies {
        /// Path to the Strapi v3 application or plugin
        path: Option<PathBuf>,
    },

    /// Migrate a v3 plugin into a new v4 plugin
    #[command(name = "plugin")]
    Plugin {
        /// Path to the Strapi v3 plugin
        path: Option<PathBuf>,

        /// Where to create the v4 plugin [default: <path>-v4]
        #[arg(value_name = "DESTINATION_PATH")]
        destination_path: Option<PathBuf>,
    },
}

/// Supported shells for completion.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}
