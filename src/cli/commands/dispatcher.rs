//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::bootstrap::Bootstrap;
use crate::cli::args::{Cli, Commands};
use crate::config::load_settings;
use crate::error::Result;
use crate::fatal::install_panic_guard;
use crate::ui::UserInterface;

/// Exit code when the resolved environment has no configuration bundle.
pub const EXIT_CONFIG_MISSING: i32 = 2;

/// Exit code when a request was answered by the maintenance gate.
pub const EXIT_MAINTENANCE: i32 = 3;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    app_root: PathBuf,
    settings_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given application root.
    pub fn new(app_root: PathBuf, settings_path: Option<PathBuf>) -> Self {
        Self {
            app_root,
            settings_path,
        }
    }

    /// Get the application root path.
    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    /// Load settings and build the bootstrap for the application root.
    ///
    /// Also re-arms the fatal-error guard with the configured limits.
    pub fn bootstrap(&self) -> Result<Bootstrap> {
        let settings = load_settings(&self.app_root, self.settings_path.as_deref())?;
        install_panic_guard(settings.limits.clone());
        Ok(Bootstrap::new(&self.app_root, settings))
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            Commands::Resolve(args) => {
                super::resolve::ResolveCommand::new(self.bootstrap()?, args.clone()).execute(ui)
            }
            Commands::Request(args) => {
                super::request::RequestCommand::new(self.bootstrap()?, args.clone()).execute(ui)
            }
            Commands::Maintenance(args) => {
                super::maintenance::MaintenanceCommand::new(self.bootstrap()?, args.clone())
                    .execute(ui)
            }
            Commands::Environments(args) => {
                super::environments::EnvironmentsCommand::new(self.bootstrap()?, args.clone())
                    .execute(ui)
            }
            Commands::Cache(args) => {
                super::cache::CacheCommand::new(self.bootstrap()?, args.clone()).execute(ui)
            }
            Commands::Session(args) => {
                super::session::SessionCommand::new(self.bootstrap()?, args.clone()).execute(ui)
            }
        }
    }
}
