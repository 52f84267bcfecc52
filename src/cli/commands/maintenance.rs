//! Maintenance command implementation.
//!
//! Provides `itop-boot maintenance on`, `off` and `status`.

use clap::{Args, Subcommand};

use crate::bootstrap::Bootstrap;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the maintenance command.
#[derive(Debug, Clone, Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceSubcommand,
}

/// Maintenance subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum MaintenanceSubcommand {
    /// Enable maintenance mode.
    On,
    /// Disable maintenance mode.
    Off,
    /// Show whether maintenance mode is enabled.
    Status,
}

/// The maintenance command implementation.
pub struct MaintenanceCommand {
    bootstrap: Bootstrap,
    args: MaintenanceArgs,
}

impl MaintenanceCommand {
    /// Create a new maintenance command.
    pub fn new(bootstrap: Bootstrap, args: MaintenanceArgs) -> Self {
        Self { bootstrap, args }
    }
}

impl Command for MaintenanceCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let gate = self.bootstrap.gate();

        match self.args.command {
            MaintenanceSubcommand::On => {
                if gate.enable()? {
                    ui.success("Maintenance mode enabled");
                } else {
                    ui.message("Maintenance mode was already enabled");
                }
            }
            MaintenanceSubcommand::Off => {
                if gate.disable()? {
                    ui.success("Maintenance mode disabled");
                } else {
                    ui.message("Maintenance mode was not enabled");
                }
            }
            MaintenanceSubcommand::Status => {
                ui.show_field(
                    "Maintenance",
                    if gate.is_active() { "on" } else { "off" },
                );
                ui.show_field("Flag", &gate.flag_path().display().to_string());
            }
        }

        Ok(CommandResult::success())
    }
}
