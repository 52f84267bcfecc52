//! Shell completion scripts.
//!
//! `itop-boot completions <SHELL>` prints a script completing subcommands,
//! flags and the values of enum arguments such as the shell itself.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::{BootError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Name completions are registered under.
const BIN_NAME: &str = "itop-boot";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }
}

/// Render the completion script for `shell`.
pub fn completion_script(shell: Shell) -> Result<String> {
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut Cli::command(), BIN_NAME, &mut buf);
    String::from_utf8(buf).map_err(|e| {
        BootError::Other(anyhow::anyhow!(
            "Completion script for {} is not UTF-8: {}",
            shell,
            e
        ))
    })
}

impl Command for CompletionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let script = completion_script(self.args.shell)?;
        ui.raw(script.trim_end());
        Ok(CommandResult::success())
    }
}
