//! Environments command implementation.
//!
//! The `itop-boot environments` command lists environments that have a
//! loadable configuration bundle.

use crate::bootstrap::Bootstrap;
use crate::cli::args::EnvironmentsArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The environments command implementation.
pub struct EnvironmentsCommand {
    bootstrap: Bootstrap,
    args: EnvironmentsArgs,
}

impl EnvironmentsCommand {
    /// Create a new environments command.
    pub fn new(bootstrap: Bootstrap, args: EnvironmentsArgs) -> Self {
        Self { bootstrap, args }
    }
}

impl Command for EnvironmentsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let catalog = self.bootstrap.catalog();
        let default = &self.bootstrap.settings().default_environment;
        let environments = catalog.environments()?;

        if self.args.json {
            let json = serde_json::json!({
                "default": default,
                "environments": environments,
            });
            ui.raw(&serde_json::to_string_pretty(&json).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Environments in {}", catalog.root().display()));
        if environments.is_empty() {
            ui.message("No environments configured.");
        }
        for env in &environments {
            if env == default {
                ui.message(&format!("{} (default)", env));
            } else {
                ui.message(env);
            }
        }

        if !environments.contains(default) {
            ui.warning(&format!(
                "Default environment '{}' has no configuration bundle",
                default
            ));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppSettings;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn app_with(envs: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for env in envs {
            let dir = temp.path().join("conf").join(env);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("config-itop.php"), "<?php").unwrap();
        }
        temp
    }

    fn run(temp: &TempDir, json: bool) -> MockUI {
        let mut ui = MockUI::new();
        EnvironmentsCommand::new(
            Bootstrap::new(temp.path(), AppSettings::default()),
            EnvironmentsArgs { json },
        )
        .execute(&mut ui)
        .unwrap();
        ui
    }

    #[test]
    fn marks_default() {
        let temp = app_with(&["production", "test"]);
        let ui = run(&temp, false);
        assert_eq!(
            ui.messages(),
            &["production (default)".to_string(), "test".to_string()]
        );
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn warns_when_default_missing() {
        let temp = app_with(&["test"]);
        let ui = run(&temp, false);
        assert_eq!(ui.warnings().len(), 1);
    }

    #[test]
    fn json_lists_environments() {
        let temp = app_with(&["test", "production"]);
        let ui = run(&temp, true);
        let value: serde_json::Value = serde_json::from_str(&ui.raw_output()[0]).unwrap();
        assert_eq!(value["default"], "production");
        assert_eq!(value["environments"], serde_json::json!(["production", "test"]));
    }
}
