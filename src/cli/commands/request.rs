//! Request command implementation.
//!
//! The `itop-boot request` command runs the full startup sequence for a
//! simulated request: maintenance gate, environment resolution and bundle
//! lookup.

use crate::bootstrap::{Bootstrap, Startup};
use crate::cli::args::RequestArgs;
use crate::error::{BootError, Result};
use crate::request::Request;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, EXIT_CONFIG_MISSING, EXIT_MAINTENANCE};
use super::session::open_session;

/// The request command implementation.
pub struct RequestCommand {
    bootstrap: Bootstrap,
    args: RequestArgs,
}

impl RequestCommand {
    /// Create a new request command.
    pub fn new(bootstrap: Bootstrap, args: RequestArgs) -> Self {
        Self { bootstrap, args }
    }

    fn build_request(&self) -> Request {
        let mut request = Request::new();
        if let Some(uri) = &self.args.uri {
            request = request.with_uri(uri);
        }
        if let Some(content_type) = &self.args.content_type {
            request = request.with_content_type(content_type);
        }
        for (name, value) in &self.args.params {
            request = request.with_param(name, value);
        }
        for (name, value) in &self.args.headers {
            request = request.with_header(name, value);
        }
        request
    }
}

impl Command for RequestCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let request = self.build_request();
        let store = self.bootstrap.session_store();
        let mut session = open_session(&store, self.args.session.as_deref(), ui)?;

        let outcome = self.bootstrap.start(&request, &mut session);

        // Maintenance responses never touch the session
        if !matches!(outcome, Ok(Startup::Maintenance(_))) {
            store.save(&session)?;
        }

        let startup = match outcome {
            Ok(startup) => startup,
            Err(BootError::ConfigNotFound { path }) => {
                ui.error(&format!(
                    "No configuration bundle for this environment: {}",
                    path.display()
                ));
                return Ok(CommandResult::failure(EXIT_CONFIG_MISSING));
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            ui.raw(&serde_json::to_string_pretty(&startup).map_err(anyhow::Error::from)?);
        } else {
            match &startup {
                Startup::Maintenance(response) => {
                    ui.show_header(&format!("{} Service Unavailable", response.status));
                    ui.show_field("Content-Type", &response.content_type);
                    for (name, value) in &response.headers {
                        ui.show_field(name, value);
                    }
                    ui.raw(&response.body);
                }
                Startup::Ready(plan) => {
                    ui.show_field("Session", &session.id.to_string());
                    ui.show_field("Environment", &plan.environment);
                    ui.show_field("Source", &plan.source.to_string());
                    ui.show_field("Config", &plan.config_file.display().to_string());
                    ui.show_field(
                        "Cache",
                        if plan.cache_allowed {
                            "allowed"
                        } else {
                            "invalidated"
                        },
                    );
                }
            }
        }

        Ok(match startup {
            Startup::Maintenance(_) => CommandResult::failure(EXIT_MAINTENANCE),
            Startup::Ready(_) => CommandResult::success(),
        })
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

    fn command(temp: &TempDir, args: RequestArgs) -> RequestCommand {
        RequestCommand::new(Bootstrap::new(temp.path(), AppSettings::default()), args)
    }

    #[test]
    fn ready_request_reports_plan() {
        let temp = app_with(&["production"]);
        let mut ui = MockUI::new();

        let result = command(&temp, RequestArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.field("Environment"), Some("production"));
        assert!(ui.field("Config").unwrap().ends_with("config-itop.php"));
    }

    #[test]
    fn maintenance_exits_with_code_3() {
        let temp = app_with(&["production"]);
        fs::write(temp.path().join(".maintenance"), "").unwrap();
        let mut ui = MockUI::new();

        let result = command(
            &temp,
            RequestArgs {
                uri: Some("/itop/webservices/rest.php".to_string()),
                ..Default::default()
            },
        )
        .execute(&mut ui)
        .unwrap();

        assert_eq!(result.exit_code, EXIT_MAINTENANCE);
        assert_eq!(
            ui.raw_output(),
            &["Application is currently in maintenance".to_string()]
        );
        assert!(Bootstrap::new(temp.path(), AppSettings::default())
            .session_store()
            .list_recent(10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn maintenance_bypass_parameter() {
        let temp = app_with(&["production"]);
        fs::write(temp.path().join(".maintenance"), "").unwrap();
        let mut ui = MockUI::new();

        let result = command(
            &temp,
            RequestArgs {
                params: vec![("maintenance".to_string(), String::new())],
                ..Default::default()
            },
        )
        .execute(&mut ui)
        .unwrap();

        assert!(result.success);
    }

    #[test]
    fn missing_bundle_exits_with_code_2() {
        let temp = app_with(&[]);
        let mut ui = MockUI::new();

        let result = command(&temp, RequestArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, EXIT_CONFIG_MISSING);
        assert_eq!(ui.errors().len(), 1);
    }

    #[test]
    fn json_maintenance_response() {
        let temp = app_with(&["production"]);
        fs::write(temp.path().join(".maintenance"), "").unwrap();
        let mut ui = MockUI::new();

        command(
            &temp,
            RequestArgs {
                content_type: Some("application/json".to_string()),
                json: true,
                ..Default::default()
            },
        )
        .execute(&mut ui)
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.raw_output()[0]).unwrap();
        assert_eq!(value["outcome"], "maintenance");
        assert_eq!(value["status"], 503);
        assert_eq!(value["format"], "json");
    }
}
