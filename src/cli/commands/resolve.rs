//! Resolve command implementation.
//!
//! The `itop-boot resolve` command resolves the environment of a session,
//! honoring an optional `--switch-env`, and saves the session.

use crate::bootstrap::Bootstrap;
use crate::cli::args::ResolveArgs;
use crate::error::Result;
use crate::request::{Request, SWITCH_ENV_PARAM};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::session::open_session;

/// The resolve command implementation.
pub struct ResolveCommand {
    bootstrap: Bootstrap,
    args: ResolveArgs,
}

impl ResolveCommand {
    /// Create a new resolve command.
    pub fn new(bootstrap: Bootstrap, args: ResolveArgs) -> Self {
        Self { bootstrap, args }
    }
}

impl Command for ResolveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = self.bootstrap.session_store();
        let mut session = open_session(&store, self.args.session.as_deref(), ui)?;

        let mut request = Request::new();
        if let Some(env) = &self.args.switch_env {
            request = request.with_param(SWITCH_ENV_PARAM, env);
        }

        let result = self.bootstrap.resolve(&request, &mut session);
        store.save(&session)?;

        if self.args.json {
            let json = serde_json::json!({
                "session": session.id.to_string(),
                "environment": result.environment,
                "cache_allowed": result.cache_allowed,
                "source": result.source,
            });
            ui.raw(&serde_json::to_string_pretty(&json).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        if let Some(requested) = self.args.switch_env.as_deref().filter(|e| !e.is_empty()) {
            if requested != result.environment {
                ui.warning(&format!(
                    "Environment '{}' not switched to, keeping '{}'",
                    requested, result.environment
                ));
            }
        }

        ui.show_field("Session", &session.id.to_string());
        ui.show_field("Environment", &result.environment);
        ui.show_field("Source", &result.source.to_string());
        ui.show_field(
            "Cache",
            if result.cache_allowed {
                "allowed"
            } else {
                "invalidated"
            },
        );

        Ok(CommandResult::success())
    }
}
