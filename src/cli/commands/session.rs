//! Session command implementation.
//!
//! Provides `itop-boot session list`, `show` and `cleanup`.

use clap::{Args, Subcommand};

use crate::bootstrap::Bootstrap;
use crate::error::{BootError, Result};
use crate::session::{Session, SessionId, SessionStore, ENVIRONMENT_KEY};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the session command.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionSubcommand,
}

/// Session subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum SessionSubcommand {
    /// List recent sessions.
    List {
        /// Maximum number of sessions to show.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show one session.
    Show {
        /// Session ID.
        id: String,
    },
    /// Delete all but the most recent sessions.
    Cleanup {
        /// Number of sessions to keep.
        #[arg(long, default_value_t = 50)]
        keep: usize,
    },
}

/// The session command implementation.
pub struct SessionCommand {
    bootstrap: Bootstrap,
    args: SessionArgs,
}

impl SessionCommand {
    /// Create a new session command.
    pub fn new(bootstrap: Bootstrap, args: SessionArgs) -> Self {
        Self { bootstrap, args }
    }
}

impl Command for SessionCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = self.bootstrap.session_store();

        match &self.args.command {
            SessionSubcommand::List { limit } => {
                let sessions = store.list_recent(*limit)?;
                if sessions.is_empty() {
                    ui.message("No sessions.");
                    return Ok(CommandResult::success());
                }
                ui.show_header(&format!("Sessions ({})", store.name()));
                for session in sessions {
                    ui.message(&format!(
                        "{}  {}  {}",
                        session.id,
                        session.updated_at.format("%Y-%m-%d %H:%M"),
                        session.values.get(ENVIRONMENT_KEY).map_or("-", String::as_str)
                    ));
                }
            }
            SessionSubcommand::Show { id } => {
                let session_id = SessionId::parse(id)
                    .filter(|sid| store.exists(sid))
                    .ok_or_else(|| BootError::SessionNotFound { id: id.clone() })?;
                let session = store.load(&session_id)?;
                ui.show_field("Session", &session.id.to_string());
                ui.show_field("Created", &session.created_at.to_rfc3339());
                ui.show_field("Updated", &session.updated_at.to_rfc3339());
                for (key, value) in &session.values {
                    ui.show_field(key, value);
                }
            }
            SessionSubcommand::Cleanup { keep } => {
                let removed = store.cleanup(*keep)?;
                ui.success(&format!("Removed {} session(s)", removed));
            }
        }

        Ok(CommandResult::success())
    }
}

/// Resume the session named on the command line, or start a new one.
///
/// A malformed id is reported and replaced by a fresh session.
pub(crate) fn open_session(
    store: &SessionStore,
    id: Option<&str>,
    ui: &mut dyn UserInterface,
) -> Result<Session> {
    let parsed = match id {
        Some(raw) => {
            let parsed = SessionId::parse(raw);
            if parsed.is_none() {
                ui.warning(&format!("Invalid session id '{}', starting a new session", raw));
            }
            parsed
        }
        None => None,
    };
    Ok(store.start(parsed.as_ref())?)
}
