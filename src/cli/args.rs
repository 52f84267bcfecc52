//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::request::parse_pair;

/// itop-boot - Request bootstrap for iTop deployments.
#[derive(Debug, Parser)]
#[command(name = "itop-boot")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Application root (overrides current directory)
    #[arg(short, long, global = true, env = "ITOP_BOOT_APP_ROOT")]
    pub app_root: Option<PathBuf>,

    /// Path to settings file (overrides <app-root>/itop-boot.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

use super::commands::cache::CacheArgs;
use super::commands::maintenance::MaintenanceArgs;
use super::commands::session::SessionArgs;

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve the environment of a session
    Resolve(ResolveArgs),

    /// Bootstrap a simulated request end to end
    Request(RequestArgs),

    /// Turn maintenance mode on or off
    Maintenance(MaintenanceArgs),

    /// List configured environments
    Environments(EnvironmentsArgs),

    /// Manage the compiled-artifact cache
    Cache(CacheArgs),

    /// Inspect and clean up sessions
    Session(SessionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResolveArgs {
    /// Environment to switch the session to
    #[arg(long, value_name = "ENV")]
    pub switch_env: Option<String>,

    /// Session to resume (a new one is started otherwise)
    #[arg(long, value_name = "ID")]
    pub session: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `request` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RequestArgs {
    /// Request URI
    #[arg(long)]
    pub uri: Option<String>,

    /// Request parameter (NAME=VALUE, repeatable)
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub params: Vec<(String, String)>,

    /// Request header (NAME=VALUE, repeatable)
    #[arg(long = "header", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub headers: Vec<(String, String)>,

    /// Request content type
    #[arg(long)]
    pub content_type: Option<String>,

    /// Session to resume (a new one is started otherwise)
    #[arg(long, value_name = "ID")]
    pub session: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `environments` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvironmentsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolve_with_switch() {
        let cli = Cli::parse_from(["itop-boot", "resolve", "--switch-env", "test"]);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.switch_env.as_deref(), Some("test"));
                assert!(args.session.is_none());
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn parses_request_pairs() {
        let cli = Cli::parse_from([
            "itop-boot",
            "request",
            "--uri",
            "/pages/UI.php",
            "--param",
            "switch_env=test",
            "--param",
            "maintenance",
            "--header",
            "X-Combodo-Ajax=1",
        ]);
        match cli.command {
            Commands::Request(args) => {
                assert_eq!(args.uri.as_deref(), Some("/pages/UI.php"));
                assert_eq!(
                    args.params,
                    vec![
                        ("switch_env".to_string(), "test".to_string()),
                        ("maintenance".to_string(), String::new()),
                    ]
                );
                assert_eq!(args.headers.len(), 1);
            }
            _ => panic!("Expected Request command"),
        }
    }

    #[test]
    fn rejects_malformed_pair() {
        assert!(Cli::try_parse_from(["itop-boot", "request", "--param", "=x"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["itop-boot", "environments", "--app-root", "/srv/itop", "-q"]);
        assert_eq!(cli.app_root, Some(PathBuf::from("/srv/itop")));
        assert!(cli.quiet);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["itop-boot"]).is_err());
    }
}
