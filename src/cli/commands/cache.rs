//! Cache command implementation.
//!
//! Provides `itop-boot cache list`, `itop-boot cache clear` and
//! `itop-boot cache stats` for the compiled-artifact cache.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::bootstrap::Bootstrap;
use crate::cache::{ArtifactCache, CacheInvalidator};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// List cached artifacts.
    List {
        /// Show detailed information.
        #[arg(long)]
        verbose: bool,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Clear the cache, as an environment switch would.
    Clear,
    /// Show cache statistics.
    Stats,
}

/// The cache command implementation.
pub struct CacheCommand {
    bootstrap: Bootstrap,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(bootstrap: Bootstrap, args: CacheArgs) -> Self {
        Self { bootstrap, args }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> crate::error::Result<CommandResult> {
        let cache = self.bootstrap.artifact_cache();

        match &self.args.command {
            CacheSubcommand::List { verbose, json } => list_cache(&cache, *verbose, *json, ui)?,
            CacheSubcommand::Clear => clear_cache(&cache, ui)?,
            CacheSubcommand::Stats => show_stats(&cache, ui)?,
        }

        Ok(CommandResult::success())
    }
}

fn list_cache(
    cache: &ArtifactCache,
    verbose: bool,
    json: bool,
    ui: &mut dyn UserInterface,
) -> Result<()> {
    let entries = cache.list()?;

    if json {
        ui.raw(&serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        ui.message("Cache is empty");
        return Ok(());
    }

    ui.message(&format!("{} cached artifacts:\n", entries.len()));

    for entry in entries {
        let age = format_age(entry.age());
        if verbose {
            ui.message(&format!("  {} ({})", entry.name, entry.environment));
            ui.message(&format!("    Compiled: {} ago", age));
            ui.message(&format!("    Size: {} bytes", entry.metadata.size_bytes));
            ui.message(&format!("    Path: {}", entry.content_path.display()));
            ui.message("");
        } else {
            ui.message(&format!("  {} [{}] {}", entry.name, entry.environment, age));
        }
    }

    Ok(())
}

fn clear_cache(cache: &ArtifactCache, ui: &mut dyn UserInterface) -> Result<()> {
    let count = cache.list()?.len();
    if count == 0 {
        ui.message("Cache is already empty");
        return Ok(());
    }

    cache.invalidate_all()?;
    ui.success(&format!("Cleared {} artifacts", count));
    Ok(())
}

fn show_stats(cache: &ArtifactCache, ui: &mut dyn UserInterface) -> Result<()> {
    let entries = cache.list()?;
    let total_size = cache.total_size()?;
    let mut environments: Vec<&str> = entries.iter().map(|e| e.environment.as_str()).collect();
    environments.sort_unstable();
    environments.dedup();

    ui.message("Cache Statistics:\n");
    ui.message(&format!("  Total artifacts: {}", entries.len()));
    ui.message(&format!("  Environments: {}", environments.len()));
    ui.message(&format!("  Total size: {} bytes", total_size));
    ui.message(&format!("  Location: {}", cache.root().display()));

    Ok(())
}

fn format_age(age: chrono::Duration) -> String {
    let secs = age.num_seconds().max(0);
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86400)
    }
}
