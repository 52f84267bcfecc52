//! Maintenance mode.
//!
//! While a flag file exists in the application root, every request is
//! answered with a 503 instead of being bootstrapped. Sending the
//! `maintenance` parameter bypasses the gate so administrators can still
//! get in.

pub mod response;

pub use response::{MaintenanceResponse, ResponseFormat, SERVICE_UNAVAILABLE};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::MaintenanceMessages;
use crate::request::{Request, MAINTENANCE_BYPASS_PARAM};

/// Gate controlled by the maintenance flag file.
#[derive(Debug, Clone)]
pub struct MaintenanceGate {
    flag_path: PathBuf,
}

impl MaintenanceGate {
    /// Create a gate for the given flag file.
    pub fn new(flag_path: impl Into<PathBuf>) -> Self {
        Self {
            flag_path: flag_path.into(),
        }
    }

    /// Path of the flag file.
    pub fn flag_path(&self) -> &Path {
        &self.flag_path
    }

    /// Whether maintenance mode is on.
    pub fn is_active(&self) -> bool {
        self.flag_path.exists()
    }

    /// Turn maintenance mode on. Returns false if it already was.
    pub fn enable(&self) -> Result<bool> {
        if self.is_active() {
            return Ok(false);
        }
        if let Some(parent) = self.flag_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        fs::write(&self.flag_path, "")
            .with_context(|| format!("Failed to create maintenance flag {:?}", self.flag_path))?;
        tracing::info!("Maintenance mode enabled ({:?})", self.flag_path);
        Ok(true)
    }

    /// Turn maintenance mode off. Returns false if it already was.
    pub fn disable(&self) -> Result<bool> {
        if !self.is_active() {
            return Ok(false);
        }
        fs::remove_file(&self.flag_path)
            .with_context(|| format!("Failed to remove maintenance flag {:?}", self.flag_path))?;
        tracing::info!("Maintenance mode disabled");
        Ok(true)
    }

    /// The response to send instead of serving `request`, if any.
    pub fn check(
        &self,
        request: &Request,
        messages: &MaintenanceMessages,
    ) -> Option<MaintenanceResponse> {
        if request.has_param(MAINTENANCE_BYPASS_PARAM) {
            if self.is_active() {
                tracing::debug!("Maintenance mode bypassed by request parameter");
            }
            return None;
        }
        if !self.is_active() {
            return None;
        }

        let response = MaintenanceResponse::for_request(request, messages);
        tracing::debug!(
            "Maintenance mode active, answering {:?} with {:?}",
            request.uri(),
            response.format
        );
        Some(response)
    }
}
