//! itop-boot - Request bootstrap for iTop deployments.
//!
//! Every request to an iTop instance starts the same way: check whether
//! the instance is in maintenance, decide which environment the caller's
//! session runs in, and locate that environment's configuration bundle.
//! This crate implements those steps and a CLI to drive them.
//!
//! # Modules
//!
//! - [`bootstrap`] - Startup sequence tying the other modules together
//! - [`cache`] - Compiled-artifact cache and invalidation hooks
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and the environment catalog
//! - [`environment`] - Environment resolution against the session
//! - [`error`] - Error types and result aliases
//! - [`fatal`] - Fatal-error guard
//! - [`maintenance`] - Maintenance gate and its responses
//! - [`request`] - Incoming request view
//! - [`session`] - Session slots and on-disk session storage
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use itop_boot::environment::{EnvironmentRequest, ResolutionResult, ResolutionSource};
//!
//! let known = |env: &str| env == "production" || env == "test";
//! let request = EnvironmentRequest::new(Some("test"), Some("production"), "production");
//! let result = ResolutionResult::decide(&request, &known);
//!
//! assert_eq!(result.environment, "test");
//! assert!(!result.cache_allowed);
//! assert_eq!(result.source, ResolutionSource::Switched);
//! ```

pub mod bootstrap;
pub mod cache;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod fatal;
pub mod maintenance;
pub mod request;
pub mod session;
pub mod ui;

pub use error::{BootError, Result};
