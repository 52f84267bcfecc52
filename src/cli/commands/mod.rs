//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod cache;
pub mod completions;
pub mod dispatcher;
pub mod environments;
pub mod maintenance;
pub mod request;
pub mod resolve;
pub mod session;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
