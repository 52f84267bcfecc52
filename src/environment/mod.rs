//! Environment resolution.
//!
//! Decides which named configuration environment serves a request. The
//! priority chain is:
//!
//! 1. A requested switch, honored only when the target exists and differs
//!    from the session's environment
//! 2. The environment remembered in the session
//! 3. The process-wide default environment

pub mod resolver;

pub use resolver::{
    EnvironmentCatalog, EnvironmentRequest, EnvironmentResolver, ResolutionResult,
    ResolutionSource,
};
