//! Server-side sessions.
//!
//! A session is a small key-value record tied to a client across requests.
//! Sessions are namespaced per application root so two deployments on one
//! host never share state. The environment resolver only touches one slot,
//! [`ENVIRONMENT_KEY`].

mod id;
mod slot;
mod store;

pub use id::{SessionId, SessionName};
pub use slot::{MemorySession, SessionSlot};
pub use store::{Session, SessionStore};

/// Session slot holding the name of the active environment.
pub const ENVIRONMENT_KEY: &str = "itop_env";
