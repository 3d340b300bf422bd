//! Session lifecycle registry: atomic state transitions over a concurrent
//! per-user record store, with a background cleanup sweep.

pub mod in_memory;
pub mod record;
pub mod registry;
pub mod scheduler;
pub mod sweep;
pub mod traits;

pub use in_memory::InMemorySessionStore;
pub use record::{SessionRecord, SessionStatus};
pub use registry::SessionRegistry;
pub use scheduler::CleanupScheduler;
pub use sweep::sweep;
pub use traits::SessionStore;

use std::sync::Arc;

/// Create a default in-memory session store.
pub fn create_session_store() -> Arc<dyn SessionStore> {
    Arc::new(InMemorySessionStore::new())
}

/// Create a registry over the in-memory store and the system clock.
pub fn create_session_registry() -> SessionRegistry {
    SessionRegistry::new()
}
