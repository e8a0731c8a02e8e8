//! Process-local adapters used when no database is configured.
//!
//! State lives for the lifetime of the process. These adapters back the
//! integration tests and local runs without PostgreSQL.

mod reference;
mod session_store;
mod store;

pub use reference::InMemoryReferenceRepository;
pub use session_store::InMemorySessionStore;
pub use store::InMemoryStore;
