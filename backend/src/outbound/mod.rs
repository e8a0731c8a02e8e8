//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories and session store using
//!   Diesel ORM
//! - **memory**: in-process repositories and session store used when no
//!   database is configured
//! - **password**: bcrypt-backed password hashing
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod password;
pub mod persistence;
pub mod reference_seed;
