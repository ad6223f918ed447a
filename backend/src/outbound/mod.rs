//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: process-local repositories with the same integrity rules
//! - **security**: bcrypt password hashing and JWT session tokens
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub(crate) mod assembly;
pub mod memory;
pub mod persistence;
pub mod security;
