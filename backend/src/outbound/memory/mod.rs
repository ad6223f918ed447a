//! Process-local storage adapter.
//!
//! [`InMemorySocialStore`] implements every repository port over one
//! mutex-guarded state, enforcing the same unique, check and cascade rules as
//! the SQL schema and reporting violations under the same constraint names.
//! It backs the server when no database is configured and the HTTP pipeline
//! tests.

mod state;
mod store;

pub use store::InMemorySocialStore;

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
