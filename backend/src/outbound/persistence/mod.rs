//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories here implement the domain's driven ports on top of
//! `diesel-async` with `bb8` pooling. Row structs and the schema stay private;
//! every database failure leaves this module as a [`RepositoryError`].
//!
//! Listing operations load each table once inside a read-only repeatable-read
//! transaction and join the records in memory, so one response reflects one
//! snapshot.
//!
//! # Example
//!
//! ```ignore
//! use chirp::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/chirp")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```
//!
//! [`RepositoryError`]: crate::domain::ports::RepositoryError

mod diesel_follow_repository;
mod diesel_like_repository;
mod diesel_tweet_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_follow_repository::DieselFollowRepository;
pub use diesel_like_repository::DieselLikeRepository;
pub use diesel_tweet_repository::DieselTweetRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
