//! SQLite storage implementation for WorkWise.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `workwise-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for goals, tasks and users
//! - Database-specific model types (with Diesel derives)
//!
//! Reads go through the pool. Every write is a job on the single writer
//! (see [`db::WriteHandle`]), which runs it inside an immediate transaction.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod goals;
pub mod tasks;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from workwise-core for convenience
pub use workwise_core::errors::{DatabaseError, Error, Result};
