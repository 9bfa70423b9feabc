//! WorkWise Core - Domain entities, services, and traits.
//!
//! This crate contains the goal and task tracking logic: lifecycle, derived
//! progress, dashboard insights, generative task suggestions and user
//! accounts. It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod constants;
pub mod enums;
pub mod errors;
pub mod goals;
pub mod insights;
pub mod suggestions;
pub mod tasks;
pub mod users;

pub use enums::{Priority, Role, Status, TaskType};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
