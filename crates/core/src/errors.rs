//! Core error types for the WorkWise application.
//!
//! This module defines database-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.
//!
//! Every error can be classified with [`Error::category`] and carries a short
//! message plus a longer description, so the HTTP boundary can render a
//! consistent structured body.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource is absent or not owned by the caller.
    #[error("{message}")]
    NotFound {
        message: String,
        description: String,
    },

    /// A unique field is already taken.
    #[error("{message}")]
    Conflict {
        message: String,
        description: String,
    },

    /// Credential mismatch on a password operation.
    #[error("{message}")]
    Forbidden {
        message: String,
        description: String,
    },

    #[error("{message}")]
    BadRequest {
        message: String,
        description: String,
    },

    #[error("{message}")]
    Unauthorized {
        message: String,
        description: String,
    },

    /// Missing required configuration or an unclassified failure.
    #[error("{message}")]
    Internal {
        message: String,
        description: String,
    },

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The generated suggestion payload could not be turned into structured data.
    #[error("Suggestion processing failed: {0}")]
    Suggestion(String),
}

/// Coarse classification used by the API boundary to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Conflict,
    Forbidden,
    BadRequest,
    Unauthorized,
    Internal,
}

impl Error {
    pub fn not_found(message: impl Into<String>, description: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
            description: description.into(),
        }
    }

    pub fn conflict(message: impl Into<String>, description: impl Into<String>) -> Self {
        Error::Conflict {
            message: message.into(),
            description: description.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>, description: impl Into<String>) -> Self {
        Error::Forbidden {
            message: message.into(),
            description: description.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>, description: impl Into<String>) -> Self {
        Error::BadRequest {
            message: message.into(),
            description: description.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, description: impl Into<String>) -> Self {
        Error::Unauthorized {
            message: message.into(),
            description: description.into(),
        }
    }

    pub fn internal(message: impl Into<String>, description: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
            description: description.into(),
        }
    }

    /// Error raised when a required configuration key is absent.
    pub fn missing_config(key: &str) -> Self {
        Error::internal(
            "Internal Server Error - Key Not Found",
            format!("Unable to fetch the value for the key {}", key),
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NotFound { .. } => ErrorCategory::NotFound,
            Error::Conflict { .. } => ErrorCategory::Conflict,
            Error::Forbidden { .. } => ErrorCategory::Forbidden,
            Error::BadRequest { .. } => ErrorCategory::BadRequest,
            Error::Unauthorized { .. } => ErrorCategory::Unauthorized,
            Error::Internal { .. } => ErrorCategory::Internal,
            Error::Database(DatabaseError::NotFound(_)) => ErrorCategory::NotFound,
            Error::Database(DatabaseError::UniqueViolation(_)) => ErrorCategory::Conflict,
            Error::Database(_) => ErrorCategory::Internal,
            Error::Validation(_) => ErrorCategory::BadRequest,
            Error::Suggestion(_) => ErrorCategory::Internal,
        }
    }

    /// Short, user-facing message.
    pub fn message(&self) -> String {
        match self {
            Error::NotFound { message, .. }
            | Error::Conflict { message, .. }
            | Error::Forbidden { message, .. }
            | Error::BadRequest { message, .. }
            | Error::Unauthorized { message, .. }
            | Error::Internal { message, .. } => message.clone(),
            Error::Database(DatabaseError::NotFound(_)) => "Record not found".to_string(),
            Error::Database(_) => "Database error".to_string(),
            Error::Validation(_) => "Invalid input".to_string(),
            Error::Suggestion(_) => "Unable to generate suggestions".to_string(),
        }
    }

    /// Longer description of what went wrong.
    pub fn description(&self) -> String {
        match self {
            Error::NotFound { description, .. }
            | Error::Conflict { description, .. }
            | Error::Forbidden { description, .. }
            | Error::BadRequest { description, .. }
            | Error::Unauthorized { description, .. }
            | Error::Internal { description, .. } => description.clone(),
            other => other.to_string(),
        }
    }
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A foreign key constraint was violated.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Unknown {kind} value '{value}'")]
    UnknownEnumValue { kind: &'static str, value: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Suggestion(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
