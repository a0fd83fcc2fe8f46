//! Error types for the regimen library.

use std::path::PathBuf;

use thiserror::Error;

use crate::access::Action;

/// Comprehensive error type for all workout manager operations.
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Schedule not found for the given ID
    #[error("Schedule with ID {id} not found")]
    ScheduleNotFound { id: u64 },
    /// Schedule step not found for the given ID
    #[error("Schedule step with ID {id} not found")]
    StepNotFound { id: u64 },
    /// Workout not found for the given ID
    #[error("Workout with ID {id} not found")]
    WorkoutNotFound { id: u64 },
    /// Workout log entry not found for the given ID
    #[error("Log entry with ID {id} not found")]
    LogNotFound { id: u64 },
    /// The acting user does not own the resource
    #[error("Access denied: cannot {action} {kind} {id}")]
    AccessDenied {
        kind: &'static str,
        id: u64,
        action: Action,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ManagerError {
        ManagerError::Database {
            message: self.message,
            source,
        }
    }
}

impl ManagerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates an input validation error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Maps a "no rows" error to the given not-found error and wraps every
    /// other rusqlite error with `message`.
    pub(crate) fn not_found_or(
        not_found: ManagerError,
        message: &str,
    ) -> impl FnOnce(rusqlite::Error) -> ManagerError + '_ {
        move |e| {
            if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                not_found
            } else {
                ManagerError::database(message).with_source(e)
            }
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ManagerError::database(message).with_source(e))
    }
}

/// Result type alias for workout manager operations
pub type Result<T> = std::result::Result<T, ManagerError>;
