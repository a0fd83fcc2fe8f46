//! Database operations and SQLite management for workouts, schedules and
//! training logs.
//!
//! This module provides the low-level database operations of the workout
//! tracker. It owns the SQLite connection and schema, and exposes one query
//! module per aggregate. Methods here do not authorize; the manager checks
//! ownership before calling them.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod log_queries;
pub mod schedule_queries;
pub mod schema;
pub mod step_queries;
pub mod utils;
pub mod workout_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
