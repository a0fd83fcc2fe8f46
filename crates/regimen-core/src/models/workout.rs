//! Workout model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A named training routine owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Unique identifier for the workout
    pub id: u64,

    /// Owning user
    pub user_id: u64,

    /// Short name of the workout
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Timestamp when the workout was created (UTC)
    pub created_at: Timestamp,
}
