//! Ownership-based authorization.
//!
//! Every manager operation that touches an existing resource passes through
//! [`authorize`] before doing any work. Resources expose their owner through
//! the [`Owned`] trait; the gate is the same for every resource kind and
//! every action.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    error::{ManagerError, Result},
    models::{Schedule, Workout, WorkoutLog},
};

/// Identifier of the acting user.
pub type UserId = u64;

/// Operations a user can attempt on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Edit,
    Delete,
    Start,
    Log,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Start => "start",
            Action::Log => "log",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource that belongs to exactly one user.
pub trait Owned {
    /// Human readable resource kind used in error messages.
    const KIND: &'static str;

    fn resource_id(&self) -> u64;

    fn owner_id(&self) -> UserId;
}

impl Owned for Schedule {
    const KIND: &'static str = "schedule";

    fn resource_id(&self) -> u64 {
        self.id
    }

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

impl Owned for Workout {
    const KIND: &'static str = "workout";

    fn resource_id(&self) -> u64 {
        self.id
    }

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

impl Owned for WorkoutLog {
    const KIND: &'static str = "log entry";

    fn resource_id(&self) -> u64 {
        self.id
    }

    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// Checks that `user` may perform `action` on `resource`.
///
/// Ownership is the only capability: the owner may do everything, nobody
/// else may do anything.
pub fn authorize<R: Owned>(user: UserId, resource: &R, action: Action) -> Result<()> {
    if resource.owner_id() == user {
        Ok(())
    } else {
        log::debug!(
            "denied {action} on {} {} for user {user}",
            R::KIND,
            resource.resource_id()
        );
        Err(ManagerError::AccessDenied {
            kind: R::KIND,
            id: resource.resource_id(),
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, civil::date};

    use super::*;

    fn schedule_owned_by(user_id: UserId) -> Schedule {
        Schedule {
            id: 4,
            user_id,
            name: "Strength block".to_string(),
            start_date: date(2024, 1, 1),
            is_active: false,
            is_loop: false,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            steps: vec![],
        }
    }

    #[test]
    fn test_owner_is_allowed_every_action() {
        let schedule = schedule_owned_by(1);
        for action in [
            Action::View,
            Action::Edit,
            Action::Delete,
            Action::Start,
            Action::Log,
        ] {
            assert!(authorize(1, &schedule, action).is_ok());
        }
    }

    #[test]
    fn test_other_user_is_denied() {
        let schedule = schedule_owned_by(1);
        let err = authorize(2, &schedule, Action::View).unwrap_err();
        assert!(matches!(
            err,
            ManagerError::AccessDenied {
                kind: "schedule",
                id: 4,
                action: Action::View
            }
        ));
    }
}
