//! Shared enumerations and their fixed wire-string mappings.
//!
//! The same strings are used on the JSON wire, in SQLite TEXT columns and as
//! dashboard breakdown categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Lifecycle state shared by goals and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "Open")]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Cancelled")]
    Cancelled,
}

impl Status {
    /// Every member in declaration order.
    pub const ALL: [Status; 5] = [
        Status::Open,
        Status::InProgress,
        Status::Completed,
        Status::OnHold,
        Status::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::OnHold => "On Hold",
            Status::Cancelled => "Cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

/// Whether a task stands alone or belongs to a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskType {
    #[default]
    Independent,
    GoalRelated,
}

impl TaskType {
    pub const ALL: [TaskType; 2] = [TaskType::Independent, TaskType::GoalRelated];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TaskType::Independent => "Independent",
            TaskType::GoalRelated => "GoalRelated",
        }
    }

    /// The task type implied by an optional goal link.
    pub fn for_goal(goal_id: Option<&str>) -> Self {
        if goal_id.is_some() {
            TaskType::GoalRelated
        } else {
            TaskType::Independent
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

macro_rules! wire_string_impls {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str() == s)
                    .ok_or_else(|| {
                        Error::Validation(ValidationError::UnknownEnumValue {
                            kind: $kind,
                            value: s.to_string(),
                        })
                    })
            }
        }
    };
}

wire_string_impls!(Status, "status");
wire_string_impls!(Priority, "priority");
wire_string_impls!(TaskType, "task type");
wire_string_impls!(Role, "role");
