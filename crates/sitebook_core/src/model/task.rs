//! Task domain model.
//!
//! # Invariants
//! - `id` and `project_id` are non-empty.
//! - The owning project must exist when the task is stored; the repository
//!   enforces this, the model only carries the reference.

use crate::model::category::{DisplayCategory, UnknownVariant};
use crate::model::project::ProjectId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = String;

/// Work state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn category(self) -> DisplayCategory {
        match self {
            Self::Todo => DisplayCategory::Neutral,
            Self::InProgress => DisplayCategory::Warning,
            Self::Completed => DisplayCategory::Success,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "task status",
                value: value.to_string(),
            })
    }
}

/// Urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn category(self) -> DisplayCategory {
        match self {
            Self::Low => DisplayCategory::Info,
            Self::Medium => DisplayCategory::Warning,
            Self::High => DisplayCategory::Danger,
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "task priority",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyProjectId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyProjectId => write!(f, "task project id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// A unit of work belonging to one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
}

impl Task {
    /// Creates a `todo` task of `medium` priority with a generated id.
    pub fn new(
        project_id: impl Into<ProjectId>,
        title: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), project_id, title, due_date)
    }

    /// Same defaults as `new`, with a caller-provided id.
    pub fn with_id(
        id: impl Into<TaskId>,
        project_id: impl Into<ProjectId>,
        title: impl Into<String>,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            assignee: String::new(),
            due_date,
            priority: TaskPriority::Medium,
        }
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.project_id.trim().is_empty() {
            return Err(TaskValidationError::EmptyProjectId);
        }
        Ok(())
    }
}
