//! Project domain model.
//!
//! # Responsibility
//! - Define the tracked construction project record.
//! - Validate schedule, budget and progress invariants.
//!
//! # Invariants
//! - `id` is non-empty and never reused for another project.
//! - `end_date` is not earlier than `start_date`.
//! - `progress` stays within `0..=100`.
//! - `budget` is finite and within `0..=MAX_BUDGET`.

use crate::model::category::{DisplayCategory, UnknownVariant};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable project identifier.
pub type ProjectId = String;

/// Upper bound for `Project::progress`.
pub const MAX_PROGRESS: u8 = 100;

/// Upper bound for `Project::budget`.
///
/// Below this bound every whole cent is exactly representable as `f64`.
pub const MAX_BUDGET: f64 = 10_000_000_000_000.0;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Planning,
    InProgress,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Planning,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::OnHold,
    ];

    /// Returns the literal wire string, e.g. `in-progress`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::OnHold => "on-hold",
        }
    }

    pub fn category(self) -> DisplayCategory {
        match self {
            Self::Planning => DisplayCategory::Info,
            Self::InProgress => DisplayCategory::Warning,
            Self::Completed => DisplayCategory::Success,
            Self::OnHold => DisplayCategory::Danger,
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant {
                kind: "project status",
                value: value.to_string(),
            })
    }
}

/// Validation errors for `Project` invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectValidationError {
    EmptyId,
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
    ProgressOutOfRange(u8),
    InvalidBudget(f64),
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "project id must not be empty"),
            Self::InvalidDateRange { start, end } => write!(
                f,
                "project end date ({end}) must be >= start date ({start})"
            ),
            Self::ProgressOutOfRange(progress) => write!(
                f,
                "project progress ({progress}) must be within 0..={MAX_PROGRESS}"
            ),
            Self::InvalidBudget(budget) => write!(
                f,
                "project budget ({budget}) must be a finite amount within 0..={MAX_BUDGET}"
            ),
        }
    }
}

impl Error for ProjectValidationError {}

/// A tracked construction effort with schedule, budget and completion data.
///
/// Deserialization runs `validate()`, so decoded projects always satisfy the
/// module invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProjectWire")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    /// Monetary amount in whole currency units; fractions are cents.
    pub budget: f64,
    /// Completion percentage.
    pub progress: u8,
}

impl Project {
    /// Creates a project with a generated id.
    ///
    /// Starts in `planning` with zero budget and progress.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, start_date, end_date)
    }

    /// Creates a project with a caller-provided id.
    ///
    /// Used by seed/import paths where identity already exists externally.
    /// Does not validate; callers persisting the project go through the
    /// repository, which does.
    pub fn with_id(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            start_date,
            end_date,
            status: ProjectStatus::Planning,
            budget: 0.0,
            progress: 0,
        }
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.id.trim().is_empty() {
            return Err(ProjectValidationError::EmptyId);
        }
        if self.end_date < self.start_date {
            return Err(ProjectValidationError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.progress > MAX_PROGRESS {
            return Err(ProjectValidationError::ProgressOutOfRange(self.progress));
        }
        if !(0.0..=MAX_BUDGET).contains(&self.budget) {
            return Err(ProjectValidationError::InvalidBudget(self.budget));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectWire {
    id: ProjectId,
    name: String,
    #[serde(default)]
    description: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: ProjectStatus,
    budget: f64,
    progress: u8,
}

impl TryFrom<ProjectWire> for Project {
    type Error = ProjectValidationError;

    fn try_from(wire: ProjectWire) -> Result<Self, Self::Error> {
        let project = Project {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            start_date: wire.start_date,
            end_date: wire.end_date,
            status: wire.status,
            budget: wire.budget,
            progress: wire.progress,
        };
        project.validate()?;
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::{Project, ProjectStatus, ProjectValidationError, MAX_BUDGET};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn status_literals_roundtrip_through_from_str() {
        for status in ProjectStatus::ALL {
            assert_eq!(status.as_str().parse::<ProjectStatus>().unwrap(), status);
        }
        assert!("on_hold".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn single_day_project_is_valid() {
        let project = Project::with_id("p", "Kiosk", date(2024, 1, 1), date(2024, 1, 1));
        assert!(project.validate().is_ok());
    }

    #[test]
    fn nan_budget_is_rejected() {
        let mut project = Project::with_id("p", "Kiosk", date(2024, 1, 1), date(2024, 1, 2));
        project.budget = f64::NAN;
        assert!(matches!(
            project.validate(),
            Err(ProjectValidationError::InvalidBudget(_))
        ));
    }

    #[test]
    fn budget_is_bounded_above() {
        let mut project = Project::with_id("p", "Tower", date(2024, 1, 1), date(2024, 1, 2));
        project.budget = MAX_BUDGET;
        assert!(project.validate().is_ok());

        for budget in [MAX_BUDGET + 0.01, 1e20, f64::INFINITY] {
            project.budget = budget;
            assert!(matches!(
                project.validate(),
                Err(ProjectValidationError::InvalidBudget(_))
            ));
        }
    }
}
