//! Project report projector.
//!
//! # Responsibility
//! - Render one project with its tasks and comments into a paginated PDF.
//! - Keep rendering pure: bytes are produced in memory and returned.
//!
//! # Invariants
//! - Identical inputs produce byte-identical output.
//! - Tasks and comments are rendered in the order supplied by the caller.
//! - Failure yields an error and no bytes; there is no partial document.

use crate::model::project::ProjectValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod format;
pub mod layout;
pub mod metrics;
pub mod pdf;
mod projector;

pub use projector::{lay_out_report, render_project_report, MAX_REPORT_PAGES};

/// Errors raised while producing report bytes.
#[derive(Debug)]
pub enum RenderError {
    /// Project violates its own invariants and cannot be formatted.
    InvalidProject(ProjectValidationError),
    /// Layout needs more pages than the configured limit.
    PageLimitExceeded { limit: usize },
    Io(std::io::Error),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProject(err) => write!(f, "cannot render project: {err}"),
            Self::PageLimitExceeded { limit } => {
                write!(f, "report exceeds the limit of {limit} pages")
            }
            Self::Io(err) => write!(f, "failed to serialize report: {err}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidProject(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::PageLimitExceeded { .. } => None,
        }
    }
}

impl From<ProjectValidationError> for RenderError {
    fn from(value: ProjectValidationError) -> Self {
        Self::InvalidProject(value)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
