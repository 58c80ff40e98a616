//! Display categories used by list/detail projections.

use serde::Serialize;

/// Coarse visual category for a status or priority value.
///
/// Presentation layers map these to colours; core only decides the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayCategory {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

impl DisplayCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// Error returned when parsing an enum from an unknown literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Enum family being parsed, e.g. `project status`.
    pub kind: &'static str,
    /// Rejected input literal.
    pub value: String,
}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}
