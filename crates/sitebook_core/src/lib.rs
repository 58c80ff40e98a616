//! Core domain logic for SiteBook construction project tracking.
//! This crate owns the record invariants and the report projection.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod report;
pub mod seed;
pub mod service;

pub use logging::{
    default_log_level, init_logging, logging_status, parse_log_level, LoggingError,
};
pub use model::category::{DisplayCategory, UnknownVariant};
pub use model::comment::{Attachment, Comment, CommentId, CommentValidationError};
pub use model::project::{
    Project, ProjectId, ProjectStatus, ProjectValidationError, MAX_BUDGET,
};
pub use model::task::{Task, TaskId, TaskPriority, TaskStatus, TaskValidationError};
pub use repo::project_repo::{
    ProjectRepository, RecordKind, RepoError, RepoResult, SqliteProjectRepository,
};
pub use report::{render_project_report, RenderError};
pub use seed::{load_seed, open_seeded_store, SeedData, SeedError};
pub use service::export::{
    report_file_name, Artifact, ArtifactSink, DirectorySink, MemorySink,
};
pub use service::project_service::{
    CreateProjectRequest, ExportError, ProjectDetail, ProjectService, REPORT_FAILURE_NOTICE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
