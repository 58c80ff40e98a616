//! Project use-case service.
//!
//! # Responsibility
//! - Provide list/select/create entry points over the domain store.
//! - Produce project reports and hand them to an artifact sink.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Report export renders fully in memory before the sink is called.
//! - Export logs carry ids, sizes and durations only, never content.

use crate::model::comment::Comment;
use crate::model::project::{Project, ProjectStatus};
use crate::model::task::Task;
use crate::repo::project_repo::{ProjectRepository, RepoError, RepoResult};
use crate::report::{render_project_report, RenderError};
use crate::service::export::{report_file_name, Artifact, ArtifactSink};
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// User-facing notice shown when a report cannot be produced.
pub const REPORT_FAILURE_NOTICE: &str = "There was an error generating the PDF. Please try again.";

/// Request model for creating a project with a generated id.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
    pub budget: f64,
    pub progress: u8,
}

/// One project joined with its tasks and comments.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetail {
    pub project: Project,
    /// Insertion order.
    pub tasks: Vec<Task>,
    /// Timestamp ascending.
    pub comments: Vec<Comment>,
}

/// Errors raised by report export.
#[derive(Debug)]
pub enum ExportError {
    ProjectNotFound(String),
    Repo(RepoError),
    Render(RenderError),
    /// The sink could not deliver the artifact.
    Io(std::io::Error),
}

impl ExportError {
    /// Generic message suitable for end users, independent of the cause.
    pub fn user_notice(&self) -> &'static str {
        REPORT_FAILURE_NOTICE
    }

    fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "project_not_found",
            Self::Repo(_) => "store_failed",
            Self::Render(_) => "render_failed",
            Self::Io(_) => "artifact_write_failed",
        }
    }
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "failed to write report artifact: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ProjectNotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<RepoError> for ExportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<RenderError> for ExportError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Use-case facade over a domain store.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all projects in insertion order.
    pub fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.repo.list_projects()
    }

    /// Returns one project with its tasks and comments, or `None`.
    pub fn select_project(&self, id: &str) -> RepoResult<Option<ProjectDetail>> {
        let Some(project) = self.repo.get_project(id)? else {
            return Ok(None);
        };
        let tasks = self.repo.get_tasks_for_project(&project.id)?;
        let comments = self.repo.get_comments_for_project(&project.id)?;
        Ok(Some(ProjectDetail {
            project,
            tasks,
            comments,
        }))
    }

    /// Appends a caller-identified project.
    pub fn add_project(&self, project: &Project) -> RepoResult<()> {
        self.repo.add_project(project)?;
        info!(
            "event=project_add module=service status=ok project_id={}",
            project.id
        );
        Ok(())
    }

    /// Creates a project with a generated id and returns the stored record.
    pub fn create_project(&self, request: &CreateProjectRequest) -> RepoResult<Project> {
        let mut project = Project::new(
            request.name.clone(),
            request.start_date,
            request.end_date,
        );
        project.description = request.description.clone();
        project.status = request.status;
        project.budget = request.budget;
        project.progress = request.progress;
        self.add_project(&project)?;
        Ok(project)
    }

    pub fn add_task(&self, task: &Task) -> RepoResult<()> {
        self.repo.add_task(task)
    }

    pub fn add_comment(&self, comment: &Comment) -> RepoResult<()> {
        self.repo.add_comment(comment)
    }

    pub fn get_tasks_for_project(&self, project_id: &str) -> RepoResult<Vec<Task>> {
        self.repo.get_tasks_for_project(project_id)
    }

    pub fn get_comments_for_project(&self, project_id: &str) -> RepoResult<Vec<Comment>> {
        self.repo.get_comments_for_project(project_id)
    }

    /// Renders the report for one project without delivering it.
    ///
    /// Returns the suggested file name together with the PDF bytes.
    pub fn render_report(&self, project_id: &str) -> Result<(String, Vec<u8>), ExportError> {
        let detail = self
            .select_project(project_id)?
            .ok_or_else(|| ExportError::ProjectNotFound(project_id.to_string()))?;
        let bytes = render_project_report(&detail.project, &detail.tasks, &detail.comments)?;
        Ok((report_file_name(&detail.project), bytes))
    }

    /// Renders one project's report and offers it through `sink`.
    ///
    /// # Errors
    /// - `ExportError::ProjectNotFound` for an unknown id.
    /// - `ExportError::Render` when layout/serialization fails; the sink is
    ///   not called.
    /// - `ExportError::Io` when the sink fails to deliver.
    pub fn export_report(
        &self,
        project_id: &str,
        sink: &mut dyn ArtifactSink,
    ) -> Result<Artifact, ExportError> {
        let started_at = Instant::now();
        info!(
            "event=report_export module=service status=start project_id={}",
            project_id
        );

        let result = self
            .render_report(project_id)
            .and_then(|(file_name, bytes)| Ok(sink.offer(&file_name, &bytes)?));

        match &result {
            Ok(artifact) => info!(
                "event=report_export module=service status=ok project_id={} size_bytes={} duration_ms={}",
                project_id,
                artifact.size_bytes,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=report_export module=service status=error project_id={} duration_ms={} error_code={} error={}",
                project_id,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }

        result
    }
}
