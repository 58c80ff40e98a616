//! Project/task/comment store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read APIs over projects and their associated records.
//! - Enforce id uniqueness and owning-project references on insert.
//!
//! # Invariants
//! - Projects and tasks are returned in insertion order.
//! - Comments are returned by timestamp ascending, ties in insertion order.
//! - Attachments are returned in their original sequence order.
//! - A rejected write leaves the store unchanged.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::comment::{Attachment, Comment, CommentValidationError};
use crate::model::project::{Project, ProjectId, ProjectValidationError};
use crate::model::task::{Task, TaskValidationError};
use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    start_date,
    end_date,
    status,
    budget,
    progress
FROM projects";

const TASK_SELECT_SQL: &str = "SELECT
    id,
    project_id,
    title,
    description,
    status,
    assignee,
    due_date,
    priority
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Record family, used to qualify duplicate-id errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Project,
    Task,
    Comment,
}

impl RecordKind {
    fn table(self) -> &'static str {
        match self {
            Self::Project => "projects",
            Self::Task => "tasks",
            Self::Comment => "comments",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Task => f.write_str("task"),
            Self::Comment => f.write_str("comment"),
        }
    }
}

/// Store error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    InvalidProject(ProjectValidationError),
    InvalidTask(TaskValidationError),
    InvalidComment(CommentValidationError),
    /// Insert with an id that is already taken; nothing was written.
    DuplicateId { kind: RecordKind, id: String },
    /// Task or comment references a project that is not in the store.
    UnknownProject(ProjectId),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProject(err) => write!(f, "{err}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
            Self::InvalidComment(err) => write!(f, "{err}"),
            Self::DuplicateId { kind, id } => write!(f, "{kind} id already exists: {id}"),
            Self::UnknownProject(id) => write!(f, "project not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidProject(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            Self::InvalidComment(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::DuplicateId { .. } | Self::UnknownProject(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::InvalidProject(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}

impl From<CommentValidationError> for RepoError {
    fn from(value: CommentValidationError) -> Self {
        Self::InvalidComment(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Domain store contract for projects and their associated records.
pub trait ProjectRepository {
    /// Appends a project; fails with `DuplicateId` when the id is taken.
    fn add_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: &str) -> RepoResult<Option<Project>>;
    /// All projects in insertion order.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    /// Appends a task; the owning project must already exist.
    fn add_task(&self, task: &Task) -> RepoResult<()>;
    fn get_tasks_for_project(&self, project_id: &str) -> RepoResult<Vec<Task>>;
    /// Stores a comment together with all of its attachments, or nothing.
    fn add_comment(&self, comment: &Comment) -> RepoResult<()>;
    fn get_comments_for_project(&self, project_id: &str) -> RepoResult<Vec<Comment>>;
}

/// SQLite-backed domain store.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `DbError::SchemaNotReady` when migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let db_version = current_user_version(conn)?;
        let expected = latest_version();
        if db_version != expected {
            return Err(DbError::SchemaNotReady {
                db_version,
                expected,
            }
            .into());
        }
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn add_project(&self, project: &Project) -> RepoResult<()> {
        project.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        ensure_id_free(&tx, RecordKind::Project, &project.id)?;
        tx.execute(
            "INSERT INTO projects (
                id,
                name,
                description,
                start_date,
                end_date,
                status,
                budget,
                progress
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                project.id.as_str(),
                project.name.as_str(),
                project.description.as_str(),
                date_to_db(project.start_date),
                date_to_db(project.end_date),
                project.status.as_str(),
                project.budget,
                i64::from(project.progress),
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn get_project(&self, id: &str) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn add_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        ensure_id_free(&tx, RecordKind::Task, &task.id)?;
        ensure_project_exists(&tx, &task.project_id)?;
        tx.execute(
            "INSERT INTO tasks (
                id,
                project_id,
                title,
                description,
                status,
                assignee,
                due_date,
                priority
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                task.id.as_str(),
                task.project_id.as_str(),
                task.title.as_str(),
                task.description.as_str(),
                task.status.as_str(),
                task.assignee.as_str(),
                date_to_db(task.due_date),
                task.priority.as_str(),
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn get_tasks_for_project(&self, project_id: &str) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} WHERE project_id = ?1 ORDER BY seq ASC;"
        ))?;
        let mut rows = stmt.query([project_id])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn add_comment(&self, comment: &Comment) -> RepoResult<()> {
        comment.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        ensure_id_free(&tx, RecordKind::Comment, &comment.id)?;
        ensure_project_exists(&tx, &comment.project_id)?;
        tx.execute(
            "INSERT INTO comments (
                id,
                project_id,
                author,
                content,
                timestamp,
                timestamp_us
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                comment.id.as_str(),
                comment.project_id.as_str(),
                comment.author.as_str(),
                comment.content.as_str(),
                timestamp_to_db(comment.timestamp),
                comment.timestamp.timestamp_micros(),
            ],
        )?;

        for (position, attachment) in comment.attachments.iter().enumerate() {
            let position = i64::try_from(position).map_err(|_| {
                RepoError::InvalidData(format!(
                    "comment `{}` has too many attachments",
                    comment.id
                ))
            })?;
            tx.execute(
                "INSERT INTO attachments (
                    comment_id,
                    position,
                    id,
                    name,
                    url,
                    mime_type
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    comment.id.as_str(),
                    position,
                    attachment.id.as_str(),
                    attachment.name.as_str(),
                    attachment.url.as_str(),
                    attachment.mime_type.as_str(),
                ],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_comments_for_project(&self, project_id: &str) -> RepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                project_id,
                author,
                content,
                timestamp
             FROM comments
             WHERE project_id = ?1
             ORDER BY timestamp_us ASC, seq ASC;",
        )?;
        let mut rows = stmt.query([project_id])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get("id")?;
            let timestamp_text: String = row.get("timestamp")?;
            let attachments = load_attachments(self.conn, &id)?;
            comments.push(Comment {
                timestamp: parse_timestamp(&timestamp_text)?,
                project_id: row.get("project_id")?,
                author: row.get("author")?,
                content: row.get("content")?,
                attachments,
                id,
            });
        }

        Ok(comments)
    }
}

fn ensure_id_free(conn: &Connection, kind: RecordKind, id: &str) -> RepoResult<()> {
    if record_exists(conn, kind, id)? {
        return Err(RepoError::DuplicateId {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

fn ensure_project_exists(conn: &Connection, project_id: &str) -> RepoResult<()> {
    if !record_exists(conn, RecordKind::Project, project_id)? {
        return Err(RepoError::UnknownProject(project_id.to_string()));
    }
    Ok(())
}

fn record_exists(conn: &Connection, kind: RecordKind, id: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);",
            kind.table()
        ),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn load_attachments(conn: &Connection, comment_id: &str) -> RepoResult<Vec<Attachment>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, url, mime_type
         FROM attachments
         WHERE comment_id = ?1
         ORDER BY position ASC;",
    )?;
    let mut rows = stmt.query([comment_id])?;
    let mut attachments = Vec::new();
    while let Some(row) = rows.next()? {
        attachments.push(Attachment {
            id: row.get("id")?,
            name: row.get("name")?,
            url: row.get("url")?,
            mime_type: row.get("mime_type")?,
        });
    }

    Ok(attachments)
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let status_text: String = row.get("status")?;
    let status = status_text.parse().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid project status `{status_text}` in projects.status"
        ))
    })?;

    let progress_value: i64 = row.get("progress")?;
    let progress = u8::try_from(progress_value).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid progress `{progress_value}` in projects.progress"
        ))
    })?;

    let project = Project {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        start_date: parse_date(row.get("start_date")?)?,
        end_date: parse_date(row.get("end_date")?)?,
        status,
        budget: row.get("budget")?,
        progress,
    };
    project
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;
    Ok(project)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let status_text: String = row.get("status")?;
    let status = status_text.parse().map_err(|_| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let priority_text: String = row.get("priority")?;
    let priority = priority_text.parse().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid task priority `{priority_text}` in tasks.priority"
        ))
    })?;

    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        assignee: row.get("assignee")?,
        due_date: parse_date(row.get("due_date")?)?,
        priority,
    })
}

/// Dates are stored as days since 0001-01-01 (day 1), so SQL comparisons
/// agree with `NaiveDate` ordering for every representable year.
fn date_to_db(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

fn parse_date(days: i32) -> RepoResult<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid day number `{days}`")))
}

fn timestamp_to_db(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(value: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| RepoError::InvalidData(format!("invalid timestamp `{value}`: {err}")))
}
