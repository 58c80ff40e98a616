//! Seed data injection for the in-memory store.
//!
//! # Responsibility
//! - Decode seed fixtures from JSON.
//! - Load fixtures into a fresh store in dependency order.
//!
//! # Invariants
//! - Projects load before tasks and comments, so references resolve.
//! - A failed load returns an error and discards the partially filled store.

use crate::db::{open_db_in_memory, DbError};
use crate::model::comment::Comment;
use crate::model::project::Project;
use crate::model::task::Task;
use crate::repo::project_repo::{ProjectRepository, RepoError, SqliteProjectRepository};
use log::{error, info};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BUILTIN_FIXTURE: &str = include_str!("fixture.json");

#[derive(Debug)]
pub enum SeedError {
    Parse(serde_json::Error),
    Db(DbError),
    Repo(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid seed data: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "failed to load seed data: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<DbError> for SeedError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Records injected into a store at construction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl SeedData {
    /// Decodes seed data from a JSON document.
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Built-in demo fixture: three projects, each with three tasks and one
    /// comment carrying a report attachment.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_FIXTURE)
    }
}

/// Inserts every seed record through the repository contract.
pub fn load_seed(repo: &impl ProjectRepository, seed: &SeedData) -> Result<(), SeedError> {
    for project in &seed.projects {
        repo.add_project(project)?;
    }
    for task in &seed.tasks {
        repo.add_task(task)?;
    }
    for comment in &seed.comments {
        repo.add_comment(comment)?;
    }
    Ok(())
}

/// Opens a fresh in-memory store and loads `seed` into it.
///
/// # Side effects
/// - Emits `seed_load` logging events with record counts.
pub fn open_seeded_store(seed: &SeedData) -> Result<Connection, SeedError> {
    let conn = open_db_in_memory()?;
    let result = SqliteProjectRepository::try_new(&conn)
        .map_err(SeedError::from)
        .and_then(|repo| load_seed(&repo, seed));

    match result {
        Ok(()) => {
            info!(
                "event=seed_load module=seed status=ok projects={} tasks={} comments={}",
                seed.projects.len(),
                seed.tasks.len(),
                seed.comments.len()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=seed_load module=seed status=error error={}",
                err
            );
            Err(err)
        }
    }
}
