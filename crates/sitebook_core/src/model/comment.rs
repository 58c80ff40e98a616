//! Comment and attachment domain model.
//!
//! # Responsibility
//! - Define timestamped project notes and their attachment references.
//!
//! # Invariants
//! - `id` and `project_id` are non-empty.
//! - Attachment ids are non-empty and unique within one comment.
//! - Attachment order is meaningful and preserved end to end.
//! - Attachment URLs are opaque; nothing here dereferences or checks them.

use crate::model::project::ProjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable comment identifier.
pub type CommentId = String;

/// Named reference to an external file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    /// Display name, e.g. `foundation-report.pdf`.
    pub name: String,
    pub url: String,
    /// MIME type string; serialized as `type` to match the external schema.
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            url: url.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyId,
    EmptyProjectId,
    EmptyAttachmentId,
    DuplicateAttachmentId(String),
}

impl Display for CommentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "comment id must not be empty"),
            Self::EmptyProjectId => write!(f, "comment project id must not be empty"),
            Self::EmptyAttachmentId => write!(f, "attachment id must not be empty"),
            Self::DuplicateAttachmentId(id) => {
                write!(f, "attachment id `{id}` appears more than once in comment")
            }
        }
    }
}

impl Error for CommentValidationError {}

/// Timestamped note on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub project_id: ProjectId,
    pub author: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Comment {
    /// Creates a comment without attachments and with a generated id.
    pub fn new(
        project_id: impl Into<ProjectId>,
        author: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            project_id,
            author,
            content,
            timestamp,
        )
    }

    pub fn with_id(
        id: impl Into<CommentId>,
        project_id: impl Into<ProjectId>,
        author: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            author: author.into(),
            content: content.into(),
            timestamp,
            attachments: Vec::new(),
        }
    }

    /// Appends an attachment, keeping sequence order.
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub fn validate(&self) -> Result<(), CommentValidationError> {
        if self.id.trim().is_empty() {
            return Err(CommentValidationError::EmptyId);
        }
        if self.project_id.trim().is_empty() {
            return Err(CommentValidationError::EmptyProjectId);
        }

        let mut seen = HashSet::with_capacity(self.attachments.len());
        for attachment in &self.attachments {
            if attachment.id.trim().is_empty() {
                return Err(CommentValidationError::EmptyAttachmentId);
            }
            if !seen.insert(attachment.id.as_str()) {
                return Err(CommentValidationError::DuplicateAttachmentId(
                    attachment.id.clone(),
                ));
            }
        }
        Ok(())
    }
}
