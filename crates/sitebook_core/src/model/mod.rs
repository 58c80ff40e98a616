//! Domain model for construction project tracking.
//!
//! # Responsibility
//! - Define the canonical records shared by store, services and reports.
//! - Own record-level invariants through `validate()`.
//!
//! # Invariants
//! - Every record is identified by a stable, non-empty string id.
//! - Tasks and comments reference their owning project by id only.
//! - Attachments are owned by exactly one comment.

pub mod category;
pub mod comment;
pub mod project;
pub mod task;
