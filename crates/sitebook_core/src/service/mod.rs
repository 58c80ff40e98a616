//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store reads/writes and report rendering into use cases.
//! - Keep presentation/adapter layers decoupled from storage details.

pub mod export;
pub mod project_service;
