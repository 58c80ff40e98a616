//! Report artifact naming and delivery.
//!
//! # Responsibility
//! - Derive the download file name for a project report.
//! - Offer finished report bytes to the user through an `ArtifactSink`.
//!
//! # Invariants
//! - A sink either delivers the complete artifact or leaves nothing behind.
//! - Sinks never see partial report bytes; rendering finishes first.

use crate::model::project::Project;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File extension of rendered reports.
pub const REPORT_EXTENSION: &str = "pdf";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Returns `<lower-cased name, whitespace runs as "-">-report.pdf`.
///
/// Path separators are replaced by `-` as well so the name always stays a
/// single path component.
pub fn report_file_name(project: &Project) -> String {
    let lowered = project.name.to_lowercase();
    let slug = WHITESPACE_RE.replace_all(&lowered, "-");
    let slug = slug.replace(['/', '\\'], "-");
    format!("{slug}-report.{REPORT_EXTENSION}")
}

/// Delivered report artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    /// Sink-specific location, e.g. the written file path.
    pub location: PathBuf,
    pub size_bytes: usize,
}

/// Destination that offers finished report bytes to the user.
pub trait ArtifactSink {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<Artifact>;
}

/// Writes artifacts into a directory, atomically per file.
///
/// Bytes go to a temporary file in the target directory first and are
/// renamed into place only after a successful flush.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for DirectorySink {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<Artifact> {
        fs::create_dir_all(&self.dir)?;

        let mut staged = tempfile::Builder::new()
            .prefix(".sitebook-")
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;

        let target = self.dir.join(file_name);
        staged.persist(&target).map_err(|err| err.error)?;

        Ok(Artifact {
            file_name: file_name.to_string(),
            location: target,
            size_bytes: bytes.len(),
        })
    }
}

/// Keeps artifacts in memory; used by embedders and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: Vec<(String, Vec<u8>)>,
}

impl ArtifactSink for MemorySink {
    fn offer(&mut self, file_name: &str, bytes: &[u8]) -> io::Result<Artifact> {
        self.artifacts.push((file_name.to_string(), bytes.to_vec()));
        Ok(Artifact {
            file_name: file_name.to_string(),
            location: PathBuf::from(file_name),
            size_bytes: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::report_file_name;
    use crate::model::project::Project;
    use chrono::NaiveDate;

    fn project_named(name: &str) -> Project {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Project::with_id("p", name, day, day)
    }

    #[test]
    fn file_name_lowercases_and_hyphenates() {
        assert_eq!(
            report_file_name(&project_named("City Center Complex")),
            "city-center-complex-report.pdf"
        );
    }

    #[test]
    fn file_name_collapses_whitespace_runs() {
        assert_eq!(
            report_file_name(&project_named("Tech  Hub\tAnnex")),
            "tech-hub-annex-report.pdf"
        );
    }

    #[test]
    fn file_name_never_contains_path_separators() {
        assert_eq!(
            report_file_name(&project_named("North/South Wing")),
            "north-south-wing-report.pdf"
        );
    }
}
