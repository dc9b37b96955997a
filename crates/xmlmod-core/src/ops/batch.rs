//! Multi-file batch application
//!
//! Batch mode is repeated sequential invocation of the single-file engine,
//! one owned document per file, with no cross-file transaction. The policy
//! here is continue-and-collect: each file's outcome (including its error,
//! if any) is recorded independently and one failure never aborts the rest.
//! An invalid pattern is the exception: it is rejected once, up front,
//! before any file is touched.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{Result, XmlModError};
use crate::ops::substitute::{self, Change, Matcher, Substitution};

/// Outcome of one file in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: String,
    /// Number of substitution instances found (0 when the file errored)
    pub changes: usize,
    /// Individual change records, in document order
    pub records: Vec<Change>,
    /// Human-readable error, when the file failed
    pub error: Option<String>,
}

/// Per-file outcomes for one batch run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// Total substitution instances across all files
    pub fn total_changes(&self) -> usize {
        self.files.iter().map(|f| f.changes).sum()
    }

    /// Number of files that failed
    pub fn failures(&self) -> usize {
        self.files.iter().filter(|f| f.error.is_some()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|f| f.error.is_some())
    }
}

/// List the `.xml` files directly inside `dir`, sorted by path
///
/// Non-recursive; the extension check is case-insensitive. The caller
/// iterates the returned list, the core never walks the filesystem beyond
/// this one listing.
///
/// # Errors
///
/// Returns `Io` if the directory cannot be read.
pub fn xml_files_in(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| XmlModError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| XmlModError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        let is_xml = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if is_xml {
            files.push(path);
        }
    }
    files.sort();
    info!(op = "list_xml_files", dir = %dir.display(), count = files.len(), "directory scanned");
    Ok(files)
}

/// Apply (or preview) one substitution across many files, sequentially
///
/// # Errors
///
/// Returns `Pattern` before processing any file when regex mode is
/// requested with an invalid pattern. Per-file errors do not surface here;
/// they are collected into the report.
pub fn substitute_all(
    paths: &[PathBuf],
    substitution: &Substitution,
    preview: bool,
) -> Result<BatchReport> {
    // Reject a bad pattern once, before the loop touches any file
    Matcher::compile(substitution)?;

    let mut report = BatchReport::default();
    for path in paths {
        let file_report = match substitute::substitute_file(path, substitution, preview) {
            Ok(modification) => FileReport {
                path: path.display().to_string(),
                changes: modification.count(),
                records: modification.changes,
                error: None,
            },
            Err(e) => FileReport {
                path: path.display().to_string(),
                changes: 0,
                records: Vec::new(),
                error: Some(e.to_string()),
            },
        };
        report.files.push(file_report);
    }

    info!(
        op = "substitute_all",
        files = report.files.len(),
        changes = report.total_changes(),
        failures = report.failures(),
        preview,
        "batch finished"
    );
    Ok(report)
}
