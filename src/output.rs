//! Result types returned by a conversion run.
//!
//! [`RunOutput`] is the full structured result: one [`FileResult`] per
//! discovered Markdown file plus aggregate [`RunStats`]. Everything here is
//! serde-serializable so the CLI's `--json` mode can print it verbatim.

use crate::error::FileError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Full result of one conversion run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    /// One entry per discovered file, in processing order.
    pub files: Vec<FileResult>,
    /// Aggregate counters for the run.
    pub stats: RunStats,
}

/// Outcome of processing one Markdown file.
///
/// A populated `error` means the file failed with a file-level error and no
/// document was produced; asset-level failures (skipped PDFs, missing
/// images) do not set it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// Path relative to the input root, as reported in logs.
    pub relative_path: String,
    /// Where the `.docx` was (or would have been) written.
    pub output_path: PathBuf,
    /// Body blocks emitted (headings, paragraphs, images, captions).
    pub blocks: usize,
    /// PDF references localized for this file (downloads + copies).
    pub pdfs_localized: usize,
    /// PDF references skipped with a warning.
    pub pdfs_skipped: usize,
    /// Images embedded into the document.
    pub images_embedded: usize,
    /// Image references skipped (remote URL, missing file, decode error).
    pub images_skipped: usize,
    /// Wall-clock time spent on this file.
    pub duration_ms: u64,
    /// File-level failure, if any.
    pub error: Option<FileError>,
}

impl FileResult {
    /// True when a document was produced for this file.
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate counters for a run.
///
/// `converted_files` equals the number of documents on disk: exactly one
/// document is produced per file that does not fail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Markdown files discovered under the input root.
    pub total_files: usize,
    /// Files converted to a document.
    pub converted_files: usize,
    /// Files that failed with a file-level error.
    pub failed_files: usize,
    /// PDF references fetched over HTTP.
    pub pdfs_downloaded: usize,
    /// PDF references copied from the local tree.
    pub pdfs_copied: usize,
    /// PDF references skipped with a warning.
    pub pdfs_skipped: usize,
    /// Images embedded across all documents.
    pub images_embedded: usize,
    /// Image references skipped across all documents.
    pub images_skipped: usize,
    /// Total wall-clock time for the run.
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(error: Option<FileError>) -> FileResult {
        FileResult {
            relative_path: "guide/intro.md".into(),
            output_path: PathBuf::from("out/guide/intro.docx"),
            blocks: 12,
            pdfs_localized: 1,
            pdfs_skipped: 0,
            images_embedded: 2,
            images_skipped: 1,
            duration_ms: 40,
            error,
        }
    }

    #[test]
    fn succeeded_reflects_error_presence() {
        assert!(sample_result(None).succeeded());
        let failed = sample_result(Some(FileError::Read {
            path: "guide/intro.md".into(),
            detail: "invalid UTF-8".into(),
        }));
        assert!(!failed.succeeded());
    }

    #[test]
    fn run_output_serializes_to_json() {
        let out = RunOutput {
            files: vec![sample_result(None)],
            stats: RunStats {
                total_files: 1,
                converted_files: 1,
                ..Default::default()
            },
        };
        let json = serde_json::to_string_pretty(&out).unwrap();
        assert!(json.contains("guide/intro.md"));
        assert!(json.contains("\"converted_files\": 1"));
    }
}
