//! Progress-callback trait for per-file conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the run processes each Markdown file.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a terminal progress bar, a log file, or a database record
//! without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so a single callback can also be
//! shared with other threads of the host application even though the run
//! itself is strictly sequential.

use std::sync::Arc;

/// Called by the conversion driver as it processes each file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Files are processed one at a time, so events for a
/// given run arrive in order.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called once after discovery, before any file is processed.
    ///
    /// # Arguments
    /// * `total_files` — number of Markdown files that will be processed
    fn on_run_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file's PDF resolution and parsing begin.
    ///
    /// # Arguments
    /// * `file_num`    — 1-indexed position in the run
    /// * `total_files` — total files in the run
    /// * `relative`    — path relative to the input root
    fn on_file_start(&self, file_num: usize, total_files: usize, relative: &str) {
        let _ = (file_num, total_files, relative);
    }

    /// Called when a file's document has been written successfully.
    ///
    /// # Arguments
    /// * `blocks` — number of body blocks emitted into the document
    fn on_file_complete(&self, file_num: usize, total_files: usize, relative: &str, blocks: usize) {
        let _ = (file_num, total_files, relative, blocks);
    }

    /// Called when a file fails with a file-level error.
    fn on_file_error(&self, file_num: usize, total_files: usize, relative: &str, error: &str) {
        let _ = (file_num, total_files, relative, error);
    }

    /// Called once after all files have been attempted.
    ///
    /// # Arguments
    /// * `success_count` — files that converted without error
    fn on_run_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
