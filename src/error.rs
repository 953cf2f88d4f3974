//! Error types for the md2docx library.
//!
//! Three distinct error types reflect three distinct failure tiers:
//!
//! * [`ConvertError`] — **Fatal**: the run cannot proceed at all (input root
//!   missing, output root not writable, bad configuration). Returned as
//!   `Err(ConvertError)` from the top-level `convert*` functions before any
//!   file is processed.
//!
//! * [`FileError`] — **Non-fatal, per file**: one Markdown file failed
//!   (unreadable, malformed encoding, document write error) but every other
//!   file is fine. Stored inside [`crate::output::FileResult`] so callers
//!   can inspect partial success rather than losing the whole run to one
//!   bad file.
//!
//! * [`AssetError`] — **Non-fatal, per asset**: a single referenced PDF or
//!   image could not be fetched, copied, or decoded. Logged as a warning and
//!   skipped; the enclosing document structure is unaffected and no
//!   placeholder is substituted.
//!
//! The separation lets callers decide their own tolerance: abort on the
//! first file failure, log and continue, or collect everything for a
//! post-run report.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2docx library.
///
/// File-level failures use [`FileError`] and are stored in
/// [`crate::output::FileResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input root does not exist.
    #[error("Input directory not found: '{path}'\nCheck the path exists and is readable.")]
    InputRootNotFound { path: PathBuf },

    /// The input root exists but is not a directory.
    #[error("Input path is not a directory: '{path}'")]
    InputRootNotADirectory { path: PathBuf },

    /// The output root could not be created.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputRootCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single Markdown file.
///
/// Stored inside [`crate::output::FileResult`] when a file fails.
/// The overall run always continues to the next file.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The source file could not be read (I/O error or invalid UTF-8).
    #[error("'{path}': failed to read source: {detail}")]
    Read { path: String, detail: String },

    /// The mirrored output directory could not be created.
    #[error("'{path}': failed to create output directory: {detail}")]
    OutputDir { path: String, detail: String },

    /// The document could not be built or written to disk.
    #[error("'{path}': failed to write document: {detail}")]
    DocumentWrite { path: String, detail: String },
}

/// A non-fatal error for a single referenced asset (PDF or image).
///
/// Consumed by the caller purely for logging; never propagated past the
/// asset boundary.
#[derive(Debug, Error)]
pub enum AssetError {
    /// HTTP transport error while fetching a PDF.
    #[error("download failed for '{url}': {reason}")]
    Download { url: String, reason: String },

    /// PDF fetch exceeded the configured timeout.
    #[error("download timed out after {secs}s for '{url}'")]
    DownloadTimeout { url: String, secs: u64 },

    /// The server answered with a non-success status.
    #[error("'{url}' returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// A referenced local PDF does not exist.
    #[error("PDF file not found: '{path}'")]
    MissingPdf { path: PathBuf },

    /// Copying a local PDF into the output tree failed.
    #[error("failed to copy '{from}' to '{to}': {detail}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        detail: String,
    },

    /// Writing downloaded PDF bytes failed.
    #[error("failed to write '{path}': {detail}")]
    Write { path: PathBuf, detail: String },

    /// A referenced local image does not exist.
    #[error("image file not found: '{path}'")]
    MissingImage { path: PathBuf },

    /// The image exists but could not be decoded.
    #[error("failed to decode image '{path}': {detail}")]
    ImageDecode { path: PathBuf, detail: String },
}
