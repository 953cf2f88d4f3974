//! # md2docx
//!
//! Batch-convert a directory tree of Markdown files to Word documents.
//!
//! ## What it does
//!
//! Given an input root and an output root, the converter walks the input
//! recursively, turns every `.md` file into a `.docx` at the mirrored output
//! path, inlines local images scaled to a fixed display width, and localizes
//! referenced PDF attachments (downloaded from URLs or copied from disk)
//! alongside each generated document. The supported Markdown subset is the
//! small closed set the corpus actually uses — a title line, `####` and
//! `**…**` headings, `:::` info blocks, `<u>…</u>` markup, images, and
//! running paragraphs. Tables, nested lists, code blocks, and blockquotes
//! are out of scope.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input root
//!  │
//!  ├─ 1. Discover  walk for .md files, pair each with its relative path
//!  ├─ 2. Assets    extract [text](x.pdf) links; download or copy each
//!  ├─ 3. Classify  tag each line (blank / info / heading / image / text)
//!  ├─ 4. Emit      fold lines into ordered blocks, running paragraphs
//!  └─ 5. Output    one .docx per source at the mirrored path + stats
//! ```
//!
//! Processing is strictly sequential: one file at a time, PDF localization
//! before body parsing. The only cross-file state is the figure-caption
//! counter, which increases monotonically across the whole run.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2docx::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder("docs", "output").build()?;
//!     let run = convert(&config).await?;
//!     println!(
//!         "{}/{} files converted",
//!         run.stats.converted_files, run.stats.total_files
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Only a missing input root (or an uncreatable output root) aborts a run.
//! A file that cannot be read or written is logged, counted, and skipped;
//! a PDF or image that cannot be fetched, copied, or decoded is logged and
//! skipped without disturbing the document around it. See [`error`].
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2docx` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! md2docx = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_sync};
pub use error::{AssetError, ConvertError, FileError};
pub use output::{FileResult, RunOutput, RunStats};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
