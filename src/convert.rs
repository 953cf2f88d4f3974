//! Conversion entry points: the per-run driver and per-file processing.
//!
//! ## Sequential by design
//!
//! Files are processed one at a time in discovery order; within a file, PDF
//! localization runs to completion before the body is parsed. Nothing here
//! fans out: the only state shared across files is the figure counter,
//! threaded explicitly through each call rather than held as a global, so
//! per-file processing stays testable in isolation.

use crate::config::ConversionConfig;
use crate::error::{ConvertError, FileError};
use crate::output::{FileResult, RunOutput, RunStats};
use crate::pipeline::{assets, classify, discover, emit};
use crate::pipeline::classify::LineClass;
use crate::pipeline::discover::MarkdownSource;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert every Markdown file under the input root.
///
/// This is the primary entry point for the library.
///
/// # Returns
/// `Ok(RunOutput)` on success, even if some files failed
/// (check `output.stats.failed_files`).
///
/// # Errors
/// Returns `Err(ConvertError)` only for fatal errors:
/// - Input root missing or not a directory
/// - Output root could not be created
pub async fn convert(config: &ConversionConfig) -> Result<RunOutput, ConvertError> {
    let run_start = Instant::now();

    // ── Step 1: Validate roots ───────────────────────────────────────────
    if !config.input_root.exists() {
        return Err(ConvertError::InputRootNotFound {
            path: config.input_root.clone(),
        });
    }
    if !config.input_root.is_dir() {
        return Err(ConvertError::InputRootNotADirectory {
            path: config.input_root.clone(),
        });
    }
    tokio::fs::create_dir_all(&config.output_root)
        .await
        .map_err(|e| ConvertError::OutputRootCreateFailed {
            path: config.output_root.clone(),
            source: e,
        })?;

    info!(
        "Starting conversion: {} -> {}",
        config.input_root.display(),
        config.output_root.display()
    );

    // ── Step 2: Discover sources ─────────────────────────────────────────
    let sources = discover::find_markdown_sources(&config.input_root);
    let total = sources.len();
    info!("Found {} Markdown files", total);

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_start(total);
    }

    // ── Step 3: Shared run state ─────────────────────────────────────────
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.download_timeout_secs))
        .build()
        .map_err(|e| ConvertError::Internal(format!("HTTP client: {e}")))?;

    let mut figure_counter: u32 = 1;
    let mut stats = RunStats {
        total_files: total,
        ..Default::default()
    };
    let mut files = Vec::with_capacity(total);

    // ── Step 4: Sequential per-file loop ─────────────────────────────────
    for (i, source) in sources.iter().enumerate() {
        let relative = source.relative.display().to_string();
        if let Some(ref cb) = config.progress_callback {
            cb.on_file_start(i + 1, total, &relative);
        }

        let result = process_file(source, config, &client, &mut figure_counter).await;

        match result.error {
            None => {
                stats.converted_files += 1;
                info!("Converted {} ({} blocks)", relative, result.blocks);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_complete(i + 1, total, &relative, result.blocks);
                }
            }
            Some(ref e) => {
                stats.failed_files += 1;
                warn!("Failed {}: {}", relative, e);
                if let Some(ref cb) = config.progress_callback {
                    cb.on_file_error(i + 1, total, &relative, &e.to_string());
                }
            }
        }

        stats.pdfs_downloaded += result.pdfs_downloaded;
        stats.pdfs_copied += result.pdfs_copied;
        stats.pdfs_skipped += result.pdfs_skipped;
        stats.images_embedded += result.images_embedded;
        stats.images_skipped += result.images_skipped;
        files.push(result.into_file_result());
    }

    stats.total_duration_ms = run_start.elapsed().as_millis() as u64;
    info!(
        "Conversion complete: {}/{} files, {}ms total",
        stats.converted_files, stats.total_files, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_run_complete(total, stats.converted_files);
    }

    Ok(RunOutput { files, stats })
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(config: &ConversionConfig) -> Result<RunOutput, ConvertError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ConvertError::Internal(format!("Failed to create tokio runtime: {e}")))?
        .block_on(convert(config))
}

/// Per-file outcome carrying the counters [`convert`] folds into [`RunStats`].
struct FileOutcome {
    relative: String,
    output_path: PathBuf,
    blocks: usize,
    pdfs_downloaded: usize,
    pdfs_copied: usize,
    pdfs_skipped: usize,
    images_embedded: usize,
    images_skipped: usize,
    duration_ms: u64,
    error: Option<FileError>,
}

impl FileOutcome {
    fn into_file_result(self) -> FileResult {
        FileResult {
            relative_path: self.relative,
            output_path: self.output_path,
            blocks: self.blocks,
            pdfs_localized: self.pdfs_downloaded + self.pdfs_copied,
            pdfs_skipped: self.pdfs_skipped,
            images_embedded: self.images_embedded,
            images_skipped: self.images_skipped,
            duration_ms: self.duration_ms,
            error: self.error,
        }
    }
}

/// Process one source file end to end.
///
/// Always returns a `FileOutcome` — file-level failures are captured in its
/// `error` field so a single bad file never aborts the run. `figure_counter`
/// is the run-wide caption counter, owned by the caller.
async fn process_file(
    source: &MarkdownSource,
    config: &ConversionConfig,
    client: &reqwest::Client,
    figure_counter: &mut u32,
) -> FileOutcome {
    let start = Instant::now();
    let relative = source.relative.display().to_string();

    let output_dir = match source.relative.parent() {
        Some(parent) => config.output_root.join(parent),
        None => config.output_root.clone(),
    };
    let stem = source
        .path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string());
    let output_path = output_dir.join(format!("{stem}.docx"));

    let mut outcome = FileOutcome {
        relative: relative.clone(),
        output_path: output_path.clone(),
        blocks: 0,
        pdfs_downloaded: 0,
        pdfs_copied: 0,
        pdfs_skipped: 0,
        images_embedded: 0,
        images_skipped: 0,
        duration_ms: 0,
        error: None,
    };

    if let Err(e) = tokio::fs::create_dir_all(&output_dir).await {
        outcome.error = Some(FileError::OutputDir {
            path: relative,
            detail: e.to_string(),
        });
        outcome.duration_ms = start.elapsed().as_millis() as u64;
        return outcome;
    }

    let content = match tokio::fs::read_to_string(&source.path).await {
        Ok(c) => c,
        Err(e) => {
            outcome.error = Some(FileError::Read {
                path: relative,
                detail: e.to_string(),
            });
            outcome.duration_ms = start.elapsed().as_millis() as u64;
            return outcome;
        }
    };

    // ── PDF localization runs to completion before the body is parsed ───
    for reference in assets::extract_pdf_refs(&content) {
        match assets::resolve_pdf(
            client,
            &reference,
            source.dir(),
            &output_dir,
            config.download_timeout_secs,
        )
        .await
        {
            Ok(assets::PdfOutcome::Downloaded) => outcome.pdfs_downloaded += 1,
            Ok(assets::PdfOutcome::Copied) => outcome.pdfs_copied += 1,
            Err(e) => {
                warn!("{}: skipping PDF '{}': {}", outcome.relative, reference.target, e);
                outcome.pdfs_skipped += 1;
            }
        }
    }

    // ── Parse + emit ─────────────────────────────────────────────────────
    let builder = build_document(source, config, &content, &mut outcome, figure_counter);
    let (title, blocks) = builder.finish();
    outcome.blocks = blocks.len();

    if let Err(e) = emit::write_docx(
        title.as_deref(),
        &blocks,
        config.image_width_inches,
        &output_path,
        &outcome.relative,
    ) {
        outcome.error = Some(e);
    }

    outcome.duration_ms = start.elapsed().as_millis() as u64;
    outcome
}

/// Fold the source's lines into a [`emit::DocumentBuilder`].
///
/// The first non-blank line becomes the title and is never reprocessed as
/// body text; every following line goes through the classifier.
fn build_document(
    source: &MarkdownSource,
    config: &ConversionConfig,
    content: &str,
    outcome: &mut FileOutcome,
    figure_counter: &mut u32,
) -> emit::DocumentBuilder {
    let mut builder = emit::DocumentBuilder::new();
    let mut lines = content.lines();

    for line in lines.by_ref() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            builder.set_title(trimmed);
            break;
        }
    }

    for line in lines {
        match classify::classify(line) {
            LineClass::Blank => builder.close_paragraph(),
            LineClass::Info(text) => builder.push_info(text),
            LineClass::Heading(text) => builder.push_heading(text),
            LineClass::Image { alt, target } => {
                builder.close_paragraph();
                embed_image(source, config, &alt, &target, &mut builder, outcome, figure_counter);
            }
            LineClass::Text(text) => builder.push_text(text),
        }
    }

    builder
}

/// Resolve and embed one image reference, numbering its caption.
///
/// Remote targets are skipped with a diagnostic only; local targets that are
/// missing or undecodable are skipped with a warning. The counter advances
/// only when a caption is actually emitted.
fn embed_image(
    source: &MarkdownSource,
    config: &ConversionConfig,
    alt: &str,
    target: &str,
    builder: &mut emit::DocumentBuilder,
    outcome: &mut FileOutcome,
    figure_counter: &mut u32,
) {
    if assets::is_url(target) {
        debug!("{}: skipping remote image '{}'", outcome.relative, target);
        outcome.images_skipped += 1;
        return;
    }

    let full_path = source.dir().join(target);
    match emit::load_image(&full_path) {
        Ok((bytes, w, h)) => {
            builder.push_image(bytes, w, h);
            outcome.images_embedded += 1;
            if !alt.trim().is_empty() {
                builder.push_caption(format!("{} {}: {}", config.figure_label, figure_counter, alt));
                *figure_counter += 1;
            }
            debug!("{}: embedded image '{}'", outcome.relative, target);
        }
        Err(e) => {
            warn!("{}: skipping image '{}': {}", outcome.relative, target, e);
            outcome.images_skipped += 1;
        }
    }
}
