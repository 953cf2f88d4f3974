//! PDF reference extraction and localization.
//!
//! Markdown files in the corpus link supporting PDFs either by absolute URL
//! or by a path relative to the file itself. Both kinds are localized next to
//! the generated document so the output tree is self-contained: URLs are
//! fetched with a bounded timeout, relative paths are copied from disk.
//!
//! Every failure here is asset-level: the caller logs a warning and moves on.
//! A dead link must never cost the document it appears in.

use crate::error::AssetError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info};

/// A `[text](target)` link whose target ends in `.pdf` (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfReference {
    /// The link's display text.
    pub text: String,
    /// Absolute URL or path relative to the source file's directory.
    pub target: String,
}

/// How a reference was localized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfOutcome {
    Downloaded,
    Copied,
}

static RE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// Scan the full source text for PDF links.
///
/// Duplicates are preserved and order follows first occurrence. This is
/// pattern matching, not a Markdown parser: links inside code spans match
/// too, which is acceptable for the corpus this tool serves.
pub fn extract_pdf_refs(content: &str) -> Vec<PdfReference> {
    RE_LINK
        .captures_iter(content)
        .filter(|caps| caps[2].to_lowercase().ends_with(".pdf"))
        .map(|caps| PdfReference {
            text: caps[1].to_string(),
            target: caps[2].to_string(),
        })
        .collect()
}

/// Check if a link target is an absolute HTTP(S) URL.
pub fn is_url(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}

/// Localize one PDF reference into `output_dir`.
///
/// URL targets are fetched with the client's configured timeout; other
/// targets are resolved against `source_dir` and copied. The returned
/// outcome is consumed only for logging and counters.
pub async fn resolve_pdf(
    client: &reqwest::Client,
    reference: &PdfReference,
    source_dir: &Path,
    output_dir: &Path,
    timeout_secs: u64,
) -> Result<PdfOutcome, AssetError> {
    if is_url(&reference.target) {
        download_pdf(client, &reference.target, output_dir, timeout_secs).await
    } else {
        copy_pdf(&reference.target, source_dir, output_dir).await
    }
}

async fn download_pdf(
    client: &reqwest::Client,
    url: &str,
    output_dir: &Path,
    timeout_secs: u64,
) -> Result<PdfOutcome, AssetError> {
    debug!("Fetching PDF: {}", url);

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            AssetError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            AssetError::Download {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(AssetError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let filename = derive_pdf_filename(url);
    let out_path = output_dir.join(&filename);

    let bytes = response.bytes().await.map_err(|e| AssetError::Download {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    tokio::fs::write(&out_path, &bytes)
        .await
        .map_err(|e| AssetError::Write {
            path: out_path.clone(),
            detail: e.to_string(),
        })?;

    info!("Downloaded PDF: {}", filename);
    Ok(PdfOutcome::Downloaded)
}

async fn copy_pdf(
    target: &str,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<PdfOutcome, AssetError> {
    let src = source_dir.join(target);
    if !src.exists() {
        return Err(AssetError::MissingPdf { path: src });
    }

    let name = src
        .file_name()
        .ok_or_else(|| AssetError::MissingPdf { path: src.clone() })?
        .to_os_string();
    let dst = output_dir.join(name);

    tokio::fs::copy(&src, &dst)
        .await
        .map_err(|e| AssetError::Copy {
            from: src.clone(),
            to: dst.clone(),
            detail: e.to_string(),
        })?;

    info!("Copied PDF: {}", dst.display());
    Ok(PdfOutcome::Copied)
}

/// Derive the local filename for a downloaded PDF.
///
/// Takes the last path segment of the URL; if that is empty or does not end
/// in `.pdf`, synthesizes a unique name so two odd URLs in one directory
/// cannot collide.
pub fn derive_pdf_filename(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if last.to_lowercase().ends_with(".pdf") {
                    return last.to_string();
                }
            }
        }
    }
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("downloaded_{}.pdf", &id[..8])
}
