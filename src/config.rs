//! Configuration types for Markdown-to-Word conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share a config across a run, serialise it for logging, and
//! diff two runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! The only required inputs are the two roots; everything else has a
//! well-documented default. The builder lets callers set only what they care
//! about and keeps adding fields from being a breaking change.

use crate::error::ConvertError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for one conversion run.
///
/// Built via [`ConversionConfig::builder()`].
///
/// # Example
/// ```rust
/// use md2docx::ConversionConfig;
///
/// let config = ConversionConfig::builder("docs", "output")
///     .download_timeout_secs(10)
///     .image_width_inches(4.5)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Directory scanned recursively for `.md` files.
    pub input_root: PathBuf,

    /// Directory receiving the mirrored tree of `.docx` files and localized
    /// PDF attachments. Created (with parents) at the start of the run.
    pub output_root: PathBuf,

    /// Display width for embedded images, in inches. Default: 5.0.
    ///
    /// Every local image is scaled to this width with its aspect ratio
    /// preserved, so a mixed bag of screenshot sizes renders uniformly on
    /// an A4/Letter page. Range: 0.5–20.0.
    pub image_width_inches: f64,

    /// HTTP timeout for PDF attachment downloads, in seconds. Default: 30.
    ///
    /// A failed or slow fetch only costs this much wall-clock time before the
    /// run moves on; the reference is skipped, never retried.
    pub download_timeout_secs: u64,

    /// Caption prefix for embedded images. Default: `"Figure"`.
    ///
    /// Captions read `"{figure_label} {N}: {alt}"` where N counts embedded
    /// captioned images monotonically across the whole run, not per file.
    pub figure_label: String,

    /// Optional per-file progress events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("input_root", &self.input_root)
            .field("output_root", &self.output_root)
            .field("image_width_inches", &self.image_width_inches)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("figure_label", &self.figure_label)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder with the two required roots.
    pub fn builder(input_root: impl AsRef<Path>, output_root: impl AsRef<Path>) -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: ConversionConfig {
                input_root: input_root.as_ref().to_path_buf(),
                output_root: output_root.as_ref().to_path_buf(),
                image_width_inches: 5.0,
                download_timeout_secs: 30,
                figure_label: "Figure".to_string(),
                progress_callback: None,
            },
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn image_width_inches(mut self, inches: f64) -> Self {
        self.config.image_width_inches = inches.clamp(0.5, 20.0);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs.max(1);
        self
    }

    pub fn figure_label(mut self, label: impl Into<String>) -> Self {
        self.config.figure_label = label.into();
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, ConvertError> {
        let c = &self.config;
        if c.input_root.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig("input root is empty".into()));
        }
        if c.output_root.as_os_str().is_empty() {
            return Err(ConvertError::InvalidConfig("output root is empty".into()));
        }
        if c.input_root == c.output_root {
            return Err(ConvertError::InvalidConfig(
                "input and output roots must differ".into(),
            ));
        }
        if c.figure_label.trim().is_empty() {
            return Err(ConvertError::InvalidConfig(
                "figure label must not be blank".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let c = ConversionConfig::builder("in", "out").build().unwrap();
        assert_eq!(c.image_width_inches, 5.0);
        assert_eq!(c.download_timeout_secs, 30);
        assert_eq!(c.figure_label, "Figure");
        assert!(c.progress_callback.is_none());
    }

    #[test]
    fn image_width_is_clamped() {
        let c = ConversionConfig::builder("in", "out")
            .image_width_inches(0.0)
            .build()
            .unwrap();
        assert_eq!(c.image_width_inches, 0.5);

        let c = ConversionConfig::builder("in", "out")
            .image_width_inches(100.0)
            .build()
            .unwrap();
        assert_eq!(c.image_width_inches, 20.0);
    }

    #[test]
    fn timeout_has_a_floor() {
        let c = ConversionConfig::builder("in", "out")
            .download_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(c.download_timeout_secs, 1);
    }

    #[test]
    fn equal_roots_rejected() {
        let err = ConversionConfig::builder("same", "same").build();
        assert!(matches!(err, Err(ConvertError::InvalidConfig(_))));
    }

    #[test]
    fn blank_figure_label_rejected() {
        let err = ConversionConfig::builder("in", "out")
            .figure_label("   ")
            .build();
        assert!(matches!(err, Err(ConvertError::InvalidConfig(_))));
    }
}
