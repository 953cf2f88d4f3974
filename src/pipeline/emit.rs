//! Block emission: fold classified lines into a document and write it.
//!
//! [`DocumentBuilder`] accumulates an ordered block sequence while holding
//! exactly one piece of state — the currently open running paragraph.
//! Consecutive plain lines extend that paragraph (joined with in-paragraph
//! line breaks); every other block type closes it first. The builder owns
//! its blocks exclusively and is consumed by [`write_docx`], which
//! serializes the sequence through docx-rs.
//!
//! Image bytes are decoded up front with the `image` crate: the dimensions
//! drive the fixed-width scaling, and an undecodable file surfaces as an
//! [`AssetError`] instead of a panic deep inside the document writer.

use crate::error::{AssetError, FileError};
use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Pic, Run, Style, StyleType};
use image::GenericImageView;
use std::path::Path;
use tracing::debug;

/// English Metric Units per inch, the docx length unit.
const EMU_PER_INCH: f64 = 914_400.0;

/// One block element of the output document, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Section heading. Level 1 is reserved for the document title.
    Heading { level: u8, text: String },
    /// One or more plain lines joined with line breaks.
    Paragraph { lines: Vec<String> },
    /// Decoded image bytes plus pixel dimensions for scaling.
    Image {
        bytes: Vec<u8>,
        width_px: u32,
        height_px: u32,
    },
    /// Centered italic caption following an image.
    Caption { text: String },
}

/// Incrementally builds the block sequence for one source file.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    blocks: Vec<Block>,
    paragraph_open: bool,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title (the source's first non-blank line).
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Terminate the running paragraph; subsequent text starts a new one.
    pub fn close_paragraph(&mut self) {
        self.paragraph_open = false;
    }

    /// Append a plain line, opening a paragraph if none is running.
    pub fn push_text(&mut self, line: impl Into<String>) {
        if self.paragraph_open {
            if let Some(Block::Paragraph { lines }) = self.blocks.last_mut() {
                lines.push(line.into());
                return;
            }
        }
        self.blocks.push(Block::Paragraph {
            lines: vec![line.into()],
        });
        self.paragraph_open = true;
    }

    /// Emit an info-block paragraph. Always standalone: it neither joins the
    /// running paragraph nor accepts continuation lines. Empty text emits
    /// nothing (but still closes the paragraph).
    pub fn push_info(&mut self, text: impl Into<String>) {
        self.close_paragraph();
        let text = text.into();
        if !text.is_empty() {
            self.blocks.push(Block::Paragraph { lines: vec![text] });
        }
    }

    /// Emit a level-2 body heading.
    pub fn push_heading(&mut self, text: impl Into<String>) {
        self.close_paragraph();
        self.blocks.push(Block::Heading {
            level: 2,
            text: text.into(),
        });
    }

    /// Emit an image block.
    pub fn push_image(&mut self, bytes: Vec<u8>, width_px: u32, height_px: u32) {
        self.close_paragraph();
        self.blocks.push(Block::Image {
            bytes,
            width_px,
            height_px,
        });
    }

    /// Emit a caption block.
    pub fn push_caption(&mut self, text: impl Into<String>) {
        self.close_paragraph();
        self.blocks.push(Block::Caption { text: text.into() });
    }

    /// Number of body blocks emitted so far.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Consume the builder, yielding the title and ordered block sequence.
    pub fn finish(self) -> (Option<String>, Vec<Block>) {
        (self.title, self.blocks)
    }
}

/// Read and decode a local image, returning its bytes and pixel dimensions.
pub fn load_image(path: &Path) -> Result<(Vec<u8>, u32, u32), AssetError> {
    if !path.exists() {
        return Err(AssetError::MissingImage {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| AssetError::ImageDecode {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| AssetError::ImageDecode {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    let (w, h) = decoded.dimensions();
    debug!("Decoded image {} ({}x{} px)", path.display(), w, h);
    Ok((bytes, w, h))
}

/// Serialize the title and block sequence to a `.docx` file.
///
/// Images are scaled to `image_width_inches` with aspect ratio preserved
/// and centered; captions render centered and italic.
pub fn write_docx(
    title: Option<&str>,
    blocks: &[Block],
    image_width_inches: f64,
    out_path: &Path,
    relative: &str,
) -> Result<(), FileError> {
    let mut docx = Docx::new()
        .add_style(
            Style::new("Heading1", StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new("Heading2", StyleType::Paragraph)
                .name("Heading 2")
                .size(26)
                .bold(),
        );

    if let Some(title) = title {
        docx = docx.add_paragraph(
            Paragraph::new()
                .style("Heading1")
                .add_run(Run::new().add_text(title)),
        );
    }

    for block in blocks {
        docx = docx.add_paragraph(render_block(block, image_width_inches));
    }

    let file = std::fs::File::create(out_path).map_err(|e| FileError::DocumentWrite {
        path: relative.to_string(),
        detail: e.to_string(),
    })?;

    docx.build()
        .pack(file)
        .map_err(|e| FileError::DocumentWrite {
            path: relative.to_string(),
            detail: e.to_string(),
        })?;

    Ok(())
}

fn render_block(block: &Block, image_width_inches: f64) -> Paragraph {
    match block {
        Block::Heading { level, text } => {
            let style = if *level <= 1 { "Heading1" } else { "Heading2" };
            Paragraph::new()
                .style(style)
                .add_run(Run::new().add_text(text.as_str()))
        }
        Block::Paragraph { lines } => {
            let mut run = Run::new();
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    run = run.add_break(BreakType::TextWrapping);
                }
                run = run.add_text(line.as_str());
            }
            Paragraph::new().add_run(run)
        }
        Block::Image {
            bytes,
            width_px,
            height_px,
        } => {
            let (w_emu, h_emu) = scaled_emu(*width_px, *height_px, image_width_inches);
            let pic = Pic::new(bytes).size(w_emu, h_emu);
            Paragraph::new()
                .align(AlignmentType::Center)
                .add_run(Run::new().add_image(pic))
        }
        Block::Caption { text } => Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(Run::new().add_text(text.as_str()).italic()),
    }
}

/// Scale pixel dimensions to EMU at a fixed display width.
fn scaled_emu(width_px: u32, height_px: u32, target_width_inches: f64) -> (u32, u32) {
    let w_emu = target_width_inches * EMU_PER_INCH;
    let ratio = if width_px == 0 {
        1.0
    } else {
        height_px as f64 / width_px as f64
    };
    (w_emu as u32, (w_emu * ratio) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // 1x1 transparent PNG.
    const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn consecutive_text_lines_share_one_paragraph() {
        let mut b = DocumentBuilder::new();
        b.push_text("first line");
        b.push_text("second line");
        let (_, blocks) = b.finish();
        assert_eq!(
            blocks,
            vec![Block::Paragraph {
                lines: vec!["first line".into(), "second line".into()],
            }]
        );
    }

    #[test]
    fn blank_line_splits_paragraphs() {
        let mut b = DocumentBuilder::new();
        b.push_text("one");
        b.close_paragraph();
        b.push_text("two");
        let (_, blocks) = b.finish();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn heading_closes_running_paragraph() {
        let mut b = DocumentBuilder::new();
        b.push_text("before");
        b.push_heading("Section");
        b.push_text("after");
        let (_, blocks) = b.finish();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::Heading { level: 2, .. }));
        assert_eq!(
            blocks[2],
            Block::Paragraph {
                lines: vec!["after".into()]
            }
        );
    }

    #[test]
    fn info_block_is_standalone() {
        let mut b = DocumentBuilder::new();
        b.push_text("before");
        b.push_info("Note here");
        b.push_text("after");
        let (_, blocks) = b.finish();
        // Three separate paragraphs: the info block never merges.
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                lines: vec!["Note here".into()]
            }
        );
    }

    #[test]
    fn empty_info_emits_nothing_but_closes_paragraph() {
        let mut b = DocumentBuilder::new();
        b.push_text("before");
        b.push_info("");
        b.push_text("after");
        let (_, blocks) = b.finish();
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn image_closes_running_paragraph() {
        let mut b = DocumentBuilder::new();
        b.push_text("lead-in");
        b.push_image(TINY_PNG.to_vec(), 1, 1);
        b.push_text("follow-up");
        let (_, blocks) = b.finish();
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[1], Block::Image { .. }));
    }

    #[test]
    fn load_image_reports_dimensions() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pic.png");
        std::fs::write(&path, TINY_PNG).unwrap();

        let (bytes, w, h) = load_image(&path).unwrap();
        assert_eq!(bytes, TINY_PNG);
        assert_eq!((w, h), (1, 1));
    }

    #[test]
    fn load_image_missing_file() {
        let err = load_image(Path::new("/no/such/pic.png")).unwrap_err();
        assert!(matches!(err, AssetError::MissingImage { .. }));
    }

    #[test]
    fn load_image_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.png");
        std::fs::write(&path, b"not an image at all").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, AssetError::ImageDecode { .. }));
    }

    #[test]
    fn scaling_preserves_aspect_ratio() {
        // 200x100 px at 5 inches wide: height comes out at 2.5 inches.
        let (w, h) = scaled_emu(200, 100, 5.0);
        assert_eq!(w, 4_572_000);
        assert_eq!(h, 2_286_000);
    }

    #[test]
    fn zero_width_image_does_not_divide_by_zero() {
        let (w, h) = scaled_emu(0, 50, 5.0);
        assert_eq!(w, h);
    }

    #[test]
    fn write_docx_produces_readable_document() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("doc.docx");

        let mut b = DocumentBuilder::new();
        b.set_title("My Title");
        b.push_text("body text");
        b.push_heading("Section Two");
        b.push_image(TINY_PNG.to_vec(), 1, 1);
        b.push_caption("Figure 1: a dot");
        let (title, blocks) = b.finish();

        write_docx(title.as_deref(), &blocks, 5.0, &out, "doc.md").unwrap();

        let bytes = std::fs::read(&out).unwrap();
        let json = docx_rs::read_docx(&bytes).unwrap().json();
        assert!(json.contains("My Title"));
        assert!(json.contains("body text"));
        assert!(json.contains("Section Two"));
        assert!(json.contains("Figure 1: a dot"));
    }

    #[test]
    fn write_docx_bad_path_is_file_error() {
        let err = write_docx(None, &[], 5.0, Path::new("/no/such/dir/x.docx"), "x.md")
            .unwrap_err();
        assert!(matches!(err, FileError::DocumentWrite { .. }));
    }
}
