//! Line classification: tag each source line with its structural role.
//!
//! The corpus uses a small closed set of constructs, so this is a
//! line-oriented classifier over fixed prefixes and two regexes rather than
//! a Markdown AST. Each line maps to exactly one variant; the checks run
//! most-specific-first and plain text is the fallback.
//!
//! ## Classification order
//!
//! 1. Blank
//! 2. `<u>…</u>` markup is stripped textually (this never decides the type)
//! 3. `:::` info block
//! 4. `####` heading
//! 5. `**…**` heading
//! 6. `![alt](target)` image
//! 7. Plain text
//!
//! One deliberate compatibility quirk: a line starting `:::info` without the
//! closing `:::` falls through to the generic `:::` branch, so the emitted
//! paragraph keeps a leading `info`. Downstream documents in the corpus
//! depend on byte-identical output here, so the quirk stays.

use once_cell::sync::Lazy;
use regex::Regex;

/// Structural role of one source line, after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Empty or whitespace-only; terminates a running paragraph.
    Blank,
    /// `:::` info block rendered as a standalone paragraph. The text may be
    /// empty, in which case nothing is emitted.
    Info(String),
    /// `####` or `**…**` line; rendered as a level-2 heading.
    Heading(String),
    /// `![alt](target)` reference; target may be remote or local.
    Image { alt: String, target: String },
    /// Anything else; opens or extends the running paragraph.
    Text(String),
}

static RE_UNDERLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<u>(.+?)</u>").unwrap());
static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// Classify one raw source line.
pub fn classify(raw: &str) -> LineClass {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineClass::Blank;
    }

    let line = strip_underline(trimmed);
    let line = line.as_ref();

    if let Some(rest) = line.strip_prefix(":::") {
        let text = if line.starts_with(":::info") && line.ends_with(":::") && line.len() >= 10 {
            line[7..line.len() - 3].trim()
        } else {
            rest.trim()
        };
        return LineClass::Info(text.to_string());
    }

    if let Some(rest) = line.strip_prefix("####") {
        return LineClass::Heading(rest.trim().to_string());
    }

    if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
        let interior = line[2..line.len() - 2].trim();
        if !interior.is_empty() {
            return LineClass::Heading(interior.to_string());
        }
    }

    if let Some(caps) = RE_IMAGE.captures(line) {
        return LineClass::Image {
            alt: caps[1].to_string(),
            target: caps[2].to_string(),
        };
    }

    LineClass::Text(line.to_string())
}

/// Remove `<u>…</u>` markup, keeping the enclosed text.
pub fn strip_underline(line: &str) -> std::borrow::Cow<'_, str> {
    RE_UNDERLINE.replace_all(line, "$1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines() {
        assert_eq!(classify(""), LineClass::Blank);
        assert_eq!(classify("   \t  "), LineClass::Blank);
    }

    #[test]
    fn underline_markup_is_stripped_not_classified() {
        assert_eq!(
            classify("<u>emphasis</u> rest"),
            LineClass::Text("emphasis rest".into())
        );
        // Stripping happens before the heading check, so markup inside a
        // heading line disappears too.
        assert_eq!(
            classify("#### <u>Key</u> Points"),
            LineClass::Heading("Key Points".into())
        );
    }

    #[test]
    fn info_block_closed_form() {
        assert_eq!(
            classify(":::info Note here:::"),
            LineClass::Info("Note here".into())
        );
    }

    #[test]
    fn info_block_generic_prefix() {
        assert_eq!(classify(":::Just text"), LineClass::Info("Just text".into()));
    }

    #[test]
    fn info_block_without_closing_keeps_artifact() {
        // Compatibility quirk: only the leading `:::` is stripped, so the
        // `info` marker survives in the paragraph text.
        assert_eq!(
            classify(":::info Unclosed note"),
            LineClass::Info("info Unclosed note".into())
        );
    }

    #[test]
    fn empty_info_blocks_yield_empty_text() {
        assert_eq!(classify(":::"), LineClass::Info(String::new()));
        assert_eq!(classify(":::info:::"), LineClass::Info(String::new()));
    }

    #[test]
    fn hash_heading() {
        assert_eq!(
            classify("#### Section Title"),
            LineClass::Heading("Section Title".into())
        );
        assert_eq!(classify("####Tight"), LineClass::Heading("Tight".into()));
    }

    #[test]
    fn bold_heading() {
        assert_eq!(
            classify("**Bold Title**"),
            LineClass::Heading("Bold Title".into())
        );
    }

    #[test]
    fn unterminated_bold_is_plain_text() {
        assert_eq!(
            classify("**not a title"),
            LineClass::Text("**not a title".into())
        );
    }

    #[test]
    fn degenerate_bold_markers_are_plain_text() {
        assert_eq!(classify("**"), LineClass::Text("**".into()));
        assert_eq!(classify("****"), LineClass::Text("****".into()));
    }

    #[test]
    fn image_line() {
        assert_eq!(
            classify("![caption](./img/pic.png)"),
            LineClass::Image {
                alt: "caption".into(),
                target: "./img/pic.png".into(),
            }
        );
    }

    #[test]
    fn image_with_empty_alt() {
        assert_eq!(
            classify("![](shot.png)"),
            LineClass::Image {
                alt: String::new(),
                target: "shot.png".into(),
            }
        );
    }

    #[test]
    fn image_anywhere_in_line_wins_over_text() {
        // Surrounding prose on an image line is discarded by design.
        let class = classify("see ![fig](a.png) below");
        assert_eq!(
            class,
            LineClass::Image {
                alt: "fig".into(),
                target: "a.png".into(),
            }
        );
    }

    #[test]
    fn plain_text_is_trimmed() {
        assert_eq!(
            classify("  ordinary prose  "),
            LineClass::Text("ordinary prose".into())
        );
    }

    #[test]
    fn non_image_link_is_plain_text() {
        assert_eq!(
            classify("[Spec](./files/spec.pdf)"),
            LineClass::Text("[Spec](./files/spec.pdf)".into())
        );
    }
}
