//! Source discovery: enumerate Markdown files under the input root.
//!
//! The walk is sorted by file name so a run always visits files in the same
//! order; figure numbers are shared across the whole run, and a stable visit
//! order keeps them reproducible between runs.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One Markdown file found under the input root.
#[derive(Debug, Clone)]
pub struct MarkdownSource {
    /// Absolute (or root-joined) path to the source file.
    pub path: PathBuf,
    /// Path relative to the input root; mirrored under the output root.
    pub relative: PathBuf,
}

impl MarkdownSource {
    /// The directory containing the source file; image and PDF targets are
    /// resolved against this.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }
}

/// Recursively collect all files with a case-insensitive `.md` suffix.
///
/// Unreadable directory entries are silently skipped; a permission error on
/// one subtree must not abort discovery of the rest.
pub fn find_markdown_sources(input_root: &Path) -> Vec<MarkdownSource> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(input_root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !entry.file_type().is_file() || !has_md_extension(path) {
            continue;
        }
        let relative = match path.strip_prefix(input_root) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => continue,
        };
        debug!("Discovered {}", relative.display());
        sources.push(MarkdownSource {
            path: path.to_path_buf(),
            relative,
        });
    }

    sources
}

fn has_md_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "content").unwrap();
    }

    #[test]
    fn finds_md_files_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.md");
        touch(dir.path(), "sub/nested/b.md");
        touch(dir.path(), "sub/readme.txt");

        let sources = find_markdown_sources(dir.path());
        let rels: Vec<String> = sources
            .iter()
            .map(|s| s.relative.display().to_string())
            .collect();

        assert_eq!(rels.len(), 2);
        assert!(rels.contains(&"a.md".to_string()));
        assert!(rels.iter().any(|r| r.ends_with("b.md")));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "NOTES.MD");
        touch(dir.path(), "mixed.Md");

        let sources = find_markdown_sources(dir.path());
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn walk_order_is_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "zebra.md");
        touch(dir.path(), "alpha.md");
        touch(dir.path(), "mid.md");

        let sources = find_markdown_sources(dir.path());
        let rels: Vec<String> = sources
            .iter()
            .map(|s| s.relative.display().to_string())
            .collect();
        assert_eq!(rels, vec!["alpha.md", "mid.md", "zebra.md"]);
    }

    #[test]
    fn source_dir_points_at_parent() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "sub/c.md");

        let sources = find_markdown_sources(dir.path());
        assert_eq!(sources[0].dir(), dir.path().join("sub"));
    }

    #[test]
    fn empty_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(find_markdown_sources(dir.path()).is_empty());
    }
}
