//! Convert markdown command files into Cursor rule files.

use crate::error::{KitError, Result};
use crate::frontmatter;
use crate::io;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionReport {
    /// Paths relative to the input directory.
    pub converted: Vec<PathBuf>,
    pub failed: Vec<ConversionFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversionFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Render one command file as a Cursor rule.
///
/// `stem` is the command's file name without extension and becomes the heading.
pub fn convert_command(stem: &str, content: &str) -> Result<String> {
    let doc = frontmatter::parse(content)?;

    let mut rule = format!("# {stem}\n\n");

    if let Some(description) = doc.meta.description.as_deref().filter(|d| !d.is_empty()) {
        rule.push_str(description);
        rule.push_str("\n\n");
    }

    rule.push_str(&doc.body);

    if !doc.meta.args.is_empty() {
        rule.push_str("\n\n## Arguments\n\n");
        for arg in &doc.meta.args {
            let required = if arg.required {
                " (required)"
            } else {
                " (optional)"
            };
            let _ = writeln!(rule, "- `{}`: {}{required}", arg.name, arg.description);
        }
    }

    Ok(rule)
}

/// Convert every `*.md` file under `input` into `output`, preserving the
/// relative layout. A file that fails to convert is recorded and skipped.
pub fn convert_directory(input: &Path, output: &Path) -> Result<ConversionReport> {
    if !input.is_dir() {
        return Err(KitError::InputNotFound(input.to_path_buf()));
    }
    io::ensure_dir(output)?;

    let mut report = ConversionReport::default();
    let walker = WalkDir::new(input).sort_by_file_name().into_iter();
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("md")
        {
            continue;
        }
        let relative = path.strip_prefix(input).unwrap_or(path).to_path_buf();

        match convert_file(path, &output.join(&relative)) {
            Ok(()) => {
                debug!(file = %relative.display(), "converted");
                report.converted.push(relative);
            }
            Err(e) => {
                warn!(file = %relative.display(), error = %e, "conversion failed");
                report.failed.push(ConversionFailure {
                    path: relative,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn convert_file(src: &Path, dest: &Path) -> Result<()> {
    let content = std::fs::read_to_string(src)?;
    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let rule = convert_command(&stem, &content)?;
    io::atomic_write(dest, rule.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn converts_full_command() {
        let content = "---\n\
description: Write unit tests\n\
args:\n  - name: target\n    description: Module to test\n    required: true\n  - name: style\n---\n\
Write focused tests for the target.\n";
        let rule = convert_command("write-tests", content).unwrap();
        assert_eq!(
            rule,
            "# write-tests\n\n\
Write unit tests\n\n\
Write focused tests for the target.\n\n\
## Arguments\n\n\
- `target`: Module to test (required)\n\
- `style`:  (optional)\n"
        );
    }

    #[test]
    fn plain_markdown_gets_heading_only() {
        let rule = convert_command("notes", "Just a body.\n").unwrap();
        assert_eq!(rule, "# notes\n\nJust a body.");
    }

    #[test]
    fn empty_description_is_omitted() {
        let rule = convert_command("x", "---\ndescription: ''\n---\nbody\n").unwrap();
        assert_eq!(rule, "# x\n\nbody");
    }

    #[test]
    fn directory_conversion_preserves_layout_and_continues_on_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("commands");
        std::fs::create_dir_all(input.join("git")).unwrap();
        std::fs::write(input.join("review.md"), "---\ndescription: Review\n---\nGo.\n").unwrap();
        std::fs::write(input.join("git/commit.md"), "Commit things.\n").unwrap();
        std::fs::write(input.join("broken.md"), "---\nargs: [oops\n---\nx\n").unwrap();
        std::fs::write(input.join("script.sh"), "echo hi\n").unwrap();
        let output = dir.path().join("rules");

        let report = convert_directory(&input, &output).unwrap();

        assert_eq!(
            report.converted,
            vec![PathBuf::from("git/commit.md"), PathBuf::from("review.md")]
        );
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].path, PathBuf::from("broken.md"));
        assert_eq!(
            std::fs::read_to_string(output.join("review.md")).unwrap(),
            "# review\n\nReview\n\nGo."
        );
        assert!(output.join("git/commit.md").exists());
        assert!(!output.join("script.sh").exists());
        assert!(!output.join("broken.md").exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = convert_directory(&dir.path().join("nope"), &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, KitError::InputNotFound(_)));
        assert!(!dir.path().join("out").exists());
    }
}
