//! YAML front matter on command, agent and skill markdown files.

use crate::error::Result;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Metadata block at the top of a command or agent file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Tools>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<CommandArg>,
}

/// `tools:` is written either as a YAML list or as `Read, Grep, Bash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tools {
    List(Vec<String>),
    Inline(String),
}

impl Tools {
    pub fn names(&self) -> Vec<String> {
        match self {
            Tools::List(v) => v.iter().map(|s| s.trim().to_string()).collect(),
            Tools::Inline(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandArg {
    #[serde(default = "default_arg_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
}

fn default_arg_name() -> String {
    "unnamed".to_string()
}

#[derive(Debug, Clone)]
pub struct Document {
    pub meta: CommandMeta,
    pub body: String,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix('\n').or_else(|| s.strip_prefix("\r\n"))
}

/// Split `content` into its front matter YAML (if any) and the body.
///
/// Front matter must open on the very first line with `---` and close with a
/// line that starts with `---`. Anything else is treated as plain body.
pub fn split(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content.strip_prefix("---").and_then(strip_line_break) else {
        return (None, content);
    };
    let (yaml, after) = if let Some(after) = rest.strip_prefix("---") {
        // Empty front matter: the closing delimiter is the next line.
        ("", after)
    } else {
        let Some(end) = rest.find("\n---") else {
            return (None, content);
        };
        (&rest[..end], &rest[end + "\n---".len()..])
    };
    // Drop the remainder of the delimiter line.
    let body = match after.find('\n') {
        Some(nl) => &after[nl + 1..],
        None => "",
    };
    (Some(yaml.strip_suffix('\r').unwrap_or(yaml)), body)
}

/// Parse a markdown file into metadata and a body trimmed of surrounding blank lines.
pub fn parse(content: &str) -> Result<Document> {
    let (yaml, body) = split(content);
    let meta = match yaml {
        Some(y) if !y.trim().is_empty() => serde_yaml::from_str(y)?,
        _ => CommandMeta::default(),
    };
    Ok(Document {
        meta,
        body: body.trim_matches(|c| c == '\n' || c == '\r').to_string(),
    })
}

/// Best-effort description lookup used by listings; malformed front matter yields `None`.
pub fn description_of(content: &str) -> Option<String> {
    parse(content)
        .ok()
        .and_then(|d| d.meta.description)
        .filter(|d| !d.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMAND: &str = r#"---
name: review
description: Review the current diff
tools: Read, Grep, Bash
model: sonnet
args:
  - name: path
    description: File to review
    required: true
  - description: Focus area
---

Review the changes carefully.

"#;

    #[test]
    fn split_separates_yaml_and_body() {
        let (yaml, body) = split("---\ntitle: x\n---\nhello\n");
        assert_eq!(yaml, Some("title: x"));
        assert_eq!(body, "hello\n");
    }

    #[test]
    fn split_handles_crlf() {
        let (yaml, body) = split("---\r\ntitle: x\r\n---\r\nhello\r\n");
        assert_eq!(yaml, Some("title: x"));
        assert_eq!(body, "hello\r\n");
    }

    #[test]
    fn split_without_front_matter_returns_whole_content() {
        let (yaml, body) = split("# Heading\n---\nnot yaml\n");
        assert!(yaml.is_none());
        assert_eq!(body, "# Heading\n---\nnot yaml\n");
    }

    #[test]
    fn split_unterminated_front_matter_is_body() {
        let (yaml, body) = split("---\ntitle: x\nno close\n");
        assert!(yaml.is_none());
        assert_eq!(body, "---\ntitle: x\nno close\n");
    }

    #[test]
    fn split_empty_front_matter() {
        let (yaml, body) = split("---\n---\nbody");
        assert_eq!(yaml, Some(""));
        assert_eq!(body, "body");
    }

    #[test]
    fn parse_reads_all_fields() {
        let doc = parse(COMMAND).unwrap();
        assert_eq!(doc.meta.name.as_deref(), Some("review"));
        assert_eq!(doc.meta.description.as_deref(), Some("Review the current diff"));
        assert_eq!(doc.meta.model.as_deref(), Some("sonnet"));
        assert_eq!(
            doc.meta.tools.as_ref().unwrap().names(),
            vec!["Read", "Grep", "Bash"]
        );
        assert_eq!(doc.meta.args.len(), 2);
        assert!(doc.meta.args[0].required);
        assert_eq!(doc.meta.args[1].name, "unnamed");
        assert!(!doc.meta.args[1].required);
        assert_eq!(doc.body, "Review the changes carefully.");
    }

    #[test]
    fn parse_accepts_tool_list() {
        let doc = parse("---\ntools:\n  - Read\n  - Edit\n---\nbody").unwrap();
        assert_eq!(doc.meta.tools.unwrap().names(), vec!["Read", "Edit"]);
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        assert!(parse("---\nargs: [unclosed\n---\nbody").is_err());
    }

    #[test]
    fn description_of_ignores_bad_yaml() {
        assert_eq!(description_of("---\n: : :\n---\n"), None);
        assert_eq!(
            description_of("---\ndescription: Hi\n---\n").as_deref(),
            Some("Hi")
        );
    }
}
