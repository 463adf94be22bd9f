use crate::error::{KitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// AI assistant whose config directory receives the links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Claude,
    Cursor,
    Aider,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Claude, Tool::Cursor, Tool::Aider];

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Claude => "claude",
            Tool::Cursor => "cursor",
            Tool::Aider => "aider",
        }
    }

    /// Config directory name, relative to home or the project root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Tool::Claude => ".claude",
            Tool::Cursor => ".cursor",
            Tool::Aider => ".aider",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self> {
        Tool::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| KitError::UnknownTool(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Global,
    Project,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Project => f.write_str("project"),
        }
    }
}

/// Resolve the directory links are installed under.
///
/// `home` is only consulted for [`Scope::Global`]; `project_root` only for
/// [`Scope::Project`].
pub fn resolve_base(
    tool: Tool,
    scope: Scope,
    home: Option<&Path>,
    project_root: &Path,
) -> Result<PathBuf> {
    match scope {
        Scope::Global => home
            .map(|h| h.join(tool.dir_name()))
            .ok_or(KitError::HomeNotFound),
        Scope::Project => Ok(project_root.join(tool.dir_name())),
    }
}

pub fn user_home() -> Result<PathBuf> {
    home::home_dir().ok_or(KitError::HomeNotFound)
}
