//! Inventory of the commands, agents, skills and hooks a source repository ships.

use crate::config::Config;
use crate::error::Result;
use crate::frontmatter;
use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Command,
    Agent,
    Skill,
    Hook,
}

impl EntryKind {
    pub fn for_component(component: &str) -> Option<Self> {
        match component {
            paths::COMMANDS_DIR => Some(EntryKind::Command),
            paths::AGENTS_DIR => Some(EntryKind::Agent),
            paths::SKILLS_DIR => Some(EntryKind::Skill),
            paths::HOOKS_DIR => Some(EntryKind::Hook),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Command => "command",
            EntryKind::Agent => "agent",
            EntryKind::Skill => "skill",
            EntryKind::Hook => "hook",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub kind: EntryKind,
    pub name: String,
    /// Relative to the source root.
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// List every entry in the configured components that exist under `source_root`.
/// Components with no known kind are ignored.
pub fn scan(source_root: &Path, config: &Config) -> Result<Vec<CatalogEntry>> {
    let mut entries = Vec::new();
    for component in &config.components {
        let Some(kind) = EntryKind::for_component(component) else {
            continue;
        };
        let dir = paths::component_dir(source_root, component);
        if !dir.is_dir() {
            continue;
        }
        match kind {
            EntryKind::Command | EntryKind::Agent => {
                scan_markdown(source_root, &dir, kind, &mut entries)?
            }
            EntryKind::Skill => scan_skills(source_root, &dir, &mut entries)?,
            EntryKind::Hook => scan_hooks(source_root, &dir, &mut entries)?,
        }
    }
    entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.path.cmp(&b.path)));
    Ok(entries)
}

fn relative(source_root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(source_root).unwrap_or(path).to_path_buf()
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn scan_markdown(
    source_root: &Path,
    dir: &Path,
    kind: EntryKind,
    entries: &mut Vec<CatalogEntry>,
) -> Result<()> {
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("md")
        {
            continue;
        }
        // Directory-level READMEs document the component, they are not entries.
        if path.file_name().and_then(|n| n.to_str()) == Some("README.md") {
            continue;
        }
        let content = std::fs::read_to_string(path)?;
        // Malformed front matter still lists the file, just without metadata.
        let meta = frontmatter::parse(&content)
            .map(|d| d.meta)
            .unwrap_or_default();
        entries.push(CatalogEntry {
            kind,
            name: stem(path),
            path: relative(source_root, path),
            description: meta.description.filter(|d| !d.trim().is_empty()),
            tools: meta.tools.map(|t| t.names()).unwrap_or_default(),
            model: meta.model,
        });
    }
    Ok(())
}

fn scan_skills(source_root: &Path, dir: &Path, entries: &mut Vec<CatalogEntry>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let skill_file = entry.path().join(paths::SKILL_FILE);
        if !skill_file.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&skill_file)?;
        entries.push(CatalogEntry {
            kind: EntryKind::Skill,
            name: entry.file_name().to_string_lossy().into_owned(),
            path: relative(source_root, &entry.path()),
            description: frontmatter::description_of(&content),
            tools: Vec::new(),
            model: None,
        });
    }
    Ok(())
}

fn scan_hooks(source_root: &Path, dir: &Path, entries: &mut Vec<CatalogEntry>) -> Result<()> {
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        entries.push(CatalogEntry {
            kind: EntryKind::Hook,
            name: entry.file_name().to_string_lossy().into_owned(),
            path: relative(source_root, entry.path()),
            description: None,
            tools: Vec::new(),
            model: None,
        });
    }
    Ok(())
}
