use crate::error::{KitError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const COMMANDS_DIR: &str = "commands";
pub const AGENTS_DIR: &str = "agents";
pub const SKILLS_DIR: &str = "skills";
pub const HOOKS_DIR: &str = "hooks";

/// Components linked by default, in install order.
pub const DEFAULT_COMPONENTS: [&str; 4] = [COMMANDS_DIR, AGENTS_DIR, SKILLS_DIR, HOOKS_DIR];

pub const CONFIG_FILE: &str = "agentkit.yaml";
pub const DEFAULT_LINK_NAME: &str = "shared";
pub const SKILL_FILE: &str = "SKILL.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(source_root: &Path) -> PathBuf {
    source_root.join(CONFIG_FILE)
}

pub fn component_dir(source_root: &Path, component: &str) -> PathBuf {
    source_root.join(component)
}

/// `<base>/<component>/<link_name>`, e.g. `~/.claude/commands/shared`.
pub fn link_target(base: &Path, component: &str, link_name: &str) -> PathBuf {
    base.join(component).join(link_name)
}

pub fn is_known_component(name: &str) -> bool {
    DEFAULT_COMPONENTS.contains(&name)
}

// ---------------------------------------------------------------------------
// Link name validation
// ---------------------------------------------------------------------------

static LINK_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn link_name_re() -> &'static Regex {
    LINK_NAME_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").expect("static regex")
    })
}

pub fn validate_link_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 64 || !link_name_re().is_match(name) {
        return Err(KitError::InvalidLinkName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
