use crate::config::Config;
use crate::error::Result;
use crate::io;
use crate::paths;
use crate::tool::{Scope, Tool};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One symlink: `target` -> `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkOp {
    pub component: String,
    pub source: PathBuf,
    pub target: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkPlan {
    pub tool: Tool,
    pub scope: Scope,
    pub base: PathBuf,
    pub ops: Vec<LinkOp>,
    /// Configured components with no directory in the source repository.
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkAction {
    Created,
    Replaced,
    Unchanged,
    Removed,
    Absent,
}

impl LinkAction {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkAction::Created => "created",
            LinkAction::Replaced => "replaced",
            LinkAction::Unchanged => "unchanged",
            LinkAction::Removed => "removed",
            LinkAction::Absent => "absent",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkOutcome {
    #[serde(flatten)]
    pub op: LinkOp,
    pub action: LinkAction,
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "points_to", rename_all = "snake_case")]
pub enum LinkState {
    /// Symlink pointing at the expected source.
    Linked,
    /// Symlink pointing somewhere else.
    Foreign(PathBuf),
    /// A real file or directory occupies the target path.
    Occupied,
    Missing,
}

impl LinkState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkState::Linked => "linked",
            LinkState::Foreign(_) => "foreign",
            LinkState::Occupied => "occupied",
            LinkState::Missing => "missing",
        }
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// Build the list of links to manage under `base` for the configured components.
///
/// Source directories are canonicalized so the links resolve from anywhere.
pub fn plan(
    source_root: &Path,
    base: &Path,
    tool: Tool,
    scope: Scope,
    config: &Config,
) -> Result<LinkPlan> {
    config.ensure_valid()?;

    let mut ops = Vec::new();
    let mut skipped = Vec::new();
    for component in &config.components {
        let source = paths::component_dir(source_root, component);
        if !source.is_dir() {
            warn!(component = %component, path = %source.display(), "component directory missing, skipping");
            skipped.push(component.clone());
            continue;
        }
        let source = std::fs::canonicalize(&source)?;
        ops.push(LinkOp {
            component: component.clone(),
            target: paths::link_target(base, component, &config.link_name),
            source,
        });
    }

    Ok(LinkPlan {
        tool,
        scope,
        base: base.to_path_buf(),
        ops,
        skipped,
    })
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Current state of `op.target`, without following symlinks.
pub fn inspect(op: &LinkOp) -> Result<LinkState> {
    let meta = match std::fs::symlink_metadata(&op.target) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(LinkState::Missing),
        Err(e) => return Err(e.into()),
    };
    if !meta.file_type().is_symlink() {
        return Ok(LinkState::Occupied);
    }
    let dest = std::fs::read_link(&op.target)?;
    if points_to(&op.target, &dest, &op.source) {
        Ok(LinkState::Linked)
    } else {
        Ok(LinkState::Foreign(dest))
    }
}

/// Compare a link's destination with the expected source. Relative
/// destinations are resolved against the link's parent directory.
fn points_to(link: &Path, dest: &Path, source: &Path) -> bool {
    if dest == source {
        return true;
    }
    let resolved = match link.parent() {
        Some(parent) if dest.is_relative() => parent.join(dest),
        _ => dest.to_path_buf(),
    };
    match (std::fs::canonicalize(&resolved), std::fs::canonicalize(source)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn status(plan: &LinkPlan) -> Result<Vec<(LinkOp, LinkState)>> {
    plan.ops
        .iter()
        .map(|op| Ok((op.clone(), inspect(op)?)))
        .collect()
}

// ---------------------------------------------------------------------------
// Install / uninstall
// ---------------------------------------------------------------------------

/// Create every link in `plan`, replacing whatever currently sits at each target.
///
/// Stops at the first filesystem error. With `dry_run` nothing on disk changes
/// and each outcome reports the action that would have been taken.
pub fn install(plan: &LinkPlan, dry_run: bool) -> Result<Vec<LinkOutcome>> {
    let mut outcomes = Vec::with_capacity(plan.ops.len());
    for op in &plan.ops {
        let action = match inspect(op)? {
            LinkState::Linked => LinkAction::Unchanged,
            LinkState::Missing => LinkAction::Created,
            LinkState::Foreign(_) | LinkState::Occupied => LinkAction::Replaced,
        };

        if !dry_run && action != LinkAction::Unchanged {
            if let Some(parent) = op.target.parent() {
                io::ensure_dir(parent)?;
            }
            if action == LinkAction::Replaced {
                io::remove_existing(&op.target)?;
            }
            io::symlink_dir(&op.source, &op.target)?;
        }

        debug!(
            component = %op.component,
            link = %op.target.display(),
            source = %op.source.display(),
            action = action.as_str(),
            dry_run,
            "install"
        );
        outcomes.push(LinkOutcome {
            op: op.clone(),
            action,
            dry_run,
        });
    }
    Ok(outcomes)
}

/// Remove links created by [`install`]. Only symlinks pointing at the planned
/// source are removed; anything else at a target path is left untouched.
pub fn uninstall(plan: &LinkPlan, dry_run: bool) -> Result<Vec<LinkOutcome>> {
    let mut outcomes = Vec::with_capacity(plan.ops.len());
    for op in &plan.ops {
        let action = match inspect(op)? {
            LinkState::Linked => {
                if !dry_run {
                    io::remove_existing(&op.target)?;
                }
                LinkAction::Removed
            }
            LinkState::Missing => LinkAction::Absent,
            state => {
                warn!(
                    link = %op.target.display(),
                    state = state.as_str(),
                    "not an agentkit link, leaving in place"
                );
                LinkAction::Absent
            }
        };
        debug!(
            component = %op.component,
            link = %op.target.display(),
            action = action.as_str(),
            dry_run,
            "uninstall"
        );
        outcomes.push(LinkOutcome {
            op: op.clone(),
            action,
            dry_run,
        });
    }
    Ok(outcomes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        source: PathBuf,
        base: PathBuf,
    }

    fn fixture(components: &[&str]) -> Fixture {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("kit");
        for c in components {
            std::fs::create_dir_all(source.join(c)).unwrap();
            std::fs::write(source.join(c).join("readme.md"), c).unwrap();
        }
        let base = dir.path().join("home/.claude");
        Fixture {
            _dir: dir,
            source,
            base,
        }
    }

    fn plan_for(fx: &Fixture) -> LinkPlan {
        plan(
            &fx.source,
            &fx.base,
            Tool::Claude,
            Scope::Global,
            &Config::default(),
        )
        .unwrap()
    }

    #[test]
    fn plan_skips_missing_components() {
        let fx = fixture(&["commands", "skills"]);
        let p = plan_for(&fx);
        let components: Vec<_> = p.ops.iter().map(|o| o.component.as_str()).collect();
        assert_eq!(components, vec!["commands", "skills"]);
        assert_eq!(p.skipped, vec!["agents", "hooks"]);
        assert_eq!(p.ops[0].target, fx.base.join("commands/shared"));
        assert!(p.ops[0].source.is_absolute());
    }

    #[test]
    fn plan_rejects_invalid_config() {
        let fx = fixture(&["commands"]);
        let cfg = Config {
            link_name: "Not Valid".to_string(),
            ..Config::default()
        };
        assert!(plan(&fx.source, &fx.base, Tool::Claude, Scope::Global, &cfg).is_err());
    }

    #[test]
    fn install_creates_links() {
        let fx = fixture(&["commands", "agents", "skills", "hooks"]);
        let p = plan_for(&fx);
        let outcomes = install(&p, false).unwrap();
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|o| o.action == LinkAction::Created));

        let link = fx.base.join("commands/shared");
        assert!(std::fs::symlink_metadata(&link)
            .unwrap()
            .file_type()
            .is_symlink());
        assert_eq!(
            std::fs::read_link(&link).unwrap(),
            std::fs::canonicalize(fx.source.join("commands")).unwrap()
        );
        assert!(link.join("readme.md").exists());
    }

    #[test]
    fn dry_run_changes_nothing() {
        let fx = fixture(&["commands", "hooks"]);
        let p = plan_for(&fx);
        let outcomes = install(&p, true).unwrap();
        assert!(outcomes.iter().all(|o| o.dry_run && o.action == LinkAction::Created));
        assert!(!fx.base.exists());
    }

    #[test]
    fn reinstall_is_idempotent() {
        let fx = fixture(&["commands"]);
        let p = plan_for(&fx);
        install(&p, false).unwrap();
        let second = install(&p, false).unwrap();
        assert_eq!(second[0].action, LinkAction::Unchanged);
        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Linked);
    }

    #[test]
    fn install_replaces_foreign_symlink() {
        let fx = fixture(&["commands"]);
        let p = plan_for(&fx);
        let elsewhere = fx.base.parent().unwrap().join("elsewhere");
        std::fs::create_dir_all(&elsewhere).unwrap();
        std::fs::create_dir_all(fx.base.join("commands")).unwrap();
        std::os::unix::fs::symlink(&elsewhere, fx.base.join("commands/shared")).unwrap();

        assert!(matches!(inspect(&p.ops[0]).unwrap(), LinkState::Foreign(_)));
        let outcomes = install(&p, false).unwrap();
        assert_eq!(outcomes[0].action, LinkAction::Replaced);
        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Linked);
        assert!(elsewhere.exists());
    }

    #[test]
    fn install_replaces_real_directory() {
        let fx = fixture(&["agents"]);
        let p = plan_for(&fx);
        let occupied = fx.base.join("agents/shared");
        std::fs::create_dir_all(&occupied).unwrap();
        std::fs::write(occupied.join("old.md"), "old").unwrap();

        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Occupied);
        install(&p, false).unwrap();
        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Linked);
        assert!(!fx.source.join("agents/old.md").exists());
    }

    #[test]
    fn install_replaces_regular_file() {
        let fx = fixture(&["hooks"]);
        let p = plan_for(&fx);
        std::fs::create_dir_all(fx.base.join("hooks")).unwrap();
        std::fs::write(fx.base.join("hooks/shared"), "stale").unwrap();
        let outcomes = install(&p, false).unwrap();
        assert_eq!(outcomes[0].action, LinkAction::Replaced);
        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Linked);
    }

    #[test]
    fn uninstall_removes_only_own_links() {
        let fx = fixture(&["commands", "agents"]);
        let p = plan_for(&fx);
        install(&p, false).unwrap();

        // Replace the agents link with a real directory the user owns.
        let agents_target = fx.base.join("agents/shared");
        std::fs::remove_file(&agents_target).unwrap();
        std::fs::create_dir_all(&agents_target).unwrap();

        let outcomes = uninstall(&p, false).unwrap();
        assert_eq!(outcomes[0].action, LinkAction::Removed);
        assert_eq!(outcomes[1].action, LinkAction::Absent);
        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Missing);
        assert!(agents_target.is_dir());
        assert!(fx.source.join("commands/readme.md").exists());
    }

    #[test]
    fn uninstall_dry_run_keeps_links() {
        let fx = fixture(&["commands"]);
        let p = plan_for(&fx);
        install(&p, false).unwrap();
        let outcomes = uninstall(&p, true).unwrap();
        assert_eq!(outcomes[0].action, LinkAction::Removed);
        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Linked);
    }

    #[test]
    fn status_reports_each_target() {
        let fx = fixture(&["commands", "skills"]);
        let p = plan_for(&fx);
        install(&p, false).unwrap();
        std::fs::remove_file(fx.base.join("skills/shared")).unwrap();

        let states: Vec<_> = status(&p).unwrap().into_iter().map(|(_, s)| s).collect();
        assert_eq!(states, vec![LinkState::Linked, LinkState::Missing]);
    }

    #[test]
    fn relative_link_counts_as_linked() {
        let fx = fixture(&["commands"]);
        let p = plan_for(&fx);
        let target = &p.ops[0].target;
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        // base/commands/shared -> ../../../kit/commands
        std::os::unix::fs::symlink("../../../kit/commands", target).unwrap();
        assert_eq!(inspect(&p.ops[0]).unwrap(), LinkState::Linked);
    }
}
