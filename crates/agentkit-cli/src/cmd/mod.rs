pub mod config;
pub mod convert;
pub mod install;
pub mod list;
pub mod status;
pub mod uninstall;

use agentkit_core::config::Config;
use agentkit_core::link::{self, LinkPlan};
use agentkit_core::tool::{self, Scope, Tool};
use anyhow::Context;
use clap::Args;
use std::path::Path;

/// Flags shared by every command that works on an installed link set.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Assistant whose config directory receives the links: claude, cursor or aider
    #[arg(long, default_value = "claude")]
    pub tool: Tool,

    /// Install under the home directory (default)
    #[arg(long, conflicts_with = "project")]
    pub global: bool,

    /// Install under the current directory
    #[arg(long)]
    pub project: bool,
}

impl TargetArgs {
    pub fn scope(&self) -> Scope {
        if self.project {
            Scope::Project
        } else {
            Scope::Global
        }
    }

    /// Load the source config and build the link plan for these flags.
    pub fn plan(&self, source: &Path) -> anyhow::Result<LinkPlan> {
        let config = Config::load(source)
            .with_context(|| format!("failed to load config from {}", source.display()))?;
        let scope = self.scope();
        let home = match scope {
            Scope::Global => Some(tool::user_home()?),
            Scope::Project => None,
        };
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let base = tool::resolve_base(self.tool, scope, home.as_deref(), &cwd)?;
        let plan = link::plan(source, &base, self.tool, scope, &config)?;
        if plan.ops.is_empty() {
            anyhow::bail!(
                "nothing to link: none of [{}] exist in {}",
                config.components.join(", "),
                source.display()
            );
        }
        Ok(plan)
    }
}
