use super::install::print_outcomes;
use super::TargetArgs;
use crate::output::{display_path, print_json};
use agentkit_core::link;
use std::path::Path;

/// `agentkit uninstall` — remove links previously created by `install`.
pub fn run(source: &Path, target: &TargetArgs, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let plan = target.plan(source)?;
    let outcomes = link::uninstall(&plan, dry_run)?;

    if json {
        return print_json(&outcomes);
    }

    let mode = if dry_run { " (dry run)" } else { "" };
    println!(
        "Removing {} links ({}) from {}{mode}",
        plan.tool,
        plan.scope,
        display_path(&plan.base)
    );
    print_outcomes(&outcomes);
    Ok(())
}
