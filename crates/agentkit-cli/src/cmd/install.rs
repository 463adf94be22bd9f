use super::TargetArgs;
use crate::output::{display_path, print_json};
use agentkit_core::link::{self, LinkOutcome, LinkPlan};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    plan: &'a LinkPlan,
    outcomes: &'a [LinkOutcome],
}

/// `agentkit install` — link each component directory into the tool's config directory.
pub fn run(source: &Path, target: &TargetArgs, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let plan = target.plan(source)?;
    let outcomes = link::install(&plan, dry_run)?;

    if json {
        return print_json(&Report {
            plan: &plan,
            outcomes: &outcomes,
        });
    }

    let mode = if dry_run { " (dry run)" } else { "" };
    println!(
        "Installing {} links ({}) into {}{mode}",
        plan.tool,
        plan.scope,
        display_path(&plan.base)
    );
    print_outcomes(&outcomes);
    for skipped in &plan.skipped {
        println!("  skipped: {skipped}/ (not found in {})", source.display());
    }
    Ok(())
}

pub(super) fn print_outcomes(outcomes: &[LinkOutcome]) {
    for outcome in outcomes {
        let verb = if outcome.dry_run {
            format!("would be {}", outcome.action.as_str())
        } else {
            outcome.action.as_str().to_string()
        };
        println!(
            "  {verb}: {} -> {}",
            display_path(&outcome.op.target),
            outcome.op.source.display()
        );
    }
}
