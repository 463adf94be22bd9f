use super::TargetArgs;
use crate::output::{display_path, print_json, print_table};
use agentkit_core::link::{self, LinkOp, LinkState};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct Entry {
    #[serde(flatten)]
    op: LinkOp,
    #[serde(flatten)]
    state: LinkState,
}

pub fn run(source: &Path, target: &TargetArgs, json: bool) -> anyhow::Result<()> {
    let plan = target.plan(source)?;
    let states = link::status(&plan)?;

    if json {
        let entries: Vec<Entry> = states
            .into_iter()
            .map(|(op, state)| Entry { op, state })
            .collect();
        return print_json(&entries);
    }

    let rows = states
        .iter()
        .map(|(op, state)| {
            let detail = match state {
                LinkState::Foreign(dest) => format!("-> {}", dest.display()),
                _ => String::new(),
            };
            vec![
                op.component.clone(),
                state.as_str().to_string(),
                display_path(&op.target),
                detail,
            ]
        })
        .collect();
    print_table(&["COMPONENT", "STATE", "TARGET", ""], rows);
    Ok(())
}
