use crate::output::{print_json, print_table};
use agentkit_core::{catalog, config::Config};
use anyhow::Context;
use std::path::Path;

pub fn run(source: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(source).context("failed to load agentkit.yaml")?;
    let entries = catalog::scan(source, &config)?;

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("No commands, agents, skills or hooks found in {}", source.display());
        return Ok(());
    }

    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.kind.as_str().to_string(),
                e.name.clone(),
                e.path.display().to_string(),
                e.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["KIND", "NAME", "PATH", "DESCRIPTION"], rows);
    Ok(())
}
