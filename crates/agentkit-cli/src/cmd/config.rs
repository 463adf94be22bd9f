use crate::output::print_json;
use agentkit_core::config::{Config, WarnLevel};
use agentkit_core::paths;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Write a default agentkit.yaml if none exists
    Init,
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn run(source: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(source, json),
        ConfigSubcommand::Validate => validate(source, json),
        ConfigSubcommand::Init => init(source),
    }
}

fn load(source: &Path) -> anyhow::Result<Config> {
    Config::load(source).context("failed to load agentkit.yaml")
}

fn show(source: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(source)?;
    if json {
        return print_json(&config);
    }
    print!("{}", config.to_yaml()?);
    Ok(())
}

fn validate(source: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(source)?;
    let warnings = config.validate();
    let errors = warnings
        .iter()
        .filter(|w| w.level == WarnLevel::Error)
        .count();

    if json {
        print_json(&warnings)?;
    } else if warnings.is_empty() {
        println!("Config OK.");
    } else {
        for w in &warnings {
            let label = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("{label}: {}", w.message);
        }
    }

    if errors > 0 {
        anyhow::bail!("config has {errors} error(s)");
    }
    Ok(())
}

fn init(source: &Path) -> anyhow::Result<()> {
    let path = paths::config_path(source);
    if path.exists() {
        println!("  exists:  {}", path.display());
        return Ok(());
    }
    Config::default()
        .save(source)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("  created: {}", path.display());
    Ok(())
}
