use crate::output::print_json;
use agentkit_core::cursor;
use anyhow::Context;
use std::path::Path;

/// `agentkit convert` — rewrite command markdown into Cursor rules.
pub fn run(input: &Path, output: &Path, json: bool) -> anyhow::Result<()> {
    if !json {
        println!(
            "Converting commands from {} to {}...",
            input.display(),
            output.display()
        );
    }

    let report = cursor::convert_directory(input, output)
        .with_context(|| format!("failed to convert {}", input.display()))?;

    if json {
        return print_json(&report);
    }

    for path in &report.converted {
        println!("  converted: {}", path.display());
    }
    for failure in &report.failed {
        eprintln!("  error: {}: {}", failure.path.display(), failure.error);
    }
    println!(
        "\nConversion complete: {} converted, {} failed.",
        report.converted.len(),
        report.failed.len()
    );
    Ok(())
}
