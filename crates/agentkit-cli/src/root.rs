use std::path::{Path, PathBuf};

/// Resolve the source repository holding `commands/`, `agents/`, `skills/` and `hooks/`.
///
/// Priority:
/// 1. `--source` flag / `AGENTKIT_SOURCE` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `agentkit.yaml`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_source(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_upward(&cwd, |dir| dir.join(agentkit_core::paths::CONFIG_FILE).is_file())
        .or_else(|| find_upward(&cwd, |dir| dir.join(".git").is_dir()))
        .unwrap_or(cwd)
}

fn find_upward(start: &Path, matches: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| matches(dir))
        .map(Path::to_path_buf)
}
