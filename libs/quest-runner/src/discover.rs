//! Script discovery.

use anyhow::{Context, Result};
use config::constants::SCRIPT_EXTENSIONS;
use std::fs;
use std::path::{Path, PathBuf};

/// Check if `path` names a Quest script.
pub fn is_script(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| SCRIPT_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// Every script below `dir`, sorted by path.
pub fn collect_scripts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut scripts = Vec::new();
    visit(dir, &mut scripts)?;
    scripts.sort();
    Ok(scripts)
}

fn visit(dir: &Path, scripts: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("cannot read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            visit(&path, scripts)?;
        } else if is_script(&path) {
            scripts.push(path);
        }
    }
    Ok(())
}
