use std::path::Path;

use crate::config::{SanitizerPolicy, PROJECT_DIR};
use crate::error::Result;

/// Write a default `.hrefguard/policy.yml` under `root`.
pub fn run(root: &Path) -> Result<()> {
    let dir = root.join(PROJECT_DIR);
    let path = dir.join("policy.yml");

    if path.exists() {
        eprintln!("hrefguard: {} already exists", path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&dir)?;
    std::fs::write(&path, SanitizerPolicy::default().to_yaml()?)?;
    tracing::info!(path = %path.display(), "wrote default policy");
    eprintln!("hrefguard: initialized {PROJECT_DIR}/policy.yml");
    Ok(())
}
