pub mod init;
pub mod sanitize_cmd;
pub mod scan;

use std::path::{Path, PathBuf};

use crate::config::{self, SanitizerPolicy, PROJECT_DIR};
use crate::error::Result;

/// Resolve the policy: `--config` when given, else `.hrefguard/policy.yml`
/// in the cwd, else `~/.config/hrefguard/policy.yml`, else built-in defaults.
pub fn load_policy(config: Option<&Path>) -> Result<SanitizerPolicy> {
    if let Some(path) = config {
        return SanitizerPolicy::load_from(path);
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project = cwd.join(PROJECT_DIR).join("policy.yml");
    if project.exists() {
        return SanitizerPolicy::load_from(&project);
    }

    SanitizerPolicy::load_from(&config::dirs_global().join("policy.yml"))
}
