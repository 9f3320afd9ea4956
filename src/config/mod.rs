pub mod policy;

pub use policy::*;

use std::path::PathBuf;

/// Project-local config directory name: `<root>/.hrefguard/`
pub const PROJECT_DIR: &str = ".hrefguard";

/// Returns the global config directory path: `~/.config/hrefguard/`
pub fn dirs_global() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("hrefguard")
}
