use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{HrefGuardError, Result};
use crate::sanitize::scheme::SchemeGuard;
use crate::sanitize::NormalizePipeline;

/// Sanitizer policy, loaded from `.hrefguard/policy.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanitizerPolicy {
    /// Scheme prefixes that reduce a URL to the placeholder.
    /// Matched case-insensitively against the start of the scheme token.
    #[serde(default = "default_blocked_schemes")]
    pub blocked_schemes: Vec<String>,

    /// First characters that mark a relative URL. Default: `.` and `/`.
    #[serde(default = "default_relative_prefixes")]
    pub relative_prefixes: Vec<char>,

    /// Scheme prepended to URLs without an explicit `http(s)://`. Default: `https`.
    #[serde(default = "default_upgrade_scheme")]
    pub upgrade_scheme: String,

    /// Returned for empty and rejected input. Default: `about:blank`.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Which files `hrefguard scan` inspects.
    #[serde(default)]
    pub scan: ScanConfig,
}

fn default_blocked_schemes() -> Vec<String> {
    vec!["javascript".into(), "data".into(), "vbscript".into()]
}
fn default_relative_prefixes() -> Vec<char> {
    vec!['.', '/']
}
fn default_upgrade_scheme() -> String {
    "https".into()
}
fn default_placeholder() -> String {
    "about:blank".into()
}

impl Default for SanitizerPolicy {
    fn default() -> Self {
        Self {
            blocked_schemes: default_blocked_schemes(),
            relative_prefixes: default_relative_prefixes(),
            upgrade_scheme: default_upgrade_scheme(),
            placeholder: default_placeholder(),
            scan: ScanConfig::default(),
        }
    }
}

impl SanitizerPolicy {
    /// Load policy from a YAML file. Returns default if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no policy file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let policy: Self =
            serde_yaml::from_str(&contents).map_err(|e| HrefGuardError::ConfigParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load policy from the project root. Checks `.hrefguard/policy.yml`.
    pub fn load_project(project_root: &Path) -> Result<Self> {
        let path = project_root.join(super::PROJECT_DIR).join("policy.yml");
        Self::load_from(&path)
    }

    /// Reject settings that would let the sanitizer emit an unusable or
    /// dangerous value.
    pub fn validate(&self) -> Result<()> {
        if let Some(blank) = self.blocked_schemes.iter().find(|s| s.trim().is_empty()) {
            return Err(HrefGuardError::InvalidPolicy {
                reason: format!("blocked scheme entry is empty: {blank:?}"),
            });
        }
        if self.placeholder.trim().is_empty() {
            return Err(HrefGuardError::InvalidPolicy {
                reason: "placeholder must not be empty".into(),
            });
        }
        if !is_scheme_name(&self.upgrade_scheme) {
            return Err(HrefGuardError::InvalidPolicy {
                reason: format!(
                    "upgrade scheme must be a bare scheme name, got {:?}",
                    self.upgrade_scheme
                ),
            });
        }
        // A word character as relative prefix would pass `javascript:` through.
        if let Some(c) = self
            .relative_prefixes
            .iter()
            .find(|c| c.is_ascii_alphanumeric() || **c == '_')
        {
            return Err(HrefGuardError::InvalidPolicy {
                reason: format!("relative prefix must not be a word character, got {c:?}"),
            });
        }

        let guard = SchemeGuard::new(self.blocked_schemes.clone())?;
        if let Some(scheme) = guard.blocked_scheme(&format!("{}://", self.upgrade_scheme)) {
            return Err(HrefGuardError::InvalidPolicy {
                reason: format!(
                    "upgrade scheme {:?} is blocked by {scheme:?}",
                    self.upgrade_scheme
                ),
            });
        }
        let placeholder = NormalizePipeline::default_pipeline().sanitize(&self.placeholder);
        if let Some(scheme) = guard.blocked_scheme(placeholder.trim()) {
            return Err(HrefGuardError::InvalidPolicy {
                reason: format!(
                    "placeholder {:?} is blocked by {scheme:?}",
                    self.placeholder
                ),
            });
        }
        Ok(())
    }

    /// Serialize to YAML, as written by `hrefguard init`.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// RFC 3986 scheme: a letter, then letters, digits, `+`, `-` or `.`.
fn is_scheme_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// File selection for `hrefguard scan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Glob patterns, matched against paths relative to the scan root.
    pub include: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            include: vec![
                "**/*.html".into(),
                "**/*.htm".into(),
                "**/*.xhtml".into(),
                "**/*.eml".into(),
            ],
        }
    }
}
