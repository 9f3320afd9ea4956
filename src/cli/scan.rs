use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{HrefGuardError, Result};
use crate::extract::{extract_links, LinkRef};
use crate::sanitize::UrlSanitizer;
use crate::verdict::{Disposition, Verdict};

/// A link the sanitizer would reject for its scheme.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub path: String,
    #[serde(flatten)]
    pub link: LinkRef,
    pub verdict: Verdict,
}

/// Scan files and directories for links with denylisted schemes.
///
/// Findings go to `out`, progress to stderr. Returns the finding count.
pub fn run<W: Write>(
    sanitizer: &UrlSanitizer,
    paths: &[PathBuf],
    json: bool,
    mut out: W,
) -> Result<usize> {
    let include = build_globset(&sanitizer.policy().scan.include)?;
    let roots = if paths.is_empty() {
        vec![std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))]
    } else {
        paths.to_vec()
    };

    let mut findings = Vec::new();
    for root in &roots {
        if root.is_dir() {
            eprintln!("hrefguard: scanning directory {}...", root.display());
            scan_dir(sanitizer, &include, root, root, &mut findings)?;
        } else if root.is_file() {
            // Explicit files are scanned whatever their extension.
            scan_file(sanitizer, root, &mut findings);
        } else {
            return Err(HrefGuardError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("path not found: {}", root.display()),
            )));
        }
    }

    for finding in &findings {
        if json {
            serde_json::to_writer(&mut out, finding)?;
            writeln!(out)?;
        } else {
            writeln!(
                out,
                "{}:{}: {}=\"{}\" blocked ({})",
                finding.path,
                finding.link.line,
                finding.link.attribute,
                finding.link.value,
                finding.verdict.blocked_scheme.as_deref().unwrap_or("unknown"),
            )?;
        }
    }

    if findings.is_empty() {
        eprintln!("hrefguard: scan clean -- no dangerous links.");
    } else {
        eprintln!(
            "hrefguard: {} dangerous link(s) found.",
            findings.len()
        );
    }

    Ok(findings.len())
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| HrefGuardError::GlobPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| HrefGuardError::GlobPattern {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })
}

/// Check one file. Unreadable and non-UTF-8 files are skipped.
fn scan_file(sanitizer: &UrlSanitizer, path: &Path, findings: &mut Vec<Finding>) {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %path.display(), "skipping unreadable file: {}", e);
            return;
        }
    };

    for link in extract_links(&contents) {
        let verdict = sanitizer.classify(Some(&link.decoded));
        if verdict.disposition == Disposition::Blocked {
            findings.push(Finding {
                path: path.display().to_string(),
                link,
                verdict,
            });
        }
    }
}

fn scan_dir(
    sanitizer: &UrlSanitizer,
    include: &GlobSet,
    root: &Path,
    dir: &Path,
    findings: &mut Vec<Finding>,
) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            // Skip hidden directories
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }
            scan_dir(sanitizer, include, root, &path, findings)?;
        } else if path.is_file() {
            let relative = path.strip_prefix(root).unwrap_or(&path);
            if include.is_match(relative) {
                scan_file(sanitizer, &path, findings);
            } else {
                tracing::trace!(path = %path.display(), "not in scan.include");
            }
        }
    }

    Ok(())
}
