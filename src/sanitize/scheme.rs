use aho_corasick::{AhoCorasick, Anchored, Input, MatchKind, StartKind};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{HrefGuardError, Result};

/// Leading `something:` at the start of any line.
static SCHEME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([^:]+):").expect("scheme token pattern should compile"));

/// `host.tld:port` with nothing but a path, query or fragment after it.
static HOST_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+:[0-9]+(?:[/?#]|$)")
        .expect("host and port pattern should compile")
});

static WEB_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("web scheme pattern should compile"));

/// Returns the first scheme token (without its colon), if any.
pub fn scheme_token(url: &str) -> Option<&str> {
    SCHEME_TOKEN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// True when `url` is a bare dotted host with a numeric port, which is
/// not a scheme even though it has a colon.
pub fn is_host_port(url: &str) -> bool {
    HOST_PORT.is_match(url)
}

/// True when `url` begins with `http://` or `https://`, in any case.
pub fn has_web_scheme(url: &str) -> bool {
    WEB_SCHEME.is_match(url)
}

/// Layer 3: denylist check on the scheme token.
///
/// Leading non-word characters of the token are skipped, then the remainder
/// is matched as a case-insensitive prefix, so `databases:` is caught by
/// `data` just as `-javascript:` is caught by `javascript`.
pub struct SchemeGuard {
    automaton: AhoCorasick,
    schemes: Vec<String>,
}

impl SchemeGuard {
    /// Build from a list of blocked scheme prefixes.
    pub fn new(schemes: Vec<String>) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostFirst)
            .start_kind(StartKind::Anchored)
            .build(&schemes)
            .map_err(|e| HrefGuardError::InvalidPolicy {
                reason: format!("invalid scheme denylist: {e}"),
            })?;
        Ok(Self { automaton, schemes })
    }

    /// The denylisted scheme the URL starts with, if any.
    pub fn blocked_scheme(&self, url: &str) -> Option<&str> {
        if is_host_port(url) {
            return None;
        }
        let token = scheme_token(url)?;
        let rest = token.trim_start_matches(|c: char| !is_word_char(c));
        let input = Input::new(rest).anchored(Anchored::Yes);
        let found = self.automaton.try_find(input).ok().flatten()?;
        Some(self.schemes[found.pattern().as_usize()].as_str())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
