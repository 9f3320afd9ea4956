use serde::{Deserialize, Serialize};

/// How the sanitizer arrived at its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    /// Input was empty after normalization; the placeholder was returned.
    Blank,
    /// Input starts with a relative prefix and was returned as normalized.
    Relative,
    /// Scheme token matched the denylist; the placeholder was returned.
    Blocked,
    /// No explicit `http(s)://`, so the upgrade scheme was prepended.
    Upgraded,
    /// Already an explicit `http(s)://` URL.
    Passthrough,
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Disposition::Blank => write!(f, "blank"),
            Disposition::Relative => write!(f, "relative"),
            Disposition::Blocked => write!(f, "blocked"),
            Disposition::Upgraded => write!(f, "upgraded"),
            Disposition::Passthrough => write!(f, "passthrough"),
        }
    }
}

impl std::str::FromStr for Disposition {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blank" => Ok(Disposition::Blank),
            "relative" => Ok(Disposition::Relative),
            "blocked" => Ok(Disposition::Blocked),
            "upgraded" => Ok(Disposition::Upgraded),
            "passthrough" => Ok(Disposition::Passthrough),
            _ => Err(format!("unknown disposition: {s}")),
        }
    }
}

/// A sanitized URL together with the reason it looks the way it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The raw caller input. Absent input is recorded as the empty string.
    pub input: String,

    /// The only value safe to place in an href/src attribute.
    pub output: String,

    pub disposition: Disposition,

    /// For `Blocked`: the denylisted scheme that matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_scheme: Option<String>,
}

impl Verdict {
    /// The caller may keep its original value verbatim.
    pub fn is_safe_passthrough(&self) -> bool {
        self.output == self.input
    }
}
