use regex::Regex;
use std::sync::LazyLock;

use super::Sanitizer;

static INVISIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x{00}-\x{1F}\x{7F}-\x{9F}\x{2000}-\x{200D}\x{FEFF}]")
        .expect("control character pattern should compile")
});

/// Layer 2: removes C0/C1 controls, the U+2000..U+200D space and zero-width
/// block, and the byte order mark. These are what splits `java\0script:`
/// past a prefix check.
pub struct ControlStripper;

impl ControlStripper {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ControlStripper {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for ControlStripper {
    fn sanitize(&self, input: &str) -> String {
        INVISIBLE.replace_all(input, "").into_owned()
    }

    fn name(&self) -> &str {
        "control"
    }
}
