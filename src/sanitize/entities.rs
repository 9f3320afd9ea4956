use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::Sanitizer;

/// `&#` followed by ASCII word characters, with an optional `;` terminator.
static CHAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#([0-9A-Za-z_]+);?").expect("character reference pattern should compile")
});

/// Layer 1: decodes numeric character references (`&#106;` -> `j`).
///
/// Attackers spell schemes as `&#106;avascript:` so that a naive prefix
/// check never sees `javascript`. Only decimal values are understood; any
/// other capture (hex `x6A`, names, digits followed by letters) decodes to
/// U+0000, which the control stripper removes afterwards. Values wrap at
/// 0x10000 like a UTF-16 code unit, and surrogates become U+FFFD.
pub struct EntityDecoder;

impl EntityDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EntityDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer for EntityDecoder {
    fn sanitize(&self, input: &str) -> String {
        if !input.contains("&#") {
            return input.to_string();
        }
        CHAR_REFERENCE
            .replace_all(input, |caps: &Captures| {
                decode_reference(&caps[1]).to_string()
            })
            .into_owned()
    }

    fn name(&self) -> &str {
        "entities"
    }
}

fn decode_reference(digits: &str) -> char {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return '\0';
    }
    let unit = digits
        .bytes()
        .fold(0u32, |acc, b| (acc * 10 + u32::from(b - b'0')) % 0x1_0000);
    char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER)
}
