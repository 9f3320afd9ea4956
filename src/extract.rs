//! Pulls URL-bearing attribute values out of HTML and email bodies.
//!
//! Not a full parser: it walks each start tag's attribute list the way a
//! browser tokenizer does, so attributes glued together (`href="/x"src=...`)
//! are still seen, and it decodes character references in values the way the
//! DOM does before anyone resolves the URL.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Attributes whose value a browser resolves as a URL.
const URL_ATTRIBUTES: &[&str] = &[
    "href",
    "src",
    "action",
    "formaction",
    "xlink:href",
    "poster",
    "background",
];

static TAG_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][^\s/>]*").expect("tag pattern should compile"));

/// One attribute at the start of the remaining tag body.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^[\s/]*([^\s"'<>/=][^\s"'<>/=]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]*)))?"#,
    )
    .expect("attribute pattern should compile")
});

/// Decimal, hex, or named character reference.
static CHAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#([0-9]+)|#[xX]([0-9A-Fa-f]+)|([A-Za-z][A-Za-z0-9]*));?")
        .expect("character reference pattern should compile")
});

/// One URL-bearing attribute found in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// 1-based line of the attribute name.
    pub line: usize,
    /// Lowercased attribute name.
    pub attribute: String,
    /// Raw attribute value, quotes removed, as written in the source.
    pub value: String,
    /// The value with character references decoded, as the DOM sees it.
    pub decoded: String,
}

/// Find every URL-bearing attribute in `html`, in document order.
pub fn extract_links(html: &str) -> Vec<LinkRef> {
    let mut links = Vec::new();
    let mut line = 1;
    let mut counted_to = 0;
    let mut search_from = 0;

    while let Some(tag) = TAG_OPEN.find_at(html, search_from) {
        let mut pos = tag.end();

        loop {
            let Some(caps) = ATTRIBUTE.captures(&html[pos..]) else {
                // Stray quote or similar: skip one character and keep going
                // until the tag closes.
                let rest = html[pos..].trim_start_matches(|c: char| c.is_whitespace() || c == '/');
                match rest.chars().next() {
                    None | Some('>') | Some('<') => break,
                    Some(c) => {
                        pos = html.len() - rest.len() + c.len_utf8();
                        continue;
                    }
                }
            };
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            let attribute = name.as_str().to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3)).or_else(|| caps.get(4));
            if let Some(value) = value.filter(|_| URL_ATTRIBUTES.contains(&attribute.as_str())) {
                let name_start = pos + name.start();
                line += html[counted_to..name_start].matches('\n').count();
                counted_to = name_start;

                links.push(LinkRef {
                    line,
                    attribute,
                    value: value.as_str().to_string(),
                    decoded: decode_attribute(value.as_str()),
                });
            }

            pos += whole.end();
        }

        search_from = pos;
    }

    links
}

/// Decode character references in an attribute value.
///
/// Numeric references decode with or without `;`, as browsers do. Named
/// references decode only when terminated; the unterminated legacy forms
/// never produce ASCII letters, `:` or controls.
pub fn decode_attribute(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    CHAR_REFERENCE
        .replace_all(raw, |caps: &Captures| {
            if let Some(dec) = caps.get(1) {
                return numeric_reference(dec.as_str(), 10).to_string();
            }
            if let Some(hex) = caps.get(2) {
                return numeric_reference(hex.as_str(), 16).to_string();
            }
            let whole = &caps[0];
            if whole.ends_with(';') {
                html_escape::decode_html_entities(whole).into_owned()
            } else {
                whole.to_string()
            }
        })
        .into_owned()
}

/// Zero, surrogates and out-of-range values become U+FFFD.
fn numeric_reference(digits: &str, radix: u32) -> char {
    u32::from_str_radix(digits, radix)
        .ok()
        .filter(|&v| v != 0)
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
