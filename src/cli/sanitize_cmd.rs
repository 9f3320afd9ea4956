use std::io::{BufRead, Write};

use crate::error::Result;
use crate::sanitize::UrlSanitizer;

/// Sanitize each URL argument, or each input line when there are none.
/// Writes one result per line; with `json`, one `Verdict` object per line.
pub fn run<R: BufRead, W: Write>(
    sanitizer: &UrlSanitizer,
    urls: &[String],
    json: bool,
    input: R,
    mut out: W,
) -> Result<()> {
    if !urls.is_empty() {
        for url in urls {
            emit(sanitizer, url, json, &mut out)?;
        }
        return Ok(());
    }

    for line in input.lines() {
        let line = line?;
        emit(sanitizer, &line, json, &mut out)?;
    }
    Ok(())
}

fn emit<W: Write>(sanitizer: &UrlSanitizer, url: &str, json: bool, out: &mut W) -> Result<()> {
    if json {
        let verdict = sanitizer.classify(Some(url));
        serde_json::to_writer(&mut *out, &verdict)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", sanitizer.sanitize(Some(url)))?;
    }
    Ok(())
}
