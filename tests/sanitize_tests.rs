//! Behavioural tests for the URL sanitizer with the built-in policy.

use hrefguard::sanitize::{NormalizePipeline, Sanitizer};
use hrefguard::{classify_url, sanitize_url, Disposition};

const BLANK: &str = "about:blank";

// ---------------------------------------------------------------------------
// Empty and absent input
// ---------------------------------------------------------------------------

#[test]
fn absent_input_is_blank() {
    assert_eq!(sanitize_url(None), BLANK);
}

#[test]
fn empty_and_whitespace_input_is_blank() {
    assert_eq!(sanitize_url(Some("")), BLANK);
    assert_eq!(sanitize_url(Some("   ")), BLANK);
    assert_eq!(sanitize_url(Some("\t\n ")), BLANK);
}

#[test]
fn only_invisible_characters_is_blank() {
    assert_eq!(sanitize_url(Some("\u{200B}\u{FEFF}\u{0000}")), BLANK);
    assert_eq!(sanitize_url(Some("&#0;&#8203;")), BLANK);
}

// ---------------------------------------------------------------------------
// Dangerous schemes
// ---------------------------------------------------------------------------

#[test]
fn javascript_is_blocked() {
    assert_eq!(sanitize_url(Some("javascript:alert(1)")), BLANK);
}

#[test]
fn javascript_mixed_case_is_blocked() {
    assert_eq!(sanitize_url(Some("JaVaScRiPt:alert(1)")), BLANK);
}

#[test]
fn entity_encoded_javascript_is_blocked() {
    assert_eq!(sanitize_url(Some("&#106;avascript:alert(1)")), BLANK);
    assert_eq!(
        sanitize_url(Some("&#106&#97&#118&#97&#115&#99&#114&#105&#112&#116&#58;alert(1)")),
        BLANK
    );
}

#[test]
fn data_uri_is_blocked() {
    assert_eq!(
        sanitize_url(Some("data:text/html,<script>alert(1)</script>")),
        BLANK
    );
}

#[test]
fn vbscript_is_blocked() {
    assert_eq!(sanitize_url(Some("vbscript:msgbox(1)")), BLANK);
}

#[test]
fn control_character_split_scheme_is_blocked() {
    assert_eq!(sanitize_url(Some("java\u{0000}script:alert(1)")), BLANK);
    assert_eq!(sanitize_url(Some("java\tscript:alert(1)")), BLANK);
    assert_eq!(sanitize_url(Some("jav\u{200B}ascript:alert(1)")), BLANK);
    assert_eq!(sanitize_url(Some("\u{FEFF}javascript:alert(1)")), BLANK);
}

#[test]
fn leading_whitespace_and_symbols_do_not_hide_scheme() {
    assert_eq!(sanitize_url(Some("  javascript:alert(1)")), BLANK);
    assert_eq!(sanitize_url(Some("\"javascript:alert(1)")), BLANK);
}

#[test]
fn mixed_references_and_zero_width_are_blocked() {
    assert_eq!(
        sanitize_url(Some("&#106;\u{200B}ava&#8203;script:alert(1)")),
        BLANK
    );
    assert_eq!(sanitize_url(Some("java&#9;script:alert(1)")), BLANK);
    assert_eq!(sanitize_url(Some(" \u{FEFF}&#100;ata:text/html,x")), BLANK);
}

#[test]
fn non_decimal_reference_does_not_decode() {
    // `0x6A` is not decimal, so the reference vanishes and no scheme is left.
    assert_eq!(
        sanitize_url(Some("&#0x6A;avascript:alert(1)")),
        "https://avascript:alert(1)"
    );
}

// ---------------------------------------------------------------------------
// Web URLs and upgrades
// ---------------------------------------------------------------------------

#[test]
fn bare_domain_is_upgraded() {
    assert_eq!(sanitize_url(Some("example.com")), "https://example.com");
}

#[test]
fn explicit_web_urls_pass_through() {
    assert_eq!(sanitize_url(Some("http://example.com")), "http://example.com");
    assert_eq!(
        sanitize_url(Some("https://example.com/path?q=1")),
        "https://example.com/path?q=1"
    );
    assert_eq!(sanitize_url(Some("HTTPS://Example.com")), "HTTPS://Example.com");
}

#[test]
fn web_url_mentioning_javascript_in_host_passes() {
    assert_eq!(
        sanitize_url(Some("https://javascript.info/intro")),
        "https://javascript.info/intro"
    );
}

#[test]
fn other_schemes_are_upgraded() {
    // Non-denylisted schemes are not treated as web schemes.
    assert_eq!(sanitize_url(Some("mailto:a@b.com")), "https://mailto:a@b.com");
    assert_eq!(sanitize_url(Some("tel:+15551234")), "https://tel:+15551234");
}

#[test]
fn host_with_port_is_upgraded_not_blocked() {
    assert_eq!(
        sanitize_url(Some("datadoghq.com:443/x")),
        "https://datadoghq.com:443/x"
    );
    assert_eq!(
        sanitize_url(Some("javascript.info:80/")),
        "https://javascript.info:80/"
    );
    assert_eq!(
        classify_url(Some("data.example:8080")).disposition,
        Disposition::Upgraded
    );
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    assert_eq!(sanitize_url(Some("  https://a.test  ")), "https://a.test");
}

// ---------------------------------------------------------------------------
// Relative URLs
// ---------------------------------------------------------------------------

#[test]
fn relative_paths_pass_through() {
    assert_eq!(sanitize_url(Some("/relative/path")), "/relative/path");
    assert_eq!(sanitize_url(Some("./relative")), "./relative");
    assert_eq!(sanitize_url(Some("../up")), "../up");
    assert_eq!(sanitize_url(Some("//cdn.test/x.js")), "//cdn.test/x.js");
}

#[test]
fn relative_path_is_still_normalized() {
    assert_eq!(sanitize_url(Some(" /a\u{200B}b ")), "/ab");
}

// ---------------------------------------------------------------------------
// Whole-function properties
// ---------------------------------------------------------------------------

fn samples() -> Vec<&'static str> {
    vec![
        "",
        "   ",
        "javascript:alert(1)",
        "&#106;avascript:alert(1)",
        "data:text/html,x",
        "example.com",
        "http://example.com",
        "/relative",
        "./relative",
        "mailto:a@b.com",
        "&#x6A;avascript:alert(1)",
        "java\u{0000}script:alert(1)",
        "about:blank",
        ":::",
        "datadoghq.com:443/x",
        "javascript.info:80/",
        "localhost:8080",
        "&#0x6A;avascript:alert(1)",
        "&#106;\u{200B}ava&#8203;script:alert(1)",
        "java&#9;script:alert(1)",
        " \u{FEFF}&#100;ata:text/html,x",
        "https://example.com:8443/a?b=c#d",
    ]
}

#[test]
fn output_is_never_empty() {
    for s in samples() {
        assert!(!sanitize_url(Some(s)).is_empty(), "empty output for {s:?}");
    }
}

#[test]
fn output_is_always_a_safe_shape() {
    for s in samples() {
        let out = sanitize_url(Some(s));
        let lower = out.to_ascii_lowercase();
        assert!(
            out == BLANK
                || out.starts_with('.')
                || out.starts_with('/')
                || lower.starts_with("http://")
                || lower.starts_with("https://"),
            "unexpected output {out:?} for {s:?}"
        );
    }
}

#[test]
fn sanitizing_twice_never_becomes_dangerous() {
    for s in samples() {
        let once = sanitize_url(Some(s));
        let twice = classify_url(Some(&once));
        assert_ne!(
            twice.disposition,
            Disposition::Blocked,
            "{s:?} -> {once:?} was blocked on second pass"
        );
    }
}

#[test]
fn already_safe_urls_are_fixed_points() {
    for s in ["https://a.test/x", "/a/b", "./c", "http://b.test"] {
        assert_eq!(sanitize_url(Some(&sanitize_url(Some(s)))), s);
    }
}

#[test]
fn classify_agrees_with_sanitize() {
    for s in samples() {
        assert_eq!(classify_url(Some(s)).output, sanitize_url(Some(s)));
    }
}

#[test]
fn classify_dispositions() {
    assert_eq!(classify_url(None).disposition, Disposition::Blank);
    assert_eq!(classify_url(Some("/a")).disposition, Disposition::Relative);
    assert_eq!(
        classify_url(Some("javascript:x")).disposition,
        Disposition::Blocked
    );
    assert_eq!(
        classify_url(Some("example.com")).disposition,
        Disposition::Upgraded
    );
    assert_eq!(
        classify_url(Some("https://a.test")).disposition,
        Disposition::Passthrough
    );
}

#[test]
fn sanitizer_is_shareable_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let url = format!("javascript:alert({i})");
                sanitize_url(Some(&url))
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), BLANK);
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

struct Uppercase;

impl Sanitizer for Uppercase {
    fn sanitize(&self, input: &str) -> String {
        input.to_uppercase()
    }

    fn name(&self) -> &str {
        "uppercase"
    }
}

#[test]
fn pipeline_custom_layers_run_in_order() {
    let pipeline = NormalizePipeline::new(vec![Box::new(Uppercase)]);
    assert_eq!(pipeline.sanitize("abc"), "ABC");
    assert_eq!(pipeline.layer_names(), vec!["uppercase"]);
}

#[test]
fn pipeline_empty_input() {
    let pipeline = NormalizePipeline::default_pipeline();
    assert_eq!(pipeline.sanitize(""), "");
}
