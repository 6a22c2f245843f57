//! HTML reference rewriting.
//!
//! # Responsibilities
//! - Replace every browser-followable reference in an HTML document with a
//!   proxy re-entry URL, so follow-on loads keep flowing through the proxy
//! - Normalize meta-refresh redirects to re-enter the proxy immediately
//!
//! # Design Decisions
//! - Regex scan, not a DOM parse: tolerant of malformed and partial markup,
//!   returns non-matching documents unchanged, never fails
//! - Only quoted attribute values are matched; unquoted values are a known
//!   coverage gap accepted for simplicity
//! - Scheme skip-list comparison is case-sensitive as written by the page
//!   author, while attribute names match case-insensitively
//! - Not idempotent: run exactly once per upstream fetch, or proxy paths get
//!   re-encoded as if they were page references

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

use crate::proxy::reentry_url;
use crate::proxy::resolve::resolve;

/// Attributes whose values a browser will follow.
/// `data-src`/`data-href` cover the common lazy-loading conventions.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(src|href|action|data-src|data-href)\s*=\s*(?:"([^"\n]+)"|'([^'\n]+)')"#,
    )
    .expect("attribute pattern is valid")
});

/// `<meta http-equiv="refresh" content="N; url=TARGET">`, any quote style.
static META_REFRESH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta\s+http-equiv=["']refresh["']\s+content=["']\s*\d+\s*;\s*url=([^"']+)["']\s*/?>"#,
    )
    .expect("meta-refresh pattern is valid")
});

/// Schemes left untouched. Prefix match is case-sensitive.
const SKIP_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "data:", "tel:"];

/// Rewrite all recognized references in `html` to re-enter the proxy,
/// resolving relative values against `base` (the final upstream URL).
///
/// The attribute pass runs over the whole document first, then the
/// meta-refresh pass runs over its output. The original delay of a
/// meta-refresh is discarded; re-entry is immediate.
pub fn rewrite_html(html: &str, base: &Url) -> String {
    let attrs_done = ATTR_RE.replace_all(html, |caps: &Captures| {
        let attr = &caps[1];
        let (quote, value) = match (caps.get(2), caps.get(3)) {
            (Some(m), _) => ('"', m.as_str()),
            (_, Some(m)) => ('\'', m.as_str()),
            _ => return caps[0].to_string(),
        };

        if SKIP_SCHEMES.iter().any(|scheme| value.starts_with(scheme)) {
            return caps[0].to_string();
        }

        match resolve(value, base) {
            Some(abs) => format!("{attr}={quote}{}{quote}", reentry_url(&abs)),
            None => caps[0].to_string(),
        }
    });

    META_REFRESH_RE
        .replace_all(&attrs_done, |caps: &Captures| match resolve(&caps[1], base) {
            Some(abs) => format!(
                "<meta http-equiv=\"refresh\" content=\"0; url={}\">",
                reentry_url(&abs)
            ),
            None => caps[0].to_string(),
        })
        .into_owned()
}
