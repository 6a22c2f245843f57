//! Relative reference resolution.
//!
//! # Responsibilities
//! - Turn a possibly-relative reference from a page into an absolute URL,
//!   resolved against the page's base (the final upstream URL after redirects)
//!
//! # Design Decisions
//! - RFC 3986 resolution via `url::Url::join`: scheme-relative, absolute-path,
//!   relative, and query/fragment-only references all handled
//! - Already-absolute references come back as themselves
//! - A reference the parser cannot join yields `None`; the caller keeps the
//!   original text (rewriting never fails a document)

use url::Url;

/// Resolve `reference` against `base` into an absolute URL.
pub fn resolve(reference: &str, base: &Url) -> Option<Url> {
    base.join(reference).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_absolute_path_reference() {
        let abs = resolve("/a/b", &base("http://h/x/y")).unwrap();
        assert_eq!(abs.as_str(), "http://h/a/b");
    }

    #[test]
    fn test_relative_reference() {
        let abs = resolve("b", &base("http://h/x/y")).unwrap();
        assert_eq!(abs.as_str(), "http://h/x/b");
    }

    #[test]
    fn test_absolute_reference_is_idempotent() {
        let abs = resolve("http://other/z", &base("http://h/x/y")).unwrap();
        assert_eq!(abs.as_str(), "http://other/z");
    }

    #[test]
    fn test_scheme_relative_reference() {
        let abs = resolve("//cdn.example.net/app.js", &base("https://h/page")).unwrap();
        assert_eq!(abs.as_str(), "https://cdn.example.net/app.js");
    }

    #[test]
    fn test_query_and_fragment_references() {
        let b = base("http://h/x/y");
        assert_eq!(resolve("?q=1", &b).unwrap().as_str(), "http://h/x/y?q=1");
        assert_eq!(resolve("#top", &b).unwrap().as_str(), "http://h/x/y#top");
    }
}
