//! Opaque-URL proxy engine.
//!
//! # Data Flow
//! ```text
//! browser request /embed/proxy?u=<token>
//!     → token.rs (decode token to absolute upstream URL)
//!     → [http layer dispatches to upstream]
//!     → rewrite.rs (if HTML: rewrite embedded references)
//!         → resolve.rs (relative reference → absolute URL)
//!         → token.rs (absolute URL → re-entry token)
//!     → response back to browser, which follows rewritten links
//!       through the proxy again
//! ```
//!
//! # Design Decisions
//! - Tokens are a pure function of the URL: no state, no expiry
//! - Rewriting is regex-based, not a DOM parse; tolerant of broken markup
//! - A reference that cannot be resolved is left untouched rather than erroring

pub mod resolve;
pub mod rewrite;
pub mod token;

use url::Url;

/// Path of the forwarding endpoint. Rewritten references re-enter here.
pub const PROXY_PATH: &str = "/embed/proxy";

/// Build the proxied form of an absolute upstream URL.
///
/// The token alphabet is URL-safe base64 without padding, so the result can
/// sit inside a quoted HTML attribute or a query string with no further
/// escaping.
pub fn reentry_url(target: &Url) -> String {
    format!("{}?u={}", PROXY_PATH, token::encode(target.as_str()))
}
