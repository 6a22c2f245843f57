//! Embedding proxy for third-party looking-glass sites.
//!
//! Lets a host page embed upstream diagnostic sites in an iframe even when
//! they forbid framing. Target URLs travel as opaque transport-safe tokens;
//! HTML responses have every browser-followable reference rewritten to
//! re-enter the proxy.
//!
//! # Architecture Overview
//!
//! ```text
//! GET /embed/frame/{pid}                 GET|POST /embed/proxy?u=<token>
//!     → providers (catalog lookup)           → proxy::token (decode)
//!     → http::pages (iframe chrome)          → upstream fetch (redirects
//!       src = /embed/proxy?u=<token>           followed, curated headers)
//!                                            → proxy::rewrite (if HTML:
//!                                              resolve + re-encode every
//!                                              src/href/action/meta-refresh)
//!                                            → response mirrors upstream
//!                                              status + Content-Type
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod providers;
pub mod proxy;

// Cross-cutting concerns
pub mod lifecycle;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
