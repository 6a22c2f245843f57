//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum router + middleware)
//!     → pages.rs (/ and /embed/frame/{pid}: catalog chrome)
//!     → server.rs proxy_handler (/embed/proxy?u=<token>: forwarding)
//!         → proxy engine (decode, dispatch, rewrite)
//!     → response to client
//! ```

pub mod error;
pub mod pages;
pub mod server;

pub use error::ProxyError;
pub use server::{AppState, HttpServer, ServerError};
