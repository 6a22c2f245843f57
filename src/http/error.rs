//! Request-level error taxonomy and its HTTP mapping.
//!
//! # Design Decisions
//! - Missing or undecodable tokens are client errors (400) and never reach
//!   upstream
//! - Upstream transport failures surface as 502 with a short cause string;
//!   the core never retries (the browser reloading is the retry policy)
//! - Upstream non-2xx statuses are NOT errors here; they are forwarded
//!   verbatim by the handler

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::proxy::token::DecodeError;

/// Errors terminating one proxied request.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `u` query parameter was absent.
    #[error("missing token parameter 'u'")]
    MissingToken,

    /// The `u` query parameter was not a valid token.
    #[error("invalid token: {0}")]
    InvalidToken(#[from] DecodeError),

    /// The inbound request body could not be read within limits.
    #[error("unreadable request body")]
    BodyRead,

    /// Dispatching to upstream failed (connect, DNS, TLS, timeout).
    #[error("upstream error: {0}")]
    Upstream(#[source] reqwest::Error),

    /// The outbound response could not be assembled.
    #[error("response build error: {0}")]
    Response(#[from] axum::http::Error),
}

impl ProxyError {
    fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingToken | ProxyError::InvalidToken(_) | ProxyError::BodyRead => {
                StatusCode::BAD_REQUEST
            }
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Response(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(status = %status, error = %self, "Request failed");
        (status, self.to_string()).into_response()
    }
}
