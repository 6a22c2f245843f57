//! HTTP server setup and the forwarding handler.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeouts, body limits, request ID)
//! - Bind server to listener and drain on shutdown
//! - Forward token-bearing requests to the decoded upstream URL
//! - Rewrite HTML responses so follow-on loads re-enter the proxy
//!
//! # Design Decisions
//! - Per-request state machine:
//!   RECEIVE → DECODE_TOKEN → DISPATCH_UPSTREAM → (REWRITE_IF_HTML) → RESPOND
//! - Only a curated header set goes upstream (User-Agent, Accept,
//!   Accept-Language, Referer); Referer is the target itself, which many
//!   looking glasses require
//! - All upstream response headers except Content-Type are dropped. This is
//!   a deliberate simplification and breaks cookie-based upstream sessions
//! - Upstream non-2xx statuses are forwarded verbatim, body rewriting included

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::{header, HeaderMap, Method, Response as HttpResponse},
    response::Response,
    routing::{any, get},
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::error::ProxyError;
use crate::http::pages;
use crate::providers::{ProviderError, ProviderTable};
use crate::proxy::rewrite::rewrite_html;
use crate::proxy::{token, PROXY_PATH};

/// Default User-Agent sent upstream when the browser did not supply one.
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome Safari";

/// Default Accept-Language sent upstream.
const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Application state injected into handlers.
///
/// Everything here is immutable or internally synchronized; handlers share
/// it with cheap clones.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderTable>,
    pub client: reqwest::Client,
}

/// Error type for server construction.
#[derive(Debug)]
pub enum ServerError {
    /// The provider catalog could not be built.
    Providers(ProviderError),
    /// The upstream HTTP client could not be initialized.
    Client(reqwest::Error),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Providers(e) => write!(f, "provider catalog error: {}", e),
            ServerError::Client(e) => write!(f, "upstream client error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {}

/// HTTP server for the embedding proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let providers =
            Arc::new(ProviderTable::from_config(&config.providers).map_err(ServerError::Providers)?);

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(Duration::from_secs(config.timeouts.upstream_secs))
            .build()
            .map_err(ServerError::Client)?;

        let state = AppState { providers, client };
        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(pages::index))
            .route("/embed/frame/{pid}", get(pages::embed_frame))
            .route(PROXY_PATH, any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Query parameters of the forwarding endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ProxyParams {
    /// Token encoding the upstream target URL.
    #[serde(default)]
    u: Option<String>,
}

/// Forwarding handler.
///
/// Decodes the token, dispatches the equivalent request upstream, rewrites
/// HTML responses, and mirrors the upstream status back to the caller.
async fn proxy_handler(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
    request: Request,
) -> Result<Response, ProxyError> {
    // RECEIVE + DECODE_TOKEN: no upstream contact on a missing or bad token.
    let raw = params.u.ok_or(ProxyError::MissingToken)?;
    let target = token::decode(&raw)?;

    let (parts, body) = request.into_parts();
    let method = parts.method;

    // Forward the inbound body only for methods that conventionally carry one.
    let body_bytes = if method == Method::POST || method == Method::PUT || method == Method::PATCH
    {
        // The body limit layer has already bounded this read.
        Some(
            axum::body::to_bytes(body, usize::MAX)
                .await
                .map_err(|_| ProxyError::BodyRead)?,
        )
    } else {
        None
    };

    tracing::debug!(method = %method, target = %target, "Dispatching to upstream");

    // DISPATCH_UPSTREAM: curated headers only; Referer is the target itself.
    let mut outbound = state
        .client
        .request(method, target.as_str())
        .header(
            header::USER_AGENT,
            inbound_or(&parts.headers, header::USER_AGENT, DEFAULT_USER_AGENT),
        )
        .header(
            header::ACCEPT,
            inbound_or(&parts.headers, header::ACCEPT, "*/*"),
        )
        .header(
            header::ACCEPT_LANGUAGE,
            inbound_or(&parts.headers, header::ACCEPT_LANGUAGE, DEFAULT_ACCEPT_LANGUAGE),
        )
        .header(header::REFERER, target.as_str());
    if let Some(bytes) = body_bytes {
        outbound = outbound.body(bytes);
    }

    let upstream = outbound.send().await.map_err(ProxyError::Upstream)?;

    let status = upstream.status();
    // Redirects were followed; the final URL is the base for rewriting.
    let final_url = upstream.url().clone();
    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let is_html = content_type
        .as_deref()
        .is_some_and(|ct| ct.to_ascii_lowercase().contains("text/html"));

    let body = upstream.bytes().await.map_err(ProxyError::Upstream)?;

    tracing::debug!(
        status = %status,
        final_url = %final_url,
        html = is_html,
        bytes = body.len(),
        "Upstream responded"
    );

    // RESPOND: mirror the upstream status; keep Content-Type, drop the rest.
    let mut response = HttpResponse::builder().status(status);
    if let Some(ct) = &content_type {
        response = response.header(header::CONTENT_TYPE, ct.as_str());
    }

    // REWRITE_IF_HTML: HTML bodies re-enter the proxy; everything else is
    // passed through byte-for-byte.
    let response = if is_html {
        let page = String::from_utf8_lossy(&body);
        response.body(Body::from(rewrite_html(&page, &final_url)))?
    } else {
        response.body(Body::from(body))?
    };

    Ok(response)
}

/// Pick the inbound header value when present and readable, else a default.
fn inbound_or<'a>(headers: &'a HeaderMap, name: header::HeaderName, default: &'a str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_or_prefers_inbound_value() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "text/html".parse().unwrap());
        assert_eq!(inbound_or(&headers, header::ACCEPT, "*/*"), "text/html");
    }

    #[test]
    fn test_inbound_or_falls_back_to_default() {
        let headers = HeaderMap::new();
        assert_eq!(inbound_or(&headers, header::ACCEPT, "*/*"), "*/*");
        assert_eq!(
            inbound_or(&headers, header::USER_AGENT, DEFAULT_USER_AGENT),
            DEFAULT_USER_AGENT
        );
    }
}
