//! Semantic configuration checks, run after deserialization.

use std::collections::HashSet;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// Bind address does not parse as `host:port`.
    BindAddress(String),
    /// A provider field is empty or malformed.
    Provider { id: String, reason: String },
    /// Two providers share the same identifier.
    DuplicateProvider(String),
    /// A timeout is zero.
    ZeroTimeout(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::BindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::Provider { id, reason } => {
                write!(f, "provider '{}': {}", id, reason)
            }
            ValidationError::DuplicateProvider(id) => {
                write!(f, "duplicate provider id '{}'", id)
            }
            ValidationError::ZeroTimeout(name) => {
                write!(f, "timeout '{}' must be non-zero", name)
            }
        }
    }
}

/// Validate a configuration, collecting every problem rather than stopping
/// at the first.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream_secs"));
    }

    let mut seen = HashSet::new();
    for provider in &config.providers {
        if provider.id.is_empty() {
            errors.push(ValidationError::Provider {
                id: provider.id.clone(),
                reason: "empty id".to_string(),
            });
            continue;
        }
        if !seen.insert(provider.id.clone()) {
            errors.push(ValidationError::DuplicateProvider(provider.id.clone()));
        }
        if provider.name.is_empty() {
            errors.push(ValidationError::Provider {
                id: provider.id.clone(),
                reason: "empty display name".to_string(),
            });
        }
        match Url::parse(&provider.url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(ValidationError::Provider {
                id: provider.id.clone(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::Provider {
                id: provider.id.clone(),
                reason: format!("invalid url: {}", e),
            }),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
