//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the embedding
//! proxy. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the embedding proxy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, body limits).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Provider catalog: the looking-glass sites available for embedding.
    pub providers: Vec<ProviderConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            providers: default_providers(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,

    /// Maximum inbound request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// End-to-end budget for an inbound request, in seconds.
    pub request_secs: u64,

    /// Budget for one outbound upstream fetch, redirects included, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 20,
        }
    }
}

/// One looking-glass provider available for embedding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Identifier used in frame URLs (e.g., "he").
    pub id: String,

    /// Display name (e.g., "Hurricane Electric (AS6939)").
    pub name: String,

    /// Absolute upstream URL of the looking glass.
    pub url: String,
}

/// The built-in provider catalog, used when no config file overrides it.
pub fn default_providers() -> Vec<ProviderConfig> {
    let table = [
        ("cogent", "Cogent (AS174)", "https://www.cogentco.com/en/looking-glass"),
        ("unitas", "Unitas Global (AS1828)", "https://lg.unitasglobal.net"),
        ("he", "Hurricane Electric (AS6939)", "https://lg.he.net"),
        ("hkix", "HKIX", "https://www.hkix.net/hkix/hkixlg.htm"),
        ("twelve99", "Arelion / Telia (AS1299)", "https://lg.twelve99.net"),
        ("singtel", "Singtel STIX", "https://stixlg.singtel.com"),
        ("lumen", "Lumen (Level3)", "https://lookingglass.centurylink.com"),
        ("ovh", "OVHcloud (AS16276)", "https://lg.ovh.net"),
        ("omantel", "Omantel / ZOI", "https://lookingglass.omantel.om"),
        ("nexlinx", "Nexlinx (PK)", "http://lg.nexlinx.net.pk"),
    ];

    table
        .into_iter()
        .map(|(id, name, url)| ProviderConfig {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}
