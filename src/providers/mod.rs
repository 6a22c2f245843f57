//! Read-only provider catalog.
//!
//! # Responsibilities
//! - Hold the looking-glass sites available for embedding, keyed by id
//! - Parse and pin each upstream URL once at startup
//!
//! # Design Decisions
//! - Built from config during initialization, never mutated afterwards;
//!   shared across handlers behind an `Arc` with no synchronization
//! - Configuration order is preserved for display on the index page

use std::collections::HashMap;

use url::Url;

use crate::config::ProviderConfig;

/// One cataloged looking-glass site.
#[derive(Debug, Clone)]
pub struct Provider {
    /// Identifier used in frame URLs.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Absolute upstream URL.
    pub url: Url,
}

/// Error building the table from config.
#[derive(Debug)]
pub enum ProviderError {
    /// A configured upstream URL did not parse.
    InvalidUrl { id: String, source: url::ParseError },
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::InvalidUrl { id, source } => {
                write!(f, "provider '{}' has an invalid url: {}", id, source)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Immutable id → provider mapping.
#[derive(Debug)]
pub struct ProviderTable {
    /// Providers in configuration order.
    entries: Vec<Provider>,
    /// Index into `entries` by id.
    by_id: HashMap<String, usize>,
}

impl ProviderTable {
    /// Build the table from validated configuration.
    pub fn from_config(configs: &[ProviderConfig]) -> Result<Self, ProviderError> {
        let mut entries = Vec::with_capacity(configs.len());
        let mut by_id = HashMap::with_capacity(configs.len());

        for config in configs {
            let url = Url::parse(&config.url).map_err(|source| ProviderError::InvalidUrl {
                id: config.id.clone(),
                source,
            })?;
            by_id.insert(config.id.clone(), entries.len());
            entries.push(Provider {
                id: config.id.clone(),
                name: config.name.clone(),
                url,
            });
        }

        Ok(Self { entries, by_id })
    }

    /// Look up a provider by id.
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.by_id.get(id).map(|&i| &self.entries[i])
    }

    /// Iterate providers in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.entries.iter()
    }

    /// Number of cataloged providers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
