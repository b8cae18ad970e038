//! Client configuration.

use serde::Deserialize;

/// Environment variable read by [`ClientConfig::from_env`].
pub const BASE_HOST_ENV: &str = "STOREFRONT_BASE_HOST";

/// Settings fixed at client construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Prefix for every request path, e.g. `http://localhost:8000`.
    /// Empty means requests are relative to the serving origin. No slash
    /// normalization is applied.
    #[serde(default)]
    pub base_host: String,
}

impl ClientConfig {
    pub fn new(base_host: impl Into<String>) -> Self {
        Self {
            base_host: base_host.into(),
        }
    }

    /// Read the base host from `STOREFRONT_BASE_HOST`, falling back to `""`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(BASE_HOST_ENV).unwrap_or_default())
    }
}
