//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::locale::Locale;

/// Where the authoritative collection lives.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub backend: StorageBackend,
    pub database_url: String,
    #[serde(default)]
    pub locale: Locale,
    /// Load the sample clients into an empty collection at startup.
    #[serde(default)]
    pub seed_demo_data: bool,
}
