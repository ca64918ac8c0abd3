//! Cart configuration

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// localStorage key the storefront has always used for the cart
pub const DEFAULT_STORAGE_KEY: &str = "solarpro_cart";

/// Database file created inside the data directory
pub const DATABASE_FILE: &str = "cart.redb";

/// Configuration for a [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Directory holding the local database.
    pub data_dir: PathBuf,

    /// Key the serialized cart is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Storefront base URL. `None` disables remote sync.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-request timeout for sync calls, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Capacity of the event broadcast channel.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_event_capacity() -> usize {
    64
}

impl CartConfig {
    /// Create a config rooted at `data_dir` with all other values defaulted.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: default_storage_key(),
            endpoint: None,
            timeout_secs: default_timeout(),
            event_capacity: default_event_capacity(),
        }
    }

    /// Create config from environment variables, falling back to defaults.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `SOLARCART_ENDPOINT` | Storefront base URL for sync |
    /// | `SOLARCART_TIMEOUT` | Sync request timeout in seconds |
    pub fn from_env(data_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(data_dir);
        config.endpoint = std::env::var("SOLARCART_ENDPOINT").ok();
        if let Some(secs) = std::env::var("SOLARCART_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout_secs = secs;
        }
        config
    }

    /// Set the storefront base URL.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the sync request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}
