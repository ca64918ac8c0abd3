//! HTTP client for the storefront cart endpoint.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::config::CartConfig;
use crate::error::{CartError, CartResult};
use crate::types::{CartItem, CartPayload};

/// Path of the cart endpoint relative to the storefront base URL
pub const CART_API_PATH: &str = "/api/carrinho";

const USER_AGENT_VALUE: &str = concat!("solarcart/", env!("CARGO_PKG_VERSION"));

/// Client for `GET`/`POST /api/carrinho`.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SyncClient {
    client: reqwest::Client,
    url: String,
}

impl SyncClient {
    /// Build a client for the storefront at `base_url`.
    pub fn new(base_url: &str, timeout: std::time::Duration) -> CartResult<Self> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CartError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                base_url
            )));
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| CartError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: format!("{}{}", base_url, CART_API_PATH),
        })
    }

    /// Build a client from config, or `None` when no endpoint is configured.
    pub fn from_config(config: &CartConfig) -> CartResult<Option<Self>> {
        config
            .endpoint
            .as_deref()
            .map(|endpoint| Self::new(endpoint, config.timeout()))
            .transpose()
    }

    /// Full URL of the cart endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send the full cart. The response body is ignored; only the status
    /// decides success.
    pub async fn push(&self, items: &[CartItem]) -> CartResult<()> {
        let payload = CartPayload {
            items: items.to_vec(),
        };

        debug!(url = %self.url, items = items.len(), "pushing cart");
        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartError::Sync(format!("server returned {}", status)));
        }
        Ok(())
    }

    /// Fetch the cart the server holds for the current session.
    ///
    /// Anonymous sessions get an empty array.
    pub async fn fetch(&self) -> CartResult<Vec<CartItem>> {
        debug!(url = %self.url, "fetching remote cart");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CartError::Sync(format!("server returned {}", status)));
        }

        let body = response.bytes().await?;
        let items = serde_json::from_slice(&body)?;
        Ok(items)
    }
}
