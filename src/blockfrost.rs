use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{AssetHolder, Datum, PolicyAsset, Utxo};

pub const MAINNET_URL: &str = "https://cardano-mainnet.blockfrost.io/api/v0";

/// Blockfrost returns at most this many items per page.
pub const PAGE_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The four lookups the resolver walks through.
#[async_trait]
pub trait ChainIndex: Send + Sync {
    /// `GET /addresses/{address}/utxos`
    async fn utxos(&self, address: &str) -> Result<Vec<Utxo>, ApiError>;

    /// `GET /scripts/datum/{hash}`
    async fn datum(&self, hash: &str) -> Result<Datum, ApiError>;

    /// `GET /assets/policy/{policy}`
    async fn assets_by_policy(&self, policy: &str) -> Result<Vec<PolicyAsset>, ApiError>;

    /// `GET /assets/{asset}/addresses`
    async fn asset_addresses(&self, asset: &str) -> Result<Vec<AssetHolder>, ApiError>;
}

pub struct BlockfrostApi {
    api_url: String,
    client: reqwest::Client,
}

impl BlockfrostApi {
    pub fn new(api_url: &str, project_id: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(project_id)
            .map_err(|e| anyhow!("invalid Blockfrost project id: {}", e))?;
        key.set_sensitive(true);
        headers.insert("project_id", key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| anyhow!("failed to build HTTP client: {}", e))?;
        Ok(Self::with_client(api_url, client))
    }

    /// Use a preconfigured client. The caller is responsible for the
    /// `project_id` header.
    pub fn with_client(api_url: &str, client: reqwest::Client) -> Self {
        Self {
            api_url: crate::utils::remove_trailing_slash(api_url),
            client,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_utxos_url(&self, address: &str) -> String {
        format!("{}/addresses/{}/utxos", self.api_url, address)
    }

    fn build_datum_url(&self, hash: &str) -> String {
        format!("{}/scripts/datum/{}", self.api_url, hash)
    }

    fn build_policy_assets_url(&self, policy: &str) -> String {
        format!("{}/assets/policy/{}", self.api_url, policy)
    }

    fn build_asset_addresses_url(&self, asset: &str) -> String {
        format!("{}/assets/{}/addresses", self.api_url, asset)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        tracing::info!(%url, "calling");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::RateLimited {
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Only the first page is read.
    async fn fetch_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, ApiError> {
        let items: Vec<T> = self.fetch(url).await?;
        if is_full_page(items.len()) {
            tracing::warn!(
                %url,
                count = items.len(),
                "full page returned, listing may be truncated"
            );
        }
        Ok(items)
    }
}

pub(crate) fn is_full_page(len: usize) -> bool {
    len >= PAGE_SIZE
}

#[async_trait]
impl ChainIndex for BlockfrostApi {
    async fn utxos(&self, address: &str) -> Result<Vec<Utxo>, ApiError> {
        self.fetch_list(&self.build_utxos_url(address)).await
    }

    async fn datum(&self, hash: &str) -> Result<Datum, ApiError> {
        self.fetch(&self.build_datum_url(hash)).await
    }

    async fn assets_by_policy(&self, policy: &str) -> Result<Vec<PolicyAsset>, ApiError> {
        self.fetch_list(&self.build_policy_assets_url(policy)).await
    }

    async fn asset_addresses(&self, asset: &str) -> Result<Vec<AssetHolder>, ApiError> {
        self.fetch_list(&self.build_asset_addresses_url(asset)).await
    }
}
