use alloy_primitives::Address;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExplorerError {
    /// Request to the explorer failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The explorer answered with an error status
    #[error("Explorer API error: {0}")]
    Api(String),

    /// The returned ABI is not valid JSON
    #[error("Invalid ABI: {0}")]
    InvalidAbi(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Client for an Etherscan-compatible explorer API.
#[derive(Debug, Clone)]
pub struct Explorer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl Explorer {
    /// Creates a new explorer client.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api-sepolia.etherscan.io/api")
    /// * `api_key` - Explorer API key
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url, api_key)
    }

    /// Creates a new explorer client with a custom HTTP client.
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the verified ABI of `address`.
    pub async fn fetch_abi(&self, address: Address) -> Result<Value, ExplorerError> {
        debug!(%address, api_url = %self.api_url, "Fetching contract ABI");

        let address = address.to_string();
        let response: ApiResponse = self
            .client
            .get(&self.api_url)
            .query(&[
                ("module", "contract"),
                ("action", "getabi"),
                ("address", address.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_abi()
    }
}

/// Envelope of every Etherscan API response.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    /// "1" on success, "0" on failure
    status: String,
    #[serde(default)]
    message: String,
    /// ABI as a JSON string on success, error description otherwise.
    result: String,
}

impl ApiResponse {
    fn into_abi(self) -> Result<Value, ExplorerError> {
        if self.status != "1" {
            return Err(ExplorerError::Api(format!("{}: {}", self.message, self.result)));
        }

        Ok(serde_json::from_str(&self.result)?)
    }
}

/// Path the ABI of `address` is stored at inside `dir`.
pub fn abi_path(dir: impl AsRef<Path>, address: Address) -> PathBuf {
    dir.as_ref().join(format!("{address}.json"))
}

/// Write `abi` as pretty-printed JSON to `<dir>/<address>.json`.
///
/// Creates `dir` if needed and returns the written path.
pub async fn save_abi(
    dir: impl AsRef<Path>,
    address: Address,
    abi: &Value,
) -> Result<PathBuf, ExplorerError> {
    tokio::fs::create_dir_all(dir.as_ref()).await?;

    let path = abi_path(dir, address);
    let contents = serde_json::to_string_pretty(abi)?;
    tokio::fs::write(&path, contents).await?;

    info!(path = %path.display(), "ABI saved");
    Ok(path)
}
