//! Client for the ping server HTTP API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Liveness of one requested host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResult {
    pub ip: String,
    pub alive: bool,
    pub cached: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

pub struct PingClient {
    client: Client,
    base_url: String,
    token: String,
}

impl PingClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::builder().no_proxy().build().unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    /// Ask for the liveness of `hosts`. Results come back in the same order.
    pub async fn ping(&self, hosts: &[&str], use_cache: bool) -> Result<Vec<PingResult>, ClientError> {
        let mut query: Vec<(&str, &str)> = hosts.iter().map(|h| ("addr", *h)).collect();
        query.push(("token", self.token.as_str()));
        if !use_cache {
            query.push(("cache", "false"));
        }

        let resp = self
            .client
            .get(format!("{}/ping", self.base_url))
            .query(&query)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Fetch the diagnostic snapshot.
    pub async fn debug(&self) -> Result<serde_json::Value, ClientError> {
        let resp = self
            .client
            .get(format!("{}/debug", self.base_url))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, message });
        }
        Ok(resp.json().await?)
    }
}
