use crate::config::Config;
use crate::core::FetchError;
use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;
use tracing::debug;

/// Fetches raw documents. Implementations own timeouts and status handling.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

pub struct ReqwestClient {
    client: reqwest::Client,
    max_body_bytes: u64,
}

impl ReqwestClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(config.redirect_limit))
            .build()
            .map_err(|e| FetchError::Network {
                url: String::new(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let network = |e: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.5")
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        debug!("GET {} -> HTTP {}", url, status);

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit: self.max_body_bytes,
                });
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(network)?;
            body.extend_from_slice(&chunk);

            if body.len() as u64 > self.max_body_bytes {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit: self.max_body_bytes,
                });
            }
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
