use crate::domain::ports::Transport;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;

/// reqwest-backed [`Transport`]. Clones share one connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| EtlError::TransportError {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| EtlError::TransportError {
                url: url.to_string(),
                source,
            })?;

        tracing::debug!("{} answered {} ({} bytes)", url, status, body.len());
        Ok(body.to_vec())
    }
}
