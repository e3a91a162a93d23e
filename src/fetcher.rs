//! Man-page HTTP fetcher
//!
//! `GET {base}{section}/{command}` against the configured man server.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

/// Raw answer from the man server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

/// Source of man-page documents
#[async_trait]
pub trait ManSource: Send + Sync {
    async fn fetch(&self, section: &str, command: &str) -> Result<FetchResponse, FetchError>;
}

/// reqwest-backed fetcher
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Plain concatenation; the base URL carries its own trailing slash
    pub fn url_for(&self, section: &str, command: &str) -> String {
        format!("{}{}/{}", self.base_url, section, command)
    }
}

#[async_trait]
impl ManSource for HttpFetcher {
    async fn fetch(&self, section: &str, command: &str) -> Result<FetchResponse, FetchError> {
        let url = self.url_for(section, command);
        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.clone(),
            message: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        // Reading to the end hands the connection back to the pool
        let body = response.text().await.map_err(transport)?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_concatenation() {
        let fetcher = HttpFetcher::new("http://localhost:8000/man/");
        assert_eq!(fetcher.url_for("1", "ls"), "http://localhost:8000/man/1/ls");
    }

    #[test]
    fn test_url_without_trailing_slash_is_not_normalized() {
        let fetcher = HttpFetcher::new("http://localhost:8000");
        assert_eq!(fetcher.url_for("3", "printf"), "http://localhost:80003/printf");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base = format!("http://127.0.0.1:{}/", port);

        let fetcher = HttpFetcher::new(&base);
        let err = fetcher.fetch("1", "ls").await.unwrap_err();
        let FetchError::Transport { url, .. } = err;
        assert_eq!(url, format!("{}1/ls", base));
    }
}
