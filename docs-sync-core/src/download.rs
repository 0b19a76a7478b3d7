//! HTTP implementation of [`TextFetcher`].

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::contract::{FetchError, TextFetcher};

/// Fetches raw markdown over HTTP(S). Any non-2xx status is a failure.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        info!(url = %url, "Fetching source markdown");
        let response = self.client.get(url).send().await.map_err(|e| {
            error!(error = ?e, url = %url, "Request failed");
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Source returned error status");
            return Err(format!("{url} returned {status}").into());
        }

        let text = response.text().await?;
        info!(url = %url, bytes = text.len(), "Fetched source markdown");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("build client");
        HttpFetcher::with_client(client)
    }

    #[tokio::test]
    async fn returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/core/README.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Core\n\nBody.\n"))
            .mount(&server)
            .await;

        let url = format!("{}/core/README.md", server.uri());
        let text = fetcher().fetch_text(&url).await.unwrap();
        assert_eq!(text, "# Core\n\nBody.\n");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.md"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken.md"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let missing = format!("{}/missing.md", server.uri());
        let err = HttpFetcher::new().fetch_text(&missing).await.unwrap_err();
        assert!(err.to_string().contains("404"), "got: {err}");

        let broken = format!("{}/broken.md", server.uri());
        assert!(fetcher().fetch_text(&broken).await.is_err());
    }
}
