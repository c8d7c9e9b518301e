//! Document source for the evaluation page: HTTP fetch or local file.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Trait for fetching the evaluation page - enables mocking for tests.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the raw HTML of the evaluation page.
    async fn fetch(&self) -> Result<String>;
}

/// Fetches the evaluation page over HTTP.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Creates a new HTTP source for the given URL.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, url: url.into() })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self) -> Result<String> {
        info!("Fetching price page: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", self.url))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Price page request failed with status: {}", status);
        }

        response.text().await.context("Failed to read response body")
    }
}

/// Reads the evaluation page from a local file, bypassing the network.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a new file source.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PageSource for FileSource {
    async fn fetch(&self) -> Result<String> {
        debug!("Reading price page from {}", self.path.display());

        tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_http_fetch_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/evaluate.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>price page</html>"))
            .mount(&mock_server)
            .await;

        let source = HttpSource::new(format!("{}/evaluate.php", mock_server.uri())).unwrap();
        let body = source.fetch().await.unwrap();
        assert!(body.contains("price page"));
    }

    #[tokio::test]
    async fn test_http_fetch_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/evaluate.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let source = HttpSource::new(format!("{}/evaluate.php", mock_server.uri())).unwrap();
        let result = source.fetch().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_http_fetch_unreachable() {
        let source = HttpSource::new("http://127.0.0.1:1/evaluate.php").unwrap();
        assert!(source.fetch().await.is_err());
    }

    #[tokio::test]
    async fn test_file_fetch() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "<html>local page</html>").unwrap();

        let source = FileSource::new(file.path());
        let body = source.fetch().await.unwrap();
        assert_eq!(body, "<html>local page</html>");
    }

    #[tokio::test]
    async fn test_file_fetch_missing() {
        let source = FileSource::new("/nonexistent/evaluate.html");
        let result = source.fetch().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("/nonexistent/evaluate.html"));
    }
}
