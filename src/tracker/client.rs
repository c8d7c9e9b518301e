//! GitHub-backed issue store.

use crate::tracker::models::Entry;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Trait over the issue store - the only four operations this tool needs.
///
/// Listing returns each entry's title and body inline (the GitHub list
/// endpoint serves both in one call), so reading is part of listing.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Lists open entries with their titles and bodies.
    async fn list_open(&self) -> Result<Vec<Entry>>;

    /// Overwrites an entry's body.
    async fn update_body(&self, number: u64, body: &str) -> Result<()>;

    /// Appends a comment to an entry.
    async fn create_comment(&self, number: u64, body: &str) -> Result<()>;
}

/// Issue as returned by the GitHub REST API.
#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    body: Option<String>,
    /// Present when the "issue" is actually a pull request
    pull_request: Option<serde_json::Value>,
}

/// Issue store over the GitHub REST API.
pub struct GithubStore {
    client: reqwest::Client,
    api_url: String,
    repo: String,
}

impl GithubStore {
    /// Creates a store for `owner/name` using the given access token.
    pub fn new(token: &str, repo: impl Into<String>) -> Result<Self> {
        Self::with_api_url(token, repo, DEFAULT_API_URL)
    }

    /// Creates a store against a custom API base URL (for testing).
    pub fn with_api_url(
        token: &str,
        repo: impl Into<String>,
        api_url: impl Into<String>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("coolpc-watch"));

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("Access token is not a valid header value")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build GitHub client")?;

        Ok(Self { client, api_url: api_url.into(), repo: repo.into() })
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/issues", self.api_url, self.repo)
    }
}

#[async_trait]
impl IssueStore for GithubStore {
    async fn list_open(&self) -> Result<Vec<Entry>> {
        info!("Listing open issues in {}", self.repo);

        let response = self
            .client
            .get(self.issues_url())
            .query(&[("state", "open")])
            .send()
            .await
            .context("Failed to list issues")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Listing issues failed with status: {}", status);
        }

        let issues: Vec<RawIssue> =
            response.json().await.context("Failed to decode issue list")?;

        // The issues endpoint also returns pull requests; drop them.
        let entries: Vec<Entry> = issues
            .into_iter()
            .filter(|issue| issue.pull_request.is_none())
            .map(|issue| Entry::new(issue.number, issue.title, issue.body.unwrap_or_default()))
            .collect();

        debug!("Found {} open entries", entries.len());
        Ok(entries)
    }

    async fn update_body(&self, number: u64, body: &str) -> Result<()> {
        debug!("Updating body of issue #{}", number);

        let response = self
            .client
            .patch(format!("{}/{}", self.issues_url(), number))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .with_context(|| format!("Failed to update issue #{}", number))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Updating issue #{} failed with status: {}", number, status);
        }
        Ok(())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<()> {
        debug!("Commenting on issue #{}", number);

        let response = self
            .client
            .post(format!("{}/{}/comments", self.issues_url(), number))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .with_context(|| format!("Failed to comment on issue #{}", number))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Commenting on issue #{} failed with status: {}", number, status);
        }
        Ok(())
    }
}
