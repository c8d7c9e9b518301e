//! Check command: print the current items for a criteria, read-only.

use crate::config::Config;
use crate::coolpc::{parser, Criteria, FileSource, HttpSource, PageSource};
use crate::format;
use anyhow::{Context, Result};
use tracing::info;

/// Fetches and renders the current item list without touching any issue.
pub struct CheckCommand {
    config: Config,
}

impl CheckCommand {
    /// Creates a new check command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Parses the criteria title and returns the rendered current table.
    pub async fn execute(&self, title: &str) -> Result<String> {
        let criteria: Criteria =
            title.parse().context("Criteria must look like `<category>~~~<subcategory>`")?;

        match &self.config.local_path {
            Some(path) => self.execute_with(&FileSource::new(path), &criteria).await,
            None => self.execute_with(&HttpSource::new(&self.config.source_url)?, &criteria).await,
        }
    }

    /// Runs the check with a provided page source (for testing).
    pub async fn execute_with(
        &self,
        source: &impl PageSource,
        criteria: &Criteria,
    ) -> Result<String> {
        let html = source.fetch().await?;
        let items = parser::parse(&html, criteria);

        info!("Found {} items for {}", items.len(), criteria);
        Ok(format::render(&items))
    }
}
