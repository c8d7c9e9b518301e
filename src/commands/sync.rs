//! Sync command: reconcile tracked issues with the current price page.

use crate::config::Config;
use crate::coolpc::{parser, Criteria, FileSource, HttpSource, PageSource};
use crate::diff::Changes;
use crate::format;
use crate::tracker::{Entry, GithubStore, IssueStore};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Outcome counts of one synchronization run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Entries rewritten because their item list changed
    pub updated: usize,
    /// Entries whose item list matched the stored table
    pub unchanged: usize,
    /// Entries whose title does not encode a criteria pair
    pub skipped: usize,
    /// Entries that errored and were carried past
    pub failed: usize,
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} updated, {} unchanged, {} skipped, {} failed",
            self.updated, self.unchanged, self.skipped, self.failed
        )
    }
}

/// Executes a synchronization pass over all open tracked issues.
pub struct SyncCommand {
    config: Config,
}

impl SyncCommand {
    /// Creates a new sync command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the sync against GitHub and the configured page source.
    pub async fn execute(&self) -> Result<SyncReport> {
        let token = self
            .config
            .token
            .as_deref()
            .context("GitHub token required: pass TOKEN or set GITHUB_TOKEN")?;

        let store = GithubStore::with_api_url(token, &self.config.repo, &self.config.api_url)
            .context("Failed to create GitHub client")?;

        match &self.config.local_path {
            Some(path) => self.execute_with(&store, &FileSource::new(path)).await,
            None => self.execute_with(&store, &HttpSource::new(&self.config.source_url)?).await,
        }
    }

    /// Runs the sync with provided collaborators (for testing).
    ///
    /// A failure while processing one entry is logged and does not stop the
    /// run; only a failure to list the entries aborts.
    pub async fn execute_with(
        &self,
        store: &impl IssueStore,
        source: &impl PageSource,
    ) -> Result<SyncReport> {
        let entries = store.list_open().await.context("Failed to list open entries")?;
        info!("Processing {} open entries", entries.len());

        let mut report = SyncReport::default();

        for entry in entries {
            let criteria: Criteria = match entry.title.parse() {
                Ok(criteria) => criteria,
                Err(_) => {
                    debug!("Skipping issue #{}: title {:?} is not a criteria", entry.number, entry.title);
                    report.skipped += 1;
                    continue;
                }
            };

            match self.process_entry(store, source, &entry, &criteria).await {
                Ok(true) => {
                    info!("Updated issue #{} {}", entry.number, entry.title);
                    report.updated += 1;
                }
                Ok(false) => {
                    info!("No update for issue #{} {}", entry.number, entry.title);
                    report.unchanged += 1;
                }
                Err(e) => {
                    warn!("Failed to process issue #{}: {:#}", entry.number, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Fetches, diffs, and writes back a single entry.
    ///
    /// Returns true if the entry was rewritten. An empty diff leaves the
    /// entry untouched.
    async fn process_entry(
        &self,
        store: &impl IssueStore,
        source: &impl PageSource,
        entry: &Entry,
        criteria: &Criteria,
    ) -> Result<bool> {
        let html = source.fetch().await?;
        let current = parser::parse(&html, criteria);
        let previous = format::parse_table(&entry.body);

        let changes = Changes::between(&current, &previous);
        if changes.is_empty() {
            return Ok(false);
        }

        debug!(
            "Issue #{}: {} new, {} missing",
            entry.number,
            changes.added.len(),
            changes.removed.len()
        );

        store.update_body(entry.number, &format::render(&current)).await?;
        store.create_comment(entry.number, &format::change_note(&changes)).await?;
        Ok(true)
    }
}
