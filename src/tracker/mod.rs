//! Issue-tracker store holding the durable state between runs.

pub mod client;
pub mod models;

pub use client::{GithubStore, IssueStore};
pub use models::Entry;
