//! Data models for tracked issues.

use serde::{Deserialize, Serialize};

/// An open tracked issue: criteria-encoded title plus the last-known table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Issue number
    pub number: u64,
    /// Issue title, expected to encode a criteria pair
    pub title: String,
    /// Issue body holding the last-known item table (empty if none)
    pub body: String,
}

impl Entry {
    /// Creates a new entry.
    pub fn new(number: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { number, title: title.into(), body: body.into() }
    }
}
