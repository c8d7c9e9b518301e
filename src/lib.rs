//! coolpc-watch - CoolPC parts-pricing watcher
//!
//! Scrapes the CoolPC evaluation page, extracts the line items matching
//! criteria encoded in GitHub issue titles, and syncs appeared/disappeared
//! items back into the issues.

pub mod commands;
pub mod config;
pub mod coolpc;
pub mod diff;
pub mod format;
pub mod tracker;

pub use config::Config;
pub use coolpc::models::{Criteria, Item};
pub use diff::Changes;
pub use tracker::Entry;
