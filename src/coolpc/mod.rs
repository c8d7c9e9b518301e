//! CoolPC-specific modules for fetching, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{FileSource, HttpSource, PageSource};
pub use models::{Criteria, InvalidCriteria, Item};
