//! Data models for CoolPC price-list items and watch criteria.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;

/// Title pattern encoding a criteria pair as `<category>~~~<subcategory>`.
static CRITERIA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*)~~~(.*)$").unwrap());

/// A single price-list line item.
///
/// The price is kept as the raw digit string from the page; items compare
/// by structural equality on both fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Part name as it appears on the page
    pub name: String,
    /// Price in TWD, digits only
    pub price: String,
}

impl Item {
    /// Creates a new item.
    pub fn new(name: impl Into<String>, price: impl Into<String>) -> Self {
        Self { name: name.into(), price: price.into() }
    }
}

/// The (category, subcategory) pair selecting a slice of the price page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// Top-level category, e.g. "SSD固態硬碟"
    pub category: String,
    /// Option-group label within the category, e.g. "M.2"
    pub subcategory: String,
}

impl Criteria {
    /// Creates a new criteria pair.
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self { category: category.into(), subcategory: subcategory.into() }
    }

    /// Renders the criteria back into its title encoding.
    pub fn to_title(&self) -> String {
        format!("{}~~~{}", self.category, self.subcategory)
    }
}

/// Error returned when a title does not encode a criteria pair.
#[derive(Debug, thiserror::Error)]
#[error("title does not match `<category>~~~<subcategory>`: {0:?}")]
pub struct InvalidCriteria(pub String);

impl FromStr for Criteria {
    type Err = InvalidCriteria;

    /// Parses the `~~~`-delimited title encoding. The delimiter match is
    /// greedy, so the last `~~~` in the title splits the pair.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = CRITERIA_RE.captures(s).ok_or_else(|| InvalidCriteria(s.to_string()))?;
        Ok(Criteria::new(&caps[1], &caps[2]))
    }
}

impl std::fmt::Display for Criteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.category, self.subcategory)
    }
}
