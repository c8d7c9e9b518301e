//! CSS selectors for the CoolPC evaluation page.
//!
//! The page is one giant form: each component category is a table row
//! holding a `<select>` whose `<optgroup>`s are the subcategories.
//! Update this file when the page structure changes.

use scraper::Selector;
use std::sync::LazyLock;

/// Subcategory group inside a category row.
pub static OPTGROUP: LazyLock<Selector> = LazyLock::new(|| Selector::parse("optgroup").unwrap());

/// Line item inside a subcategory group.
pub static OPTION: LazyLock<Selector> = LazyLock::new(|| Selector::parse("option").unwrap());

/// Subcategory name attribute on the group element.
pub static LABEL_ATTR: &str = "label";

/// Marker attribute for out-of-stock items.
pub static DISABLED_ATTR: &str = "disabled";
