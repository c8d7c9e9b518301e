//! Markdown table rendering and parsing for issue bodies.

use crate::coolpc::Item;
use crate::diff::Changes;
use regex::Regex;
use std::sync::LazyLock;

/// Table row pattern: `| <name> | <price> |`.
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\| (.+) \| (.+) \|$").unwrap());

/// Renders an item list as a two-column markdown table.
pub fn render(items: &[Item]) -> String {
    let mut lines = vec!["| Name | Price |".to_string(), "| ---- | ----- |".to_string()];
    for item in items {
        lines.push(format!("| {} | {} |", item.name, item.price));
    }
    lines.join("\n")
}

/// Parses a previously rendered table back into its item list.
///
/// The first two lines are the header and separator; anything beyond them
/// that does not look like a row is ignored.
pub fn parse_table(text: &str) -> Vec<Item> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() <= 2 {
        return Vec::new();
    }

    lines[2..]
        .iter()
        .filter_map(|line| ROW_RE.captures(line))
        .map(|caps| Item::new(&caps[1], &caps[2]))
        .collect()
}

/// Builds the comment appended to an issue when its item list changed.
///
/// Each non-empty side of the diff gets its own section with a rendered
/// table, matching the body format.
pub fn change_note(changes: &Changes) -> String {
    let mut sections: Vec<String> = Vec::new();

    if !changes.added.is_empty() {
        sections.push("**New items**:".to_string());
        sections.push(render(&changes.added));
        sections.push(String::new());
    }
    if !changes.removed.is_empty() {
        sections.push("**Missing items**:".to_string());
        sections.push(render(&changes.removed));
        sections.push(String::new());
    }

    sections.join("\n")
}
