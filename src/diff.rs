//! Diffing of item lists between runs.

use crate::coolpc::Item;

/// Items that appeared or disappeared between two scrapes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    /// Items in the current list but not the previous one, in current order
    pub added: Vec<Item>,
    /// Items in the previous list but not the current one, in previous order
    pub removed: Vec<Item>,
}

impl Changes {
    /// Compares two item lists by structural equality.
    ///
    /// Presence is boolean per distinct (name, price) pair; duplicates in
    /// either list are not counted.
    pub fn between(current: &[Item], previous: &[Item]) -> Self {
        Self {
            added: current.iter().filter(|item| !previous.contains(item)).cloned().collect(),
            removed: previous.iter().filter(|item| !current.contains(item)).cloned().collect(),
        }
    }

    /// Returns true if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
