//! Insertion-ordered string set used for guardrails and success criteria.
//!
//! Backed by a `Vec` for order plus a `HashSet` membership index, so ordering
//! never depends on the hashing scheme. Serializes as a plain JSON array;
//! duplicates in incoming arrays are collapsed on deserialization.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered set of strings: first insertion wins, duplicates are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct OrderedSet {
    items: Vec<String>,
    index: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `item` at the end. Returns `false` if it was already present.
    pub fn insert(&mut self, item: impl Into<String>) -> bool {
        let item = item.into();
        if self.index.contains(&item) {
            return false;
        }
        self.index.insert(item.clone());
        self.items.push(item);
        true
    }

    /// Remove `item`, keeping the relative order of the rest.
    pub fn remove(&mut self, item: &str) -> bool {
        if !self.index.remove(item) {
            return false;
        }
        self.items.retain(|i| i != item);
        true
    }

    /// Remove `item` if present, insert it otherwise. Returns whether the
    /// item is present afterwards.
    pub fn toggle(&mut self, item: &str) -> bool {
        if self.remove(item) {
            false
        } else {
            self.insert(item);
            true
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.index.contains(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }
}

impl PartialEq for OrderedSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for OrderedSet {}

impl<S: Into<String>> FromIterator<S> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for OrderedSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl From<Vec<String>> for OrderedSet {
    fn from(items: Vec<String>) -> Self {
        items.into_iter().collect()
    }
}

impl From<OrderedSet> for Vec<String> {
    fn from(set: OrderedSet) -> Self {
        set.items
    }
}

impl<'a> IntoIterator for &'a OrderedSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse_and_order_is_kept() {
        let set: OrderedSet = ["b", "a", "b", "c", "a"].into_iter().collect();
        assert_eq!(set.as_slice(), &["b", "a", "c"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn toggle_removes_then_reinserts_at_end() {
        let mut set: OrderedSet = ["x", "y", "z"].into_iter().collect();
        assert!(!set.toggle("x"));
        assert_eq!(set.as_slice(), &["y", "z"]);
        assert!(set.toggle("x"));
        assert_eq!(set.as_slice(), &["y", "z", "x"]);
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut set: OrderedSet = ["x"].into_iter().collect();
        assert!(!set.remove("nope"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn serializes_as_array_and_dedups_on_parse() {
        let set: OrderedSet = serde_json::from_str(r#"["one","two","one"]"#).unwrap();
        assert_eq!(set.as_slice(), &["one", "two"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["one","two"]"#);
        assert!(set.contains("two"));
    }
}
