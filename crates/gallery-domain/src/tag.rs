//! Free-form tags attached to country records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A tag is an opaque label; equality is its only identity.
pub type Tag = String;

/// A deduplicated set of tags.
///
/// Iteration is sorted so that rendering and serialization are stable;
/// insertion order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeSet<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag. Returns false if it was already present.
    pub fn insert(&mut self, tag: impl Into<Tag>) -> bool {
        self.0.insert(tag.into())
    }

    /// Remove a tag. Returns false if it was absent.
    pub fn remove(&mut self, tag: &str) -> bool {
        self.0.remove(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Copy with `tag` added.
    pub fn with(&self, tag: impl Into<Tag>) -> Self {
        let mut next = self.clone();
        next.insert(tag);
        next
    }

    /// Copy with `tag` removed.
    pub fn without(&self, tag: &str) -> Self {
        let mut next = self.clone();
        next.remove(tag);
        next
    }
}

impl<T: Into<Tag>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a Tag;
    type IntoIter = std::collections::btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_collapse() {
        let tags: TagSet = ["visited", "wishlist", "visited"].into_iter().collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("visited"));
    }

    #[test]
    fn insert_reports_novelty() {
        let mut tags = TagSet::new();
        assert!(tags.insert("red"));
        assert!(!tags.insert("red"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut tags: TagSet = ["a"].into_iter().collect();
        assert!(!tags.remove("b"));
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn with_and_without_leave_original() {
        let tags: TagSet = ["a"].into_iter().collect();
        let added = tags.with("b");
        let removed = tags.without("a");
        assert_eq!(tags.len(), 1);
        assert_eq!(added.len(), 2);
        assert!(removed.is_empty());
    }

    #[test]
    fn serializes_as_sorted_array() {
        let tags: TagSet = ["zeta", "alpha"].into_iter().collect();
        assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["alpha","zeta"]"#);

        let back: TagSet = serde_json::from_str(r#"["b","a","b"]"#).unwrap();
        assert_eq!(back.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
