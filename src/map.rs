//! Ordered map type for document mappings.
//!
//! [`DocumentMap`] wraps an [`IndexMap`] so that marshalled records keep their
//! declaration order when written out, while lookups stay order-insensitive.
//!
//! ## Examples
//!
//! ```rust
//! use recmarshal::{Document, DocumentMap};
//!
//! let mut map = DocumentMap::new();
//! map.insert("name".to_string(), Document::from("Alice"));
//! map.insert("age".to_string(), Document::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use crate::Document;
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to document values.
///
/// # Examples
///
/// ```rust
/// use recmarshal::{Document, DocumentMap};
///
/// let mut map = DocumentMap::new();
/// map.insert("first".to_string(), Document::from(1));
/// map.insert("second".to_string(), Document::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMap(IndexMap<String, Document>);

impl DocumentMap {
    #[must_use]
    pub fn new() -> Self {
        DocumentMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DocumentMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and the key keeps
    /// its original position.
    pub fn insert(&mut self, key: String, value: Document) -> Option<Document> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Document> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Document> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Document> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Document> {
        self.0.iter()
    }
}

impl Default for DocumentMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<HashMap<String, Document>> for DocumentMap {
    fn from(map: HashMap<String, Document>) -> Self {
        DocumentMap(map.into_iter().collect())
    }
}

impl From<DocumentMap> for HashMap<String, Document> {
    fn from(map: DocumentMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for DocumentMap {
    type Item = (String, Document);
    type IntoIter = indexmap::map::IntoIter<String, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentMap {
    type Item = (&'a String, &'a Document);
    type IntoIter = indexmap::map::Iter<'a, String, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Document)> for DocumentMap {
    fn from_iter<T: IntoIterator<Item = (String, Document)>>(iter: T) -> Self {
        DocumentMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_keeps_order() {
        let mut map: DocumentMap = vec![
            ("a".to_string(), Document::from(1)),
            ("b".to_string(), Document::from(2)),
            ("c".to_string(), Document::from(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.remove("b"), Some(Document::from(2)));
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let left: DocumentMap = vec![
            ("a".to_string(), Document::from(1)),
            ("b".to_string(), Document::from(2)),
        ]
        .into_iter()
        .collect();
        let right: DocumentMap = vec![
            ("b".to_string(), Document::from(2)),
            ("a".to_string(), Document::from(1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(left, right);
    }
}
