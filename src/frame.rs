//! Keyed storage for finalized fields.
//!
//! Ingestion produces a [`DataFrame`] with one entry per surviving data
//! column. The frame offers two distinctly named access paths: an
//! auto-inserting mutable one ([`DataFrame::get_or_insert`]) and a strict
//! read-only one ([`DataFrame::get`]) that fails instead of inserting.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{IngestError, IngestResult};

/// In-memory mapping from field key to field value.
///
/// Keys are unique and iteration order is unspecified. `V` is usually a
/// [`crate::grid::TimeVaryingGrid`], but the container itself is generic.
#[derive(Debug, Clone)]
pub struct DataFrame<K, V> {
    storage: HashMap<K, V>,
}

// Not derived: HashMap equality wants K: Eq + Hash, not K: PartialEq.
impl<K: Eq + Hash, V: PartialEq> PartialEq for DataFrame<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl<K, V> Default for DataFrame<K, V> {
    fn default() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }
}

impl<K, V> DataFrame<K, V> {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields in the frame.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the frame holds no fields.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterate field keys in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.storage.keys()
    }

    /// Iterate `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.storage.iter()
    }
}

impl<K: Eq + Hash, V> DataFrame<K, V> {
    /// Returns `true` iff `key` is present. No side effect.
    pub fn contains(&self, key: &K) -> bool {
        self.storage.contains_key(key)
    }

    /// Returns the value for `key`, inserting a default-constructed one first
    /// if the key is absent.
    pub fn get_or_insert(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.storage.entry(key).or_default()
    }

    /// Read-only access to the value for `key`.
    ///
    /// Fails with [`IngestError::FieldNotFound`] if the key is absent; never
    /// inserts.
    pub fn get(&self, key: &K) -> IngestResult<&V>
    where
        K: fmt::Display,
    {
        self.storage
            .get(key)
            .ok_or_else(|| IngestError::FieldNotFound {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::DataFrame;

    #[test]
    fn contains_is_false_until_a_default_is_inserted() {
        let mut frame: DataFrame<String, Vec<f64>> = DataFrame::new();
        assert!(!frame.contains(&"wind".to_string()));

        let slot = frame.get_or_insert("wind".to_string());
        assert!(slot.is_empty());

        assert!(frame.contains(&"wind".to_string()));
        assert_eq!(frame.len(), 1);
    }

    #[test]
    fn get_or_insert_returns_the_existing_entry() {
        let mut frame: DataFrame<String, Vec<f64>> = DataFrame::new();
        frame.get_or_insert("temp".to_string()).push(21.5);
        frame.get_or_insert("temp".to_string()).push(22.0);

        assert_eq!(frame.len(), 1);
        assert_eq!(frame.get(&"temp".to_string()).unwrap(), &vec![21.5, 22.0]);
    }

    #[test]
    fn frames_with_the_same_contents_compare_equal() {
        let mut left: DataFrame<String, Vec<f64>> = DataFrame::new();
        left.get_or_insert("temp".to_string()).push(21.5);
        let mut right: DataFrame<String, Vec<f64>> = DataFrame::new();
        right.get_or_insert("temp".to_string()).push(21.5);

        assert_eq!(left, right);

        right.get_or_insert("wind".to_string()).push(1.0);
        assert_ne!(left, right);
    }

    #[test]
    fn get_fails_on_a_missing_key_and_never_inserts() {
        let frame: DataFrame<String, Vec<f64>> = DataFrame::new();
        let err = frame.get(&"temp".to_string()).unwrap_err();
        assert!(err.to_string().contains("no field named 'temp'"));
        assert!(frame.is_empty());
    }
}
