//! The mapping and reverse index, kept in step.

use std::collections::HashMap;

use super::index::ValueIndex;

/// Key→value mapping plus its reverse index.
///
/// Every mutation goes through this type so the index always matches the
/// mapping. Cloning it yields a fully independent copy, which is what a
/// transaction snapshot stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    data: HashMap<String, String>,
    index: ValueIndex,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn count(&self, value: &str) -> usize {
        self.index.count(value)
    }

    /// Set `key` to `value`, returning the value it replaced.
    pub fn set(&mut self, key: String, value: String) -> Option<String> {
        self.index.increment(&value);
        let old = self.data.insert(key, value);
        if let Some(old) = &old {
            self.index.decrement(old);
        }
        old
    }

    /// Remove `key`, returning the value it held.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let old = self.data.remove(key)?;
        self.index.decrement(&old);
        Some(old)
    }

    /// Keys holding `value`, sorted ascending.
    pub fn keys_with_value(&self, value: &str) -> Vec<&str> {
        if self.index.count(value) == 0 {
            return Vec::new();
        }
        let mut keys: Vec<&str> = self
            .data
            .iter()
            .filter(|(_, v)| v.as_str() == value)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn key_count(&self) -> usize {
        self.data.len()
    }

    pub fn distinct_values(&self) -> usize {
        self.index.distinct()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check that the index matches the mapping exactly.
    pub fn index_is_consistent(&self) -> bool {
        let mut expected: HashMap<&str, usize> = HashMap::new();
        for value in self.data.values() {
            *expected.entry(value.as_str()).or_default() += 1;
        }
        expected.len() == self.index.distinct()
            && self.index.iter().all(|(v, c)| expected.get(v) == Some(&c))
    }
}
