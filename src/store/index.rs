//! Value→count reverse index.

use std::collections::HashMap;

/// Counts how many keys currently hold each value.
///
/// Reads of an untracked value return zero. A value whose count drops to
/// zero is removed, so the index never holds zero entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueIndex {
    counts: HashMap<String, usize>,
}

impl ValueIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys holding `value`.
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Record one more key holding `value`.
    pub fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    /// Record one fewer key holding `value`, returning the new count.
    pub fn decrement(&mut self, value: &str) -> usize {
        let Some(count) = self.counts.get_mut(value) else {
            return 0;
        };
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.remove(value);
        }
        remaining
    }

    /// Number of distinct values held by at least one key.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Iterate over `(value, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(v, c)| (v.as_str(), *c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_value_reads_zero() {
        let index = ValueIndex::new();
        assert_eq!(index.count("neverused"), 0);
        assert_eq!(index.distinct(), 0);
    }

    #[test]
    fn test_increment_decrement() {
        let mut index = ValueIndex::new();
        index.increment("10");
        index.increment("10");
        index.increment("20");
        assert_eq!(index.count("10"), 2);
        assert_eq!(index.distinct(), 2);

        assert_eq!(index.decrement("10"), 1);
        assert_eq!(index.decrement("10"), 0);
        assert_eq!(index.count("10"), 0);
    }

    #[test]
    fn test_zero_counts_are_dropped() {
        let mut index = ValueIndex::new();
        index.increment("x");
        index.decrement("x");
        assert_eq!(index.distinct(), 0);
        assert!(index.iter().all(|(_, c)| c > 0));
    }
}
