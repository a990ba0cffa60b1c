//! Bounded least-recently-used cache for compiled search patterns.

use std::collections::{HashMap, VecDeque};

/// Maps a normalized search word to a value, holding at most `capacity`
/// entries. Inserting into a full cache evicts the least recently used key.
#[derive(Debug)]
pub struct PatternCache<V> {
    capacity: usize,
    entries: HashMap<String, V>,
    /// Front is least recently used.
    order: VecDeque<String>,
}

impl<V: Clone> PatternCache<V> {
    /// Create a cache. A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up `key`, marking it as most recently used.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let value = self.entries.get(key)?.clone();
        self.touch(key);
        Some(value)
    }

    /// Insert or replace `key`, evicting the oldest entry when full.
    pub fn insert(&mut self, key: String, value: V) {
        if self.entries.contains_key(&key) {
            self.touch(&key);
            self.entries.insert(key, value);
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}
