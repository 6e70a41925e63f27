//! Style cache keyed by the selected text
//!
//! Avoids asking the host for a new visual style every time the same
//! text is highlighted again. Unbounded by default; an optional capacity
//! turns it into an LRU.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::style::StyleHandle;

/// Cache key: the exact selected text
///
/// Keys must differ whenever the text differs, so nothing shorter than
/// the full content (length, truncated hash) is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey(String);

impl StyleKey {
    pub fn new(selected: &str) -> Self {
        Self(selected.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mapping from selected text to allocated style
pub struct StyleCache {
    entries: LruCache<StyleKey, StyleHandle>,
}

impl StyleCache {
    /// Create a cache; `None` means no eviction
    pub fn new(capacity: Option<usize>) -> Self {
        let entries = match capacity.and_then(NonZeroUsize::new) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self { entries }
    }

    /// Look up a style, marking it most recently used
    pub fn get(&mut self, key: &StyleKey) -> Option<StyleHandle> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &StyleKey) -> bool {
        self.entries.contains(key)
    }

    /// Insert a style for a key that is not cached yet.
    ///
    /// Returns the entry evicted to make room, if any. The caller owns
    /// the evicted handle and must release it.
    pub fn insert(&mut self, key: StyleKey, handle: StyleHandle) -> Option<(StyleKey, StyleHandle)> {
        debug_assert!(!self.entries.contains(&key));
        self.entries.push(key, handle)
    }

    /// Change the capacity, returning entries evicted by shrinking
    pub fn set_capacity(&mut self, capacity: Option<usize>) -> Vec<(StyleKey, StyleHandle)> {
        let cap = capacity.and_then(NonZeroUsize::new).unwrap_or(NonZeroUsize::MAX);

        let mut evicted = Vec::new();
        while self.entries.len() > cap.get() {
            match self.entries.pop_lru() {
                Some(entry) => evicted.push(entry),
                None => break,
            }
        }
        self.entries.resize(cap);
        evicted
    }

    /// All cached style handles
    pub fn handles(&self) -> impl Iterator<Item = StyleHandle> + '_ {
        self.entries.iter().map(|(_, handle)| *handle)
    }

    /// Remove every entry, returning the handles for release
    pub fn drain(&mut self) -> Vec<StyleHandle> {
        let handles = self.handles().collect();
        self.entries.clear();
        handles
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::new(None)
    }
}
