//! Keyed rule cache.
//!
//! The cache is never a source of truth: the engine reads through it and
//! deletes entries after every rule mutation.

use dashmap::DashMap;

use crate::rule::Rule;
use crate::types::RuleId;

/// Cache key for a rule id: `language_rule_[<id>]`.
pub fn cache_key(id: RuleId) -> String {
    format!("language_rule_[{id}]")
}

/// A cache of rules keyed by [`cache_key`].
pub trait RuleCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Rule>;
    fn put(&self, key: &str, rule: Rule);
    fn delete(&self, key: &str);
}

/// An in-process [`RuleCache`] without expiry.
#[derive(Debug, Default)]
pub struct MemoryRuleCache {
    entries: DashMap<String, Rule>,
}

impl MemoryRuleCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a key is cached.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached rules.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RuleCache for MemoryRuleCache {
    fn get(&self, key: &str) -> Option<Rule> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: &str, rule: Rule) {
        self.entries.insert(key.to_string(), rule);
    }

    fn delete(&self, key: &str) {
        self.entries.remove(key);
    }
}
