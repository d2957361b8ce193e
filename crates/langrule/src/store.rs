//! Rule persistence.
//!
//! The engine reads and writes rules only through [`RuleStore`]. Durable
//! backends live outside this crate; [`MemoryRuleStore`] keeps rules in
//! process for tests and embedded use.

use std::collections::BTreeMap;
use std::error::Error as StdError;

use parking_lot::RwLock;
use thiserror::Error;

use crate::rule::{NewRule, Rule};
use crate::types::{LanguageId, RuleId};

/// Errors reported by a rule store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend cannot be reached.
    #[error("rule store unavailable: {message}")]
    Unavailable { message: String },

    /// Any other backend failure.
    #[error("rule store failure: {source}")]
    Backend {
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Storage for rules.
pub trait RuleStore: Send + Sync {
    fn find_by_id(&self, id: RuleId) -> Result<Option<Rule>, StoreError>;

    /// All rules of a language, in id order.
    fn find_all(&self, language: &LanguageId) -> Result<Vec<Rule>, StoreError>;

    /// The rule named `keyword` in `language`; the lowest id wins if several
    /// share the name.
    fn find_one(&self, language: &LanguageId, keyword: &str) -> Result<Option<Rule>, StoreError>;

    /// Persist a new rule and return it with its assigned id.
    fn create(&self, rule: NewRule) -> Result<Rule, StoreError>;

    /// Overwrite a persisted rule. Returns `false` if it does not exist.
    fn save(&self, rule: &Rule) -> Result<bool, StoreError>;

    /// Remove a rule. Returns `false` if it did not exist.
    fn delete(&self, rule: &Rule) -> Result<bool, StoreError>;
}

/// An in-process [`RuleStore`] with sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct MemoryRuleStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Debug, Default)]
struct MemoryStoreInner {
    last_id: u64,
    rules: BTreeMap<RuleId, Rule>,
}

impl MemoryRuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rules.
    pub fn len(&self) -> usize {
        self.inner.read().rules.len()
    }

    /// Whether the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.inner.read().rules.is_empty()
    }
}

impl RuleStore for MemoryRuleStore {
    fn find_by_id(&self, id: RuleId) -> Result<Option<Rule>, StoreError> {
        Ok(self.inner.read().rules.get(&id).cloned())
    }

    fn find_all(&self, language: &LanguageId) -> Result<Vec<Rule>, StoreError> {
        Ok(self
            .inner
            .read()
            .rules
            .values()
            .filter(|rule| rule.language() == language)
            .cloned()
            .collect())
    }

    fn find_one(&self, language: &LanguageId, keyword: &str) -> Result<Option<Rule>, StoreError> {
        Ok(self
            .inner
            .read()
            .rules
            .values()
            .find(|rule| rule.language() == language && rule.keyword() == keyword)
            .cloned())
    }

    fn create(&self, rule: NewRule) -> Result<Rule, StoreError> {
        let mut inner = self.inner.write();
        inner.last_id += 1;
        let rule = rule.into_rule(RuleId::new(inner.last_id));
        inner.rules.insert(rule.id(), rule.clone());
        Ok(rule)
    }

    fn save(&self, rule: &Rule) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        match inner.rules.get_mut(&rule.id()) {
            Some(stored) => {
                *stored = rule.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, rule: &Rule) -> Result<bool, StoreError> {
        Ok(self.inner.write().rules.remove(&rule.id()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::kinds::{NumberKind, RuleKind};
    use crate::rule::Definition;

    fn new_rule(language: &str, keyword: &str) -> NewRule {
        NewRule::builder()
            .language(language)
            .keyword(keyword)
            .definition(Definition::new().with("part1", "is").with("value1", "1"))
            .kind(Arc::new(NumberKind) as Arc<dyn RuleKind>)
            .build()
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let store = MemoryRuleStore::new();
        let first = store.create(new_rule("en", "one")).unwrap();
        let second = store.create(new_rule("en", "other")).unwrap();
        assert_eq!(first.id(), RuleId::new(1));
        assert_eq!(second.id(), RuleId::new(2));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn find_by_language_and_keyword() {
        let store = MemoryRuleStore::new();
        store.create(new_rule("en", "one")).unwrap();
        let ru = store.create(new_rule("ru", "one")).unwrap();

        let found = store.find_one(&"ru".into(), "one").unwrap().unwrap();
        assert_eq!(found.id(), ru.id());
        assert!(store.find_one(&"ru".into(), "few").unwrap().is_none());
        assert_eq!(store.find_all(&"en".into()).unwrap().len(), 1);
    }

    #[test]
    fn save_and_delete_report_existence() {
        let store = MemoryRuleStore::new();
        let mut rule = store.create(new_rule("en", "one")).unwrap();
        rule.set_keyword("single");
        assert!(store.save(&rule).unwrap());
        assert_eq!(
            store.find_by_id(rule.id()).unwrap().unwrap().keyword(),
            "single"
        );

        assert!(store.delete(&rule).unwrap());
        assert!(!store.delete(&rule).unwrap());
        assert!(!store.save(&rule).unwrap());
        assert!(store.is_empty());
    }
}
