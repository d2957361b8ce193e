use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;
use tracing::debug;

use crate::audit::{AuditLog, TracingAuditLog};
use crate::cache::{MemoryRuleCache, RuleCache, cache_key};
use crate::error::RuleError;
use crate::kinds::RuleKindRegistry;
use crate::rule::Rule;
use crate::store::{MemoryRuleStore, RuleStore};
use crate::types::{LanguageId, RuleId};

/// Entry point for evaluating, transforming and managing language rules.
///
/// Every collaborator has an in-memory default, so a bare
/// `RuleBook::builder().build()` works out of the box.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use langrule::{Definition, MemoryRuleStore, RuleBook, RuleDraft, TranslatorId, options};
///
/// let book = RuleBook::builder()
///     .store(Arc::new(MemoryRuleStore::new()))
///     .build();
///
/// let editor = TranslatorId::new(1);
/// book.create_with_log(
///     RuleDraft::builder()
///         .language("en")
///         .kind("number")
///         .keyword("one")
///         .definition(Definition::new().with("part1", "is").with("value1", "1"))
///         .build(),
///     editor,
/// )
/// .unwrap();
///
/// let options = options! { "one" => "{count} message", "other" => "{count} messages" };
/// let form = book.transform("count", &5.into(), &options, &"en".into()).unwrap();
/// assert_eq!(form, "{count} messages");
/// ```
#[derive(Builder)]
pub struct RuleBook {
    /// Rule kinds available for dispatch.
    #[builder(default = Arc::new(RuleKindRegistry::with_builtin_kinds()))]
    pub(crate) registry: Arc<RuleKindRegistry>,

    /// Where rules are persisted.
    #[builder(default = Arc::new(MemoryRuleStore::new()) as Arc<dyn RuleStore>)]
    pub(crate) store: Arc<dyn RuleStore>,

    /// Read-through cache for [`RuleBook::fetch_by_id`].
    #[builder(default = Arc::new(MemoryRuleCache::new()) as Arc<dyn RuleCache>)]
    pub(crate) cache: Arc<dyn RuleCache>,

    /// Receives create/update/delete records.
    #[builder(default = Arc::new(TracingAuditLog) as Arc<dyn AuditLog>)]
    pub(crate) audit: Arc<dyn AuditLog>,

    /// The option keyword used as fallback when no rule matches.
    #[builder(into, default = "other".to_string())]
    pub(crate) other_keyword: String,
}

impl Default for RuleBook {
    fn default() -> Self {
        RuleBook::builder().build()
    }
}

impl RuleBook {
    /// Create a rule book with built-in kinds and in-memory collaborators.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule kinds this book dispatches to.
    pub fn registry(&self) -> &RuleKindRegistry {
        &self.registry
    }

    /// The fallback option keyword, `"other"` by default.
    pub fn other_keyword(&self) -> &str {
        &self.other_keyword
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The rule named `keyword` in `language`.
    pub fn rule_for_keyword_and_language(
        &self,
        keyword: &str,
        language: &LanguageId,
    ) -> Result<Option<Rule>, RuleError> {
        Ok(self.store.find_one(language, keyword)?)
    }

    /// All rules of `language`.
    pub fn rules_for_language(&self, language: &LanguageId) -> Result<Vec<Rule>, RuleError> {
        Ok(self.store.find_all(language)?)
    }

    /// `(label, keyword)` pairs of the registered kinds.
    pub fn kind_options(&self) -> Vec<(String, String)> {
        self.registry.kind_options()
    }

    // =========================================================================
    // Cache
    // =========================================================================

    /// Look a rule up by id, reading through the cache.
    pub fn fetch_by_id(&self, id: RuleId) -> Result<Option<Rule>, RuleError> {
        let key = cache_key(id);
        if let Some(rule) = self.cache.get(&key) {
            debug!(%id, "rule cache hit");
            return Ok(Some(rule));
        }

        debug!(%id, "rule cache miss");
        let rule = self.store.find_by_id(id)?;
        if let Some(rule) = &rule {
            self.cache.put(&key, rule.clone());
        }
        Ok(rule)
    }

    /// Drop the cached copy of a rule.
    pub fn invalidate(&self, id: RuleId) {
        self.cache.delete(&cache_key(id));
    }
}

impl Debug for RuleBook {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RuleBook")
            .field("registry", &self.registry)
            .field("other_keyword", &self.other_keyword)
            .finish_non_exhaustive()
    }
}
