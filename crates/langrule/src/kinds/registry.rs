//! Rule kind registry for resolving `type` keywords to implementations.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{RuleError, compute_suggestions};
use crate::kinds::{GenderKind, GenderListKind, ListKind, NumberKind, RuleKind, ValueKind};
use crate::types::Token;

/// A registry of rule kinds keyed by keyword.
///
/// The registry is built once at startup and shared by the engine and the
/// sync codec. Kinds keep their registration order, which is the order used
/// for [`dependent_kinds`](Self::dependent_kinds) and
/// [`kind_options`](Self::kind_options).
///
/// # Example
///
/// ```
/// use langrule::{RuleKindRegistry, Token};
///
/// let registry = RuleKindRegistry::with_builtin_kinds();
/// let kinds = registry.dependent_kinds(&Token::new("message_count"));
/// assert_eq!(kinds.len(), 1);
/// assert_eq!(kinds[0].keyword(), "number");
/// ```
#[derive(Default)]
pub struct RuleKindRegistry {
    kinds: IndexMap<String, Arc<dyn RuleKind>>,
}

impl RuleKindRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the `number`, `gender`, `gender_list`,
    /// `list` and `value` kinds.
    pub fn with_builtin_kinds() -> Self {
        let builtin: [Arc<dyn RuleKind>; 5] = [
            Arc::new(NumberKind),
            Arc::new(GenderKind),
            Arc::new(GenderListKind),
            Arc::new(ListKind),
            Arc::new(ValueKind),
        ];
        let kinds = builtin
            .into_iter()
            .map(|kind| (kind.keyword().to_string(), kind))
            .collect();
        Self { kinds }
    }

    /// Register a kind under its keyword.
    ///
    /// Returns an error if another kind already uses the keyword.
    pub fn register(&mut self, kind: Arc<dyn RuleKind>) -> Result<(), RuleError> {
        let keyword = kind.keyword().to_string();
        if self.kinds.contains_key(&keyword) {
            return Err(RuleError::DuplicateRuleKind { keyword });
        }
        self.kinds.insert(keyword, kind);
        Ok(())
    }

    /// Get the kind for a keyword, if registered.
    pub fn get(&self, keyword: &str) -> Option<&Arc<dyn RuleKind>> {
        self.kinds.get(keyword)
    }

    /// Resolve a keyword to its kind.
    ///
    /// Returns [`RuleError::UnknownRuleKind`] with spelling suggestions if no
    /// kind is registered for it.
    pub fn resolve(&self, keyword: &str) -> Result<Arc<dyn RuleKind>, RuleError> {
        self.kinds
            .get(keyword)
            .cloned()
            .ok_or_else(|| RuleError::UnknownRuleKind {
                keyword: keyword.to_string(),
                suggestions: compute_suggestions(keyword, &self.keywords_owned()),
            })
    }

    /// Check if a kind is registered for a keyword.
    pub fn contains(&self, keyword: &str) -> bool {
        self.kinds.contains_key(keyword)
    }

    /// Registered keywords in registration order.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Registered kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &Arc<dyn RuleKind>> {
        self.kinds.values()
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind is registered.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Kinds that apply to `token`, by declared dependency or suffix.
    pub fn dependent_kinds(&self, token: &Token) -> Vec<&Arc<dyn RuleKind>> {
        self.kinds
            .values()
            .filter(|kind| kind.is_dependent(token))
            .collect()
    }

    /// `(label, keyword)` pairs for building rule authoring forms.
    pub fn kind_options(&self) -> Vec<(String, String)> {
        self.kinds
            .values()
            .map(|kind| {
                (
                    kind.dependency_label().to_string(),
                    kind.keyword().to_string(),
                )
            })
            .collect()
    }

    fn keywords_owned(&self) -> Vec<String> {
        self.kinds.keys().cloned().collect()
    }
}

impl Debug for RuleKindRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RuleKindRegistry")
            .field("kinds", &self.kinds.keys().collect::<Vec<_>>())
            .finish()
    }
}
