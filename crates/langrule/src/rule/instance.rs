use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use bon::Builder;

use crate::error::RuleError;
use crate::kinds::RuleKind;
use crate::rule::Definition;
use crate::types::{LanguageId, RuleId, TranslatorId, Value};

/// A persisted, language-scoped rule.
///
/// The kind is fixed at creation.
/// `keyword` is the rule's own name, the key transform options refer to
/// (e.g. `few` or `ends_in`).
#[derive(Clone)]
pub struct Rule {
    id: RuleId,
    language: LanguageId,
    translator: Option<TranslatorId>,
    keyword: String,
    definition: Definition,
    kind: Arc<dyn RuleKind>,
}

impl Rule {
    /// The store-assigned id.
    pub fn id(&self) -> RuleId {
        self.id
    }

    /// The language this rule belongs to.
    pub fn language(&self) -> &LanguageId {
        &self.language
    }

    /// The translator who last changed this rule.
    pub fn translator(&self) -> Option<TranslatorId> {
        self.translator
    }

    /// The rule's name in transform options.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// The conditions this rule encodes.
    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// The keyword of this rule's kind (`type` on the wire).
    pub fn kind_keyword(&self) -> &str {
        self.kind.keyword()
    }

    /// The kind that interprets the definition.
    pub fn kind(&self) -> &Arc<dyn RuleKind> {
        &self.kind
    }

    /// Rename the rule.
    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    /// Replace the definition.
    pub fn set_definition(&mut self, definition: Definition) {
        self.definition = definition;
    }

    /// Edit the definition in place.
    pub fn definition_mut(&mut self) -> &mut Definition {
        &mut self.definition
    }

    pub(crate) fn set_translator(&mut self, translator: TranslatorId) {
        self.translator = Some(translator);
    }

    /// Test `value` against this rule. Never mutates the rule.
    pub fn evaluate(&self, value: &Value) -> Result<bool, RuleError> {
        self.kind.evaluate(&self.definition, value)
    }

    /// Human-readable description, e.g. "ends in 2, 3, 4".
    pub fn describe(&self) -> Result<String, RuleError> {
        self.kind.describe(&self.definition)
    }

    /// Whether `other` differs from this rule in any editable field.
    ///
    /// Identity and translator are not content.
    pub fn content_differs(&self, other: &Rule) -> bool {
        self.language != other.language
            || self.keyword != other.keyword
            || self.kind_keyword() != other.kind_keyword()
            || self.definition != other.definition
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.translator == other.translator
            && !self.content_differs(other)
    }
}

impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("language", &self.language)
            .field("translator", &self.translator)
            .field("kind", &self.kind_keyword())
            .field("keyword", &self.keyword)
            .field("definition", &self.definition)
            .finish()
    }
}

/// The attributes of a rule that has not been persisted yet.
///
/// Rule stores turn a `NewRule` into a [`Rule`] by assigning an id.
#[derive(Clone, Builder)]
#[builder(on(String, into))]
pub struct NewRule {
    #[builder(into)]
    pub language: LanguageId,
    pub translator: Option<TranslatorId>,
    pub keyword: String,
    #[builder(default)]
    pub definition: Definition,
    pub kind: Arc<dyn RuleKind>,
}

impl NewRule {
    /// Attach the store-assigned id.
    pub fn into_rule(self, id: RuleId) -> Rule {
        Rule {
            id,
            language: self.language,
            translator: self.translator,
            keyword: self.keyword,
            definition: self.definition,
            kind: self.kind,
        }
    }
}

impl Debug for NewRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NewRule")
            .field("language", &self.language)
            .field("translator", &self.translator)
            .field("kind", &self.kind.keyword())
            .field("keyword", &self.keyword)
            .field("definition", &self.definition)
            .finish()
    }
}
