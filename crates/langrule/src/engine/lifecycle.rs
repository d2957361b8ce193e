//! Rule creation, update and deletion with audit records.
//!
//! Each operation ends by invalidating the rule's cache entry, whether or not
//! the rule content changed.

use bon::Builder;
use tracing::{debug, info, instrument};

use crate::engine::RuleBook;
use crate::error::RuleError;
use crate::rule::{Definition, NewRule, Rule};
use crate::types::{LanguageId, TranslatorId};

/// The attributes an administrator supplies for a new rule.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct RuleDraft {
    #[builder(into)]
    pub language: LanguageId,

    /// Keyword of the rule kind, e.g. `"number"`.
    pub kind: String,

    /// The rule's own name; defaults to the kind keyword.
    pub keyword: Option<String>,

    #[builder(default)]
    pub definition: Definition,
}

impl RuleBook {
    /// Create and persist a rule, recording `translator` as its author.
    ///
    /// Fails with [`RuleError::UnknownRuleKind`] if the draft names an
    /// unregistered kind.
    #[instrument(skip_all, fields(language = %draft.language, kind = %draft.kind, %translator))]
    pub fn create_with_log(
        &self,
        draft: RuleDraft,
        translator: TranslatorId,
    ) -> Result<Rule, RuleError> {
        let kind = self.registry.resolve(&draft.kind)?;
        let keyword = draft.keyword.unwrap_or_else(|| kind.keyword().to_string());
        let rule = self.store.create(
            NewRule::builder()
                .language(draft.language)
                .translator(translator)
                .keyword(keyword)
                .definition(draft.definition)
                .kind(kind)
                .build(),
        )?;
        self.audit.record_created(translator, &rule);
        self.invalidate(rule.id());
        info!(rule_id = %rule.id(), keyword = rule.keyword(), "language rule created");
        Ok(rule)
    }

    /// Persist changes to `rule`.
    ///
    /// If the rule differs from its stored copy, `translator` becomes its
    /// translator and an update is audited. Returns `false` if the rule is no
    /// longer stored.
    #[instrument(skip_all, fields(rule_id = %rule.id(), %translator))]
    pub fn save_with_log(
        &self,
        rule: &mut Rule,
        translator: TranslatorId,
    ) -> Result<bool, RuleError> {
        let Some(stored) = self.store.find_by_id(rule.id())? else {
            self.invalidate(rule.id());
            debug!("language rule is not stored, nothing to save");
            return Ok(false);
        };

        let changed = stored.content_differs(rule);
        if changed {
            rule.set_translator(translator);
            self.audit.record_updated(translator, rule);
        }
        let saved = self.store.save(rule)?;
        self.invalidate(rule.id());
        if changed {
            info!(saved, "language rule updated");
        } else {
            debug!(saved, "language rule saved without changes");
        }
        Ok(saved)
    }

    /// Delete `rule`, auditing the deletion first.
    #[instrument(skip_all, fields(rule_id = %rule.id(), %translator))]
    pub fn destroy_with_log(
        &self,
        rule: &Rule,
        translator: TranslatorId,
    ) -> Result<bool, RuleError> {
        self.audit.record_deleted(translator, rule);
        let deleted = self.store.delete(rule)?;
        self.invalidate(rule.id());
        info!(deleted, "language rule destroyed");
        Ok(deleted)
    }
}
