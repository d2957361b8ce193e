//! Portable rule records for exchanging rules between installations.
//!
//! A record names its rule kind by keyword and carries the definition as a
//! JSON object:
//!
//! ```json
//! {"token": "count", "type": "number", "keyword": "one",
//!  "definition": {"multipart": false, "part1": "is", "value1": "1"}}
//! ```
//!
//! Import is tolerant. Records that are partial or that name an unregistered
//! kind are skipped without failing the rest of a batch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};
use tracing::{debug, info, instrument, warn};

use crate::engine::RuleBook;
use crate::error::RuleError;
use crate::rule::{Definition, DefinitionValue, NewRule, Rule};
use crate::types::{LanguageId, TranslatorId};

/// A rule in its portable, token-scoped form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRecord {
    pub token: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub definition: Definition,
}

impl Rule {
    /// The token-scoped record for this rule.
    pub fn to_sync_record(&self, token: &str) -> SyncRecord {
        SyncRecord {
            token: token.to_string(),
            kind: self.kind_keyword().to_string(),
            keyword: Some(self.keyword().to_string()),
            definition: self.definition().clone(),
        }
    }

    /// Export this rule as JSON.
    ///
    /// With a token, the result is a full [`SyncRecord`]. Without one, it is
    /// the definition merged with the rule keyword, the form used inside
    /// [`RuleBook::export_language`].
    pub fn to_portable(&self, token: Option<&str>) -> JsonValue {
        let definition = definition_to_json(self.definition());
        match token {
            Some(token) => json!({
                "token": token,
                "type": self.kind_keyword(),
                "keyword": self.keyword(),
                "definition": definition,
            }),
            None => {
                let mut bare = definition;
                bare.insert("keyword".to_string(), json!(self.keyword()));
                JsonValue::Object(bare)
            }
        }
    }
}

fn definition_to_json(definition: &Definition) -> Map<String, JsonValue> {
    definition
        .iter()
        .map(|(key, value)| {
            let value = match value {
                DefinitionValue::Flag(flag) => JsonValue::Bool(*flag),
                DefinitionValue::Text(text) => JsonValue::String(text.clone()),
            };
            (key.to_string(), value)
        })
        .collect()
}

impl RuleBook {
    /// Import one JSON record into `language`.
    ///
    /// Returns `Ok(None)` for records that are partial or name an unregistered
    /// kind. If a rule of the same kind and identical definition already
    /// exists in `language`, it is returned instead of creating a duplicate.
    #[instrument(skip_all, fields(%language, %translator))]
    pub fn import_sync_record(
        &self,
        language: &LanguageId,
        translator: TranslatorId,
        record: &JsonValue,
    ) -> Result<Option<Rule>, RuleError> {
        let record = match SyncRecord::deserialize(record) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping partial sync record");
                return Ok(None);
            }
        };
        self.import_record(language, translator, &record)
    }

    /// Import an already decoded record. See
    /// [`import_sync_record`](Self::import_sync_record).
    pub fn import_record(
        &self,
        language: &LanguageId,
        translator: TranslatorId,
        record: &SyncRecord,
    ) -> Result<Option<Rule>, RuleError> {
        if record.token.is_empty() || record.kind.is_empty() {
            warn!("skipping sync record without token or type");
            return Ok(None);
        }
        let Some(kind) = self.registry.get(&record.kind).cloned() else {
            warn!(
                kind = %record.kind,
                token = %record.token,
                "skipping sync record with unsupported rule type"
            );
            return Ok(None);
        };

        let existing = self.store.find_all(language)?.into_iter().find(|rule| {
            rule.kind_keyword() == kind.keyword() && *rule.definition() == record.definition
        });
        if let Some(rule) = existing {
            debug!(rule_id = %rule.id(), "sync record matches existing rule");
            return Ok(Some(rule));
        }

        let keyword = record
            .keyword
            .clone()
            .unwrap_or_else(|| kind.keyword().to_string());
        let rule = self.store.create(
            NewRule::builder()
                .language(language.clone())
                .translator(translator)
                .keyword(keyword)
                .definition(record.definition.clone())
                .kind(kind)
                .build(),
        )?;
        self.invalidate(rule.id());
        info!(rule_id = %rule.id(), kind = rule.kind_keyword(), "language rule imported");
        Ok(Some(rule))
    }

    /// Import every record of a batch, skipping the ones
    /// [`import_sync_record`](Self::import_sync_record) skips.
    ///
    /// Storage failures abort the batch.
    pub fn import_sync_batch(
        &self,
        language: &LanguageId,
        translator: TranslatorId,
        records: &[JsonValue],
    ) -> Result<Vec<Rule>, RuleError> {
        let mut imported = Vec::with_capacity(records.len());
        for record in records {
            if let Some(rule) = self.import_sync_record(language, translator, record)? {
                imported.push(rule);
            }
        }
        Ok(imported)
    }

    /// Export all rules of `kind` in `language` as
    /// `{"type": kind, "rules": [...]}`.
    pub fn export_language(
        &self,
        kind: &str,
        language: &LanguageId,
    ) -> Result<JsonValue, RuleError> {
        let kind = self.registry.resolve(kind)?;
        let rules: Vec<JsonValue> = self
            .rules_for_language(language)?
            .iter()
            .filter(|rule| rule.kind_keyword() == kind.keyword())
            .map(|rule| rule.to_portable(None))
            .collect();
        Ok(json!({
            "type": kind.keyword(),
            "rules": rules,
        }))
    }
}
