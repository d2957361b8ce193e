//! Phrase variant selection for transform tokens.

use tracing::debug;

use crate::engine::RuleBook;
use crate::error::{RuleError, compute_suggestions};
use crate::params::split_params;
use crate::types::{LanguageId, Options, Token, Value};

impl RuleBook {
    /// Select the option whose rule matches `value` in `language`.
    ///
    /// Options are tried in declaration order and the first matching rule
    /// wins; the `other` option is never evaluated as a rule and is returned
    /// only when nothing else matched.
    ///
    /// # Errors
    ///
    /// - [`RuleError::InvalidTransformForm`] if `options` is empty
    /// - [`RuleError::UnknownRuleName`] if an option keyword has no rule in
    ///   `language`
    /// - [`RuleError::NoRuleMatched`] if nothing matched and there is no
    ///   `other` option
    /// - Any evaluation error of a tried rule
    pub fn transform(
        &self,
        token: &str,
        value: &Value,
        options: &Options,
        language: &LanguageId,
    ) -> Result<String, RuleError> {
        if options.is_empty() {
            return Err(RuleError::InvalidTransformForm {
                token: token.to_string(),
            });
        }

        for (keyword, form) in options {
            if *keyword == self.other_keyword {
                continue;
            }
            let rule = self
                .rule_for_keyword_and_language(keyword, language)?
                .ok_or_else(|| RuleError::UnknownRuleName {
                    token: token.to_string(),
                    keyword: keyword.clone(),
                    language: language.clone(),
                })?;
            if rule.evaluate(value)? {
                debug!(token, %language, keyword = keyword.as_str(), "transform matched rule");
                return Ok(form.clone());
            }
        }

        if let Some(fallback) = options.get(&self.other_keyword) {
            debug!(token, %language, "transform fell back to other");
            return Ok(fallback.clone());
        }

        Err(RuleError::NoRuleMatched {
            token: token.to_string(),
            language: language.clone(),
            options: options.clone(),
            value: value.to_string(),
        })
    }

    /// Parse label params with the kind registered as `kind`, then
    /// [`transform`](Self::transform).
    pub fn transform_with_params<S: AsRef<str>>(
        &self,
        kind: &str,
        token: &str,
        value: &Value,
        params: &[S],
        language: &LanguageId,
    ) -> Result<String, RuleError> {
        if params.is_empty() {
            return Err(RuleError::InvalidTransformForm {
                token: token.to_string(),
            });
        }

        let rule_kind = self.registry.resolve(kind)?;
        if !rule_kind.is_transformable() {
            return Err(RuleError::NotTransformable {
                keyword: kind.to_string(),
            });
        }

        let params: Vec<String> = params.iter().map(|p| p.as_ref().to_string()).collect();
        let options = rule_kind
            .transform_params_to_options(&params)
            .map_err(|source| RuleError::InvalidParams {
                kind: kind.to_string(),
                source,
            })?;
        self.transform(token, value, &options, language)
    }

    /// Transform a token using the first transformable kind it depends on.
    ///
    /// `label` is the params section of the token, e.g. `"message, messages"`
    /// in `{count|| message, messages}`.
    pub fn transform_label(
        &self,
        token: &Token,
        value: &Value,
        label: &str,
        language: &LanguageId,
    ) -> Result<String, RuleError> {
        let Some(kind) = self
            .registry
            .dependent_kinds(token)
            .into_iter()
            .find(|kind| kind.is_transformable())
        else {
            let keyword = token.dependency().unwrap_or(token.suffix()).to_string();
            let available: Vec<String> =
                self.registry.keywords().map(ToString::to_string).collect();
            return Err(RuleError::UnknownRuleKind {
                suggestions: compute_suggestions(&keyword, &available),
                keyword,
            });
        };

        let params = split_params(label).map_err(|source| RuleError::InvalidParams {
            kind: kind.keyword().to_string(),
            source,
        })?;
        self.transform_with_params(kind.keyword(), token.name(), value, &params, language)
    }
}
