//! Error types for rule evaluation, transforms and rule lifecycle.

use thiserror::Error;

use crate::params::ParamsError;
use crate::store::StoreError;
use crate::types::{LanguageId, Options};

/// An error raised by the rule engine.
///
/// Every variant is a deterministic configuration or input error; none is
/// retryable. The only variant that wraps a collaborator failure is
/// [`RuleError::Storage`].
#[derive(Debug, Error)]
pub enum RuleError {
    /// No rule kind is registered for a keyword.
    #[error("unknown rule kind '{keyword}'{}", format_suggestions(suggestions))]
    UnknownRuleKind {
        keyword: String,
        suggestions: Vec<String>,
    },

    /// A second kind was registered under an existing keyword.
    #[error("rule kind '{keyword}' is already registered")]
    DuplicateRuleKind { keyword: String },

    /// The kind cannot be used in transform tokens.
    #[error("rule kind '{keyword}' does not support transform tokens")]
    NotTransformable { keyword: String },

    /// A transform token was given no options.
    #[error("invalid form for token '{token}': no options given")]
    InvalidTransformForm { token: String },

    /// An option keyword has no rule in the target language.
    #[error("invalid rule name '{keyword}' for transform token '{token}' in language '{language}'")]
    UnknownRuleName {
        token: String,
        keyword: String,
        language: LanguageId,
    },

    /// No rule matched and no `other` fallback was supplied.
    #[error("no rules matched for transform token '{token}' in language '{language}': {options:?} : {value}")]
    NoRuleMatched {
        token: String,
        language: LanguageId,
        options: Options,
        value: String,
    },

    /// A rule definition cannot be interpreted by its kind.
    #[error("malformed '{kind}' rule definition: {reason}")]
    MalformedDefinition { kind: String, reason: String },

    /// A rule kind was asked to classify a value it does not understand.
    #[error("'{kind}' rule cannot evaluate value '{value}'")]
    IncompatibleValue { kind: String, value: String },

    /// Label params could not be turned into transform options.
    #[error("invalid params for '{kind}' token: {source}")]
    InvalidParams {
        kind: String,
        #[source]
        source: ParamsError,
    },

    /// The rule store failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl RuleError {
    pub(crate) fn malformed(kind: &str, reason: impl Into<String>) -> Self {
        RuleError::MalformedDefinition {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn incompatible(kind: &str, value: &impl ToString) -> Self {
        RuleError::IncompatibleValue {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute "did you mean" suggestions for a misspelled keyword.
///
/// Returns at most three candidates within a Levenshtein distance of 1 (for
/// keys of up to three characters) or 2 (for longer keys), closest first.
pub fn compute_suggestions(target: &str, available: &[String]) -> Vec<String> {
    let max_distance = if target.chars().count() <= 3 { 1 } else { 2 };
    let mut candidates: Vec<(usize, &String)> = available
        .iter()
        .map(|candidate| (strsim::levenshtein(target, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    candidates
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_prefer_closest_keyword() {
        let available = vec![
            "number".to_string(),
            "gender".to_string(),
            "gender_list".to_string(),
        ];
        assert_eq!(compute_suggestions("numbr", &available), vec!["number"]);
        assert_eq!(compute_suggestions("gendr", &available), vec!["gender"]);
        assert!(compute_suggestions("date", &available).is_empty());
    }

    #[test]
    fn unknown_kind_message_lists_suggestions() {
        let err = RuleError::UnknownRuleKind {
            keyword: "numbr".to_string(),
            suggestions: vec!["number".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown rule kind 'numbr'; did you mean: number?"
        );
    }
}
