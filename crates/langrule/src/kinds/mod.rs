//! Rule kinds: the classification logic a rule's `type` selects.
//!
//! Every kind implements [`RuleKind`]. The trait has no defaults for
//! `dependency`, `evaluate`, `describe` and `transform_params_to_options`,
//! so a kind cannot be registered without them.

mod gender;
mod gender_list;
mod list;
mod number;
mod registry;
mod value;

use std::fmt::{Debug, Formatter, Result as FmtResult};

pub use gender::GenderKind;
pub use gender_list::GenderListKind;
pub use list::ListKind;
pub use number::NumberKind;
pub use registry::RuleKindRegistry;
pub use value::ValueKind;

use crate::error::RuleError;
use crate::params::ParamsError;
use crate::rule::{Condition, Definition};
use crate::types::{Options, Token, Value};

/// A family of rules sharing one evaluation logic.
pub trait RuleKind: Send + Sync {
    /// The axis this kind classifies over, e.g. `"number"` or `"gender"`.
    fn dependency(&self) -> &str;

    /// Identifier used for dispatch and as `type` in sync records.
    fn keyword(&self) -> &str {
        self.dependency()
    }

    /// Label shown when authoring rules.
    fn dependency_label(&self) -> &str {
        self.dependency()
    }

    /// Token suffixes that route to this kind even without a declared
    /// dependency, e.g. `count` for `{message_count}`.
    fn suffixes(&self) -> &[&str] {
        &[]
    }

    /// Whether the kind can be used in transform tokens.
    fn is_transformable(&self) -> bool {
        true
    }

    /// Test `value` against `definition`.
    fn evaluate(&self, definition: &Definition, value: &Value) -> Result<bool, RuleError>;

    /// Describe `definition` for humans.
    fn describe(&self, definition: &Definition) -> Result<String, RuleError>;

    /// Turn label params into options keyed by rule keyword, in declaration
    /// order.
    fn transform_params_to_options(&self, params: &[String]) -> Result<Options, ParamsError>;

    /// Whether this kind applies to `token`.
    fn is_dependent(&self, token: &Token) -> bool {
        token.dependency() == Some(self.dependency()) || self.suffixes().contains(&token.suffix())
    }
}

impl Debug for dyn RuleKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RuleKind")
            .field("keyword", &self.keyword())
            .field("dependency", &self.dependency())
            .finish()
    }
}

/// Parse the condition of `definition` and check that every clause uses one
/// of `parts`.
fn parse_condition(
    kind: &str,
    definition: &Definition,
    parts: &[&str],
) -> Result<Condition, RuleError> {
    let condition = Condition::parse(kind, definition)?;
    if let Some(clause) = condition
        .clauses()
        .find(|clause| !parts.contains(&clause.part.as_str()))
    {
        return Err(RuleError::malformed(
            kind,
            format!(
                "unknown part '{}', expected one of: {}",
                clause.part,
                parts.join(", ")
            ),
        ));
    }
    Ok(condition)
}

/// Check that every value of every clause is one of `allowed`.
fn check_values(kind: &str, condition: &Condition, allowed: &[&str]) -> Result<(), RuleError> {
    for clause in condition.clauses() {
        if let Some(value) = clause
            .values
            .iter()
            .find(|value| !allowed.contains(&value.as_str()))
        {
            return Err(RuleError::malformed(
                kind,
                format!(
                    "unknown value '{value}', expected one of: {}",
                    allowed.join(", ")
                ),
            ));
        }
    }
    Ok(())
}

/// Zip positional forms with `keys`, rejecting extra forms.
///
/// Missing trailing forms are filled by `fill`, which receives the forms
/// given so far.
fn positional_options(
    keys: &[&str],
    forms: Vec<String>,
    fill: impl Fn(&[String], usize) -> String,
) -> Result<Options, ParamsError> {
    if forms.len() > keys.len() {
        return Err(ParamsError::TooManyForms {
            max: keys.len(),
            got: forms.len(),
        });
    }
    let mut filled = forms;
    while filled.len() < keys.len() {
        let next = fill(&filled, filled.len());
        filled.push(next);
    }
    Ok(keys
        .iter()
        .map(|key| (*key).to_string())
        .zip(filled)
        .collect())
}
