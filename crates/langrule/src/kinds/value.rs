//! Text value rules: equality, prefixes and suffixes.

use crate::error::RuleError;
use crate::kinds::{RuleKind, parse_condition};
use crate::params::{LabelParams, ParamsError, parse_label_params};
use crate::rule::Definition;
use crate::types::{Options, Value};

const KEYWORD: &str = "value";
const PARTS: &[&str] = &[
    "is",
    "is_not",
    "starts_with",
    "does_not_start_with",
    "ends_in",
    "does_not_end_in",
];

/// Agreement with the text of a value, e.g. elision before a vowel.
///
/// Has no positional label form; options must be named.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueKind;

impl RuleKind for ValueKind {
    fn dependency(&self) -> &str {
        KEYWORD
    }

    fn evaluate(&self, definition: &Definition, value: &Value) -> Result<bool, RuleError> {
        let condition = parse_condition(KEYWORD, definition, PARTS)?;
        let text = match value {
            Value::List(_) => return Err(RuleError::incompatible(KEYWORD, value)),
            other => other.to_string(),
        };
        condition.evaluate(|clause| {
            let any = |test: fn(&str, &str) -> bool| clause.values.iter().any(|v| test(&text, v));
            Ok(match clause.part.as_str() {
                "is" => any(|text, v| text == v),
                "is_not" => !any(|text, v| text == v),
                "starts_with" => any(|text, v| text.starts_with(v)),
                "does_not_start_with" => !any(|text, v| text.starts_with(v)),
                "ends_in" => any(|text, v| text.ends_with(v)),
                _ => !any(|text, v| text.ends_with(v)),
            })
        })
    }

    fn describe(&self, definition: &Definition) -> Result<String, RuleError> {
        Ok(parse_condition(KEYWORD, definition, PARTS)?.describe())
    }

    fn transform_params_to_options(&self, params: &[String]) -> Result<Options, ParamsError> {
        match parse_label_params(params)? {
            LabelParams::Named(options) => Ok(options),
            LabelParams::Positional(_) => Err(ParamsError::NamedFormRequired),
        }
    }
}
