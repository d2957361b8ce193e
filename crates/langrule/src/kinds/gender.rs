//! Gender rules: `is`, `is_not` over `male`, `female`, `neutral`, `unknown`.

use crate::error::RuleError;
use crate::kinds::{RuleKind, check_values, parse_condition, positional_options};
use crate::params::{LabelParams, ParamsError, parse_label_params};
use crate::rule::Definition;
use crate::types::{Gender, Options, Value};

const KEYWORD: &str = "gender";
const PARTS: &[&str] = &["is", "is_not"];
const VALUES: &[&str] = &["male", "female", "neutral", "unknown"];
const SUFFIXES: &[&str] = &["user", "actor", "target", "profile"];

/// Agreement with the grammatical gender of a person.
///
/// Positional label form: `[male, female(, unknown)]`. A missing `female`
/// form repeats `male`; a missing `unknown` form reads `"male/female"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderKind;

impl RuleKind for GenderKind {
    fn dependency(&self) -> &str {
        KEYWORD
    }

    fn suffixes(&self) -> &[&str] {
        SUFFIXES
    }

    fn evaluate(&self, definition: &Definition, value: &Value) -> Result<bool, RuleError> {
        let condition = parse_condition(KEYWORD, definition, PARTS)?;
        check_values(KEYWORD, &condition, VALUES)?;
        let gender = value
            .gender()
            .ok_or_else(|| RuleError::incompatible(KEYWORD, value))?;
        condition.evaluate(|clause| {
            let listed = clause.values.iter().any(|v| v == gender.as_str());
            Ok(if clause.part == "is" { listed } else { !listed })
        })
    }

    fn describe(&self, definition: &Definition) -> Result<String, RuleError> {
        let condition = parse_condition(KEYWORD, definition, PARTS)?;
        check_values(KEYWORD, &condition, VALUES)?;
        Ok(condition.describe())
    }

    fn transform_params_to_options(&self, params: &[String]) -> Result<Options, ParamsError> {
        match parse_label_params(params)? {
            LabelParams::Named(options) => Ok(options),
            LabelParams::Positional(forms) => positional_options(
                &[
                    Gender::Male.as_str(),
                    Gender::Female.as_str(),
                    Gender::Unknown.as_str(),
                ],
                forms,
                |given, position| match (position, given) {
                    (2, [male, female]) if male != female => format!("{male}/{female}"),
                    _ => given.first().cloned().unwrap_or_default(),
                },
            ),
        }
    }
}
