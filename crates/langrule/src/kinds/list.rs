//! List size rules.

use crate::error::RuleError;
use crate::kinds::{RuleKind, check_values, parse_condition, positional_options};
use crate::params::{LabelParams, ParamsError, parse_label_params};
use crate::rule::Definition;
use crate::types::{Options, Value};

const KEYWORD: &str = "list";
const PARTS: &[&str] = &["is", "is_not"];
const VALUES: &[&str] = &["one_element", "at_least_two_elements"];
const SUFFIXES: &[&str] = &["list", "items"];

/// Agreement with the number of elements in a list.
///
/// Positional label form: `[one_element, at_least_two_elements]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListKind;

impl RuleKind for ListKind {
    fn dependency(&self) -> &str {
        KEYWORD
    }

    fn suffixes(&self) -> &[&str] {
        SUFFIXES
    }

    fn evaluate(&self, definition: &Definition, value: &Value) -> Result<bool, RuleError> {
        let condition = parse_condition(KEYWORD, definition, PARTS)?;
        check_values(KEYWORD, &condition, VALUES)?;
        let len = value
            .as_list()
            .map(<[Value]>::len)
            .ok_or_else(|| RuleError::incompatible(KEYWORD, value))?;
        condition.evaluate(|clause| {
            let listed = clause.values.iter().any(|v| match v.as_str() {
                "one_element" => len == 1,
                _ => len >= 2,
            });
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
                &["one_element", "at_least_two_elements"],
                forms,
                |given, _| given.first().cloned().unwrap_or_default(),
            ),
        }
    }
}
