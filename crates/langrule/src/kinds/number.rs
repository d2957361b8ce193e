//! Numeric rules: `is`, `is_not`, `ends_in`, `does_not_end_in`.
//!
//! Values are integers or inclusive ranges written `a..b`. For `ends_in`, a
//! range matches when any of its members is a decimal suffix of the value.

use crate::error::RuleError;
use crate::kinds::{RuleKind, parse_condition, positional_options};
use crate::params::{LabelParams, ParamsError, parse_label_params};
use crate::rule::{Clause, Definition};
use crate::types::{Options, Value};

const KEYWORD: &str = "number";
const PARTS: &[&str] = &["is", "is_not", "ends_in", "does_not_end_in"];
const SUFFIXES: &[&str] = &["count", "num", "age", "hours", "minutes", "years", "seconds"];

/// Pluralization by numeric value.
///
/// Positional label form: `[one(, many)]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberKind;

impl RuleKind for NumberKind {
    fn dependency(&self) -> &str {
        KEYWORD
    }

    fn suffixes(&self) -> &[&str] {
        SUFFIXES
    }

    fn evaluate(&self, definition: &Definition, value: &Value) -> Result<bool, RuleError> {
        let condition = parse_condition(KEYWORD, definition, PARTS)?;
        let n = value
            .as_number()
            .ok_or_else(|| RuleError::incompatible(KEYWORD, value))?;
        condition.evaluate(|clause| test_clause(clause, n))
    }

    fn describe(&self, definition: &Definition) -> Result<String, RuleError> {
        Ok(parse_condition(KEYWORD, definition, PARTS)?.describe())
    }

    fn transform_params_to_options(&self, params: &[String]) -> Result<Options, ParamsError> {
        match parse_label_params(params)? {
            LabelParams::Named(options) => Ok(options),
            LabelParams::Positional(forms) => {
                positional_options(&["one", "many"], forms, |given, _| {
                    given.first().cloned().unwrap_or_default()
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Exact(i64),
    Range(i64, i64),
}

impl Pattern {
    fn parse(raw: &str) -> Result<Self, RuleError> {
        let number = |text: &str| {
            text.trim().parse::<i64>().map_err(|_| {
                RuleError::malformed(KEYWORD, format!("'{raw}' is not a number or range"))
            })
        };
        match raw.split_once("..") {
            Some((start, end)) => {
                let (start, end) = (number(start)?, number(end)?);
                if start > end {
                    return Err(RuleError::malformed(
                        KEYWORD,
                        format!("range '{raw}' is empty"),
                    ));
                }
                Ok(Pattern::Range(start, end))
            }
            None => Ok(Pattern::Exact(number(raw)?)),
        }
    }

    fn contains(self, n: i64) -> bool {
        match self {
            Pattern::Exact(value) => value == n,
            Pattern::Range(start, end) => (start..=end).contains(&n),
        }
    }

    /// Whether the decimal digits of `n` end with this pattern.
    fn ends(self, n: i64) -> bool {
        let digits = n.unsigned_abs();
        match self {
            Pattern::Exact(value) => {
                digits.to_string().ends_with(&value.unsigned_abs().to_string())
            }
            Pattern::Range(start, end) => {
                let (low, high) = magnitudes(start, end);
                let width = high.to_string().len();
                (1..=width).any(|places| {
                    let tail = 10u64
                        .checked_pow(places as u32)
                        .map_or(digits, |modulus| digits % modulus);
                    (low..=high).contains(&tail)
                })
            }
        }
    }
}

/// The magnitudes covered by the range `start..=end`, as an inclusive range.
fn magnitudes(start: i64, end: i64) -> (u64, u64) {
    if start >= 0 {
        (start.unsigned_abs(), end.unsigned_abs())
    } else if end <= 0 {
        (end.unsigned_abs(), start.unsigned_abs())
    } else {
        (0, start.unsigned_abs().max(end.unsigned_abs()))
    }
}

fn test_clause(clause: &Clause, n: i64) -> Result<bool, RuleError> {
    let patterns = clause
        .values
        .iter()
        .map(|raw| Pattern::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match clause.part.as_str() {
        "is" => patterns.iter().any(|p| p.contains(n)),
        "is_not" => !patterns.iter().any(|p| p.contains(n)),
        "ends_in" => patterns.iter().any(|p| p.ends(n)),
        _ => !patterns.iter().any(|p| p.ends(n)),
    })
}
