//! Rules over lists of people, e.g. `{users}` in "{users} liked your post".

use crate::error::RuleError;
use crate::kinds::{RuleKind, check_values, parse_condition, positional_options};
use crate::params::{LabelParams, ParamsError, parse_label_params};
use crate::rule::Definition;
use crate::types::{Gender, Options, Value};

const KEYWORD: &str = "gender_list";
const PARTS: &[&str] = &["is", "is_not"];
const VALUES: &[&str] = &[
    "one_element",
    "one_male",
    "one_female",
    "one_unknown",
    "at_least_two",
    "all_male",
    "all_female",
];
const SUFFIXES: &[&str] = &["users", "actors", "targets", "profiles"];

/// Agreement with the size and genders of a list of people.
///
/// Positional label form: `[one_element, at_least_two]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenderListKind;

impl RuleKind for GenderListKind {
    fn dependency(&self) -> &str {
        KEYWORD
    }

    fn suffixes(&self) -> &[&str] {
        SUFFIXES
    }

    fn evaluate(&self, definition: &Definition, value: &Value) -> Result<bool, RuleError> {
        let condition = parse_condition(KEYWORD, definition, PARTS)?;
        check_values(KEYWORD, &condition, VALUES)?;
        let genders: Vec<Gender> = match value {
            Value::List(items) => items
                .iter()
                .map(|item| item.gender().unwrap_or_default())
                .collect(),
            Value::Person(person) => vec![person.gender],
            _ => return Err(RuleError::incompatible(KEYWORD, value)),
        };
        condition.evaluate(|clause| {
            let listed = clause.values.iter().any(|v| holds(v, &genders));
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
            LabelParams::Positional(forms) => {
                positional_options(&["one_element", "at_least_two"], forms, |given, _| {
                    given.first().cloned().unwrap_or_default()
                })
            }
        }
    }
}

fn holds(name: &str, genders: &[Gender]) -> bool {
    let single = match genders {
        [only] => Some(*only),
        _ => None,
    };
    match name {
        "one_element" => single.is_some(),
        "one_male" => single == Some(Gender::Male),
        "one_female" => single == Some(Gender::Female),
        "one_unknown" => matches!(single, Some(Gender::Neutral | Gender::Unknown)),
        "at_least_two" => genders.len() >= 2,
        "all_male" => !genders.is_empty() && genders.iter().all(|g| *g == Gender::Male),
        "all_female" => !genders.is_empty() && genders.iter().all(|g| *g == Gender::Female),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Person;

    fn is(values: &str) -> Definition {
        Definition::new().with("part1", "is").with("value1", values)
    }

    fn eval(definition: &Definition, value: Value) -> bool {
        GenderListKind.evaluate(definition, &value).unwrap()
    }

    #[test]
    fn single_person_lists() {
        let one = Value::from(vec![Person::female("Anna")]);
        assert!(eval(&is("one_element"), one.clone()));
        assert!(eval(&is("one_female"), one.clone()));
        assert!(!eval(&is("one_male"), one.clone()));
        assert!(eval(&is("all_female"), one));
    }

    #[test]
    fn unknown_gender_list_members() {
        let one = Value::from(vec![Value::from("Kim")]);
        assert!(eval(&is("one_unknown"), one));
    }

    #[test]
    fn at_least_two_and_all() {
        let pair = Value::from(vec![Person::male("Ivan"), Person::male("Oleg")]);
        assert!(eval(&is("at_least_two"), pair.clone()));
        assert!(eval(&is("all_male"), pair.clone()));
        assert!(!eval(&is("one_element"), pair));

        let mixed = Value::from(vec![Person::male("Ivan"), Person::female("Olga")]);
        assert!(!eval(&is("all_male, all_female"), mixed.clone()));
        let definition = Definition::new()
            .with("part1", "is_not")
            .with("value1", "all_male, all_female");
        assert!(eval(&definition, mixed));
    }

    #[test]
    fn empty_list_matches_nothing() {
        let empty = Value::List(Vec::new());
        for name in VALUES {
            assert!(!eval(&is(name), empty.clone()), "{name}");
        }
    }

    #[test]
    fn plain_numbers_are_incompatible() {
        let err = GenderListKind
            .evaluate(&is("one_element"), &Value::from(2))
            .unwrap_err();
        assert!(matches!(err, RuleError::IncompatibleValue { .. }));
    }
}
