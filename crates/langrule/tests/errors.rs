//! Tests for error types and error message formatting.

use insta::assert_snapshot;
use langrule::{
    Definition, GenderKind, LanguageId, NumberKind, ParamsError, Person, RuleError, RuleKind,
    StoreError, Value, compute_suggestions, options,
};
use std::error::Error;

#[test]
fn compute_suggestions_finds_similar_keywords() {
    let available = vec![
        "number".to_string(),
        "gender".to_string(),
        "gender_list".to_string(),
        "list".to_string(),
        "value".to_string(),
    ];

    assert_eq!(compute_suggestions("nubmer", &available), vec!["number"]);
    assert_eq!(compute_suggestions("lst", &available), vec!["list"]);
    assert!(compute_suggestions("date", &available).is_empty());
}

#[test]
fn unknown_rule_kind_message() {
    let err = RuleError::UnknownRuleKind {
        keyword: "nuber".to_string(),
        suggestions: vec!["number".to_string()],
    };
    assert_snapshot!(err.to_string(), @"unknown rule kind 'nuber'; did you mean: number?");

    let err = RuleError::UnknownRuleKind {
        keyword: "date".to_string(),
        suggestions: vec![],
    };
    assert_snapshot!(err.to_string(), @"unknown rule kind 'date'");
}

#[test]
fn transform_error_messages() {
    let err = RuleError::InvalidTransformForm {
        token: "count".to_string(),
    };
    assert_snapshot!(err.to_string(), @"invalid form for token 'count': no options given");

    let err = RuleError::UnknownRuleName {
        token: "count".to_string(),
        keyword: "few".to_string(),
        language: LanguageId::from("ru"),
    };
    assert_snapshot!(
        err.to_string(),
        @"invalid rule name 'few' for transform token 'count' in language 'ru'"
    );

    let err = RuleError::NoRuleMatched {
        token: "count".to_string(),
        language: LanguageId::from("en"),
        options: options! { "one" => "message" },
        value: "5".to_string(),
    };
    assert_snapshot!(
        err.to_string(),
        @r#"no rules matched for transform token 'count' in language 'en': {"one": "message"} : 5"#
    );
}

#[test]
fn malformed_definitions_are_reported() {
    let missing_operator = Definition::new()
        .with("multipart", true)
        .with("part1", "is")
        .with("value1", "1")
        .with("part2", "is")
        .with("value2", "2");
    let err = NumberKind
        .evaluate(&missing_operator, &Value::from(1))
        .unwrap_err();
    assert!(matches!(err, RuleError::MalformedDefinition { ref kind, .. } if kind == "number"));

    let unknown_part = Definition::new().with("part1", "between").with("value1", "1");
    let err = NumberKind.evaluate(&unknown_part, &Value::from(1)).unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"malformed 'number' rule definition: unknown part 'between', expected one of: is, is_not, ends_in, does_not_end_in"
    );

    let unknown_value = Definition::new().with("part1", "is").with("value1", "other");
    let err = GenderKind
        .evaluate(&unknown_value, &Person::male("Ivan").into())
        .unwrap_err();
    assert_snapshot!(
        err.to_string(),
        @"malformed 'gender' rule definition: unknown value 'other', expected one of: male, female, neutral, unknown"
    );
}

#[test]
fn incompatible_value_message() {
    let definition = Definition::new().with("part1", "is").with("value1", "1");
    let err = NumberKind
        .evaluate(&definition, &Value::from("lots"))
        .unwrap_err();
    assert_snapshot!(err.to_string(), @"'number' rule cannot evaluate value 'lots'");
}

#[test]
fn params_errors_keep_their_source() {
    let err = RuleError::InvalidParams {
        kind: "number".to_string(),
        source: ParamsError::TooManyForms { max: 2, got: 3 },
    };
    assert_snapshot!(
        err.to_string(),
        @"invalid params for 'number' token: expected at most 2 forms, got 3"
    );
    assert_eq!(
        err.source().map(ToString::to_string),
        Some("expected at most 2 forms, got 3".to_string())
    );
}

#[test]
fn storage_errors_are_transparent() {
    let err = RuleError::from(StoreError::Unavailable {
        message: "connection refused".to_string(),
    });
    assert_snapshot!(err.to_string(), @"rule store unavailable: connection refused");
}
