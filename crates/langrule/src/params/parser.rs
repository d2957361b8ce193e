//! Label params parser using winnow.
//!
//! Handles:
//! - Splitting on commas, with `\,` for a literal comma
//! - Named params `keyword: text`, with `\:` for a literal colon in bare forms
//! - Whitespace trimming around params, keywords and text

use winnow::combinator::{alt, preceded, repeat, separated};
use winnow::prelude::*;
use winnow::token::{any, none_of, take_while};

use super::error::ParamsError;
use crate::types::Options;

/// Params classified by form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelParams {
    /// `keyword: text` pairs in declaration order.
    Named(Options),
    /// Bare forms in declaration order; the rule kind assigns keywords.
    Positional(Vec<String>),
}

/// Split a label section into raw params on unescaped commas.
///
/// Escapes are kept so that [`parse_label_params`] can still tell an escaped
/// colon from a keyword separator. Blank params are dropped.
///
/// ```
/// use langrule::params::split_params;
///
/// let params = split_params(r"one: message, other: messages\, sent").unwrap();
/// assert_eq!(params, vec!["one: message", r"other: messages\, sent"]);
/// ```
pub fn split_params(input: &str) -> Result<Vec<String>, ParamsError> {
    let mut remaining = input;
    let parsed = param_list(&mut remaining);
    match parsed {
        Ok(params) if remaining.is_empty() => Ok(params
            .into_iter()
            .map(|param| param.trim().to_string())
            .filter(|param| !param.is_empty())
            .collect()),
        _ => Err(ParamsError::DanglingEscape {
            column: input[..input.len() - remaining.len()].chars().count() + 1,
        }),
    }
}

/// Classify params as named or positional.
///
/// ```
/// use langrule::params::{LabelParams, parse_label_params};
///
/// let LabelParams::Named(options) = parse_label_params(&["one: file", "other: files"]).unwrap()
/// else {
///     panic!("expected named params");
/// };
/// assert_eq!(options["other"], "files");
///
/// let positional = parse_label_params(&["he", "she"]).unwrap();
/// assert_eq!(
///     positional,
///     LabelParams::Positional(vec!["he".to_string(), "she".to_string()])
/// );
/// ```
pub fn parse_label_params<S: AsRef<str>>(params: &[S]) -> Result<LabelParams, ParamsError> {
    if params.is_empty() {
        return Err(ParamsError::Empty);
    }

    let mut named = Options::new();
    let mut positional = Vec::new();
    for raw in params {
        let raw = raw.as_ref();
        if let Ok((keyword, text)) = named_param.parse(raw) {
            if named.contains_key(&keyword) {
                return Err(ParamsError::DuplicateKeyword { keyword });
            }
            named.insert(keyword, text);
        } else {
            let text = unescaped_text.parse(raw).unwrap_or_else(|_| raw.to_string());
            positional.push(text.trim().to_string());
        }
    }

    match (named.is_empty(), positional.is_empty()) {
        (false, false) => Err(ParamsError::MixedForms),
        (true, _) => Ok(LabelParams::Positional(positional)),
        (false, true) => Ok(LabelParams::Named(named)),
    }
}

/// Split and classify a whole label section.
pub fn parse_label(section: &str) -> Result<LabelParams, ParamsError> {
    parse_label_params(&split_params(section)?)
}

/// Parse comma-separated raw params.
fn param_list(input: &mut &str) -> ModalResult<Vec<String>> {
    separated(1.., raw_param, ',').parse_next(input)
}

/// Parse one raw param, leaving escape pairs in place.
fn raw_param(input: &mut &str) -> ModalResult<String> {
    repeat(0.., alt((escape_pair, none_of(['\\', ',']).take())))
        .fold(String::new, |mut acc, piece: &str| {
            acc.push_str(piece);
            acc
        })
        .parse_next(input)
}

/// Parse a backslash and the character it escapes.
fn escape_pair<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    ('\\', any).take().parse_next(input)
}

/// Parse `keyword: text`.
fn named_param(input: &mut &str) -> ModalResult<(String, String)> {
    let _ = ws(input)?;
    let keyword = take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)?;
    let _ = ws(input)?;
    ':'.parse_next(input)?;
    let text = unescaped_text(input)?;
    Ok((keyword.to_string(), text.trim().to_string()))
}

/// Parse the remaining text, resolving escape pairs.
fn unescaped_text(input: &mut &str) -> ModalResult<String> {
    repeat(0.., alt((preceded('\\', any), any))).parse_next(input)
}

/// Parse optional whitespace.
fn ws<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(0.., char::is_whitespace).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_and_drops_blank_params() {
        assert_eq!(
            split_params(" person ,, people ").unwrap(),
            vec!["person", "people"]
        );
    }

    #[test]
    fn split_rejects_dangling_escape() {
        assert_eq!(
            split_params("person\\"),
            Err(ParamsError::DanglingEscape { column: 7 })
        );
    }

    #[test]
    fn escaped_colon_stays_positional() {
        let params = split_params(r"at 5\:00, at 6\:00").unwrap();
        assert_eq!(
            parse_label_params(&params).unwrap(),
            LabelParams::Positional(vec!["at 5:00".to_string(), "at 6:00".to_string()])
        );
    }

    #[test]
    fn escaped_comma_survives_into_text() {
        let LabelParams::Named(options) = parse_label(r"one: a\, b, other: c").unwrap() else {
            panic!("expected named params");
        };
        assert_eq!(options["one"], "a, b");
        assert_eq!(options["other"], "c");
    }

    #[test]
    fn named_params_keep_declaration_order() {
        let LabelParams::Named(options) =
            parse_label("ends_in: {count} сообщения, other: {count} сообщений").unwrap()
        else {
            panic!("expected named params");
        };
        let keys: Vec<&str> = options.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["ends_in", "other"]);
    }

    #[test]
    fn mixed_forms_are_rejected() {
        assert_eq!(
            parse_label_params(&["one: file", "files"]),
            Err(ParamsError::MixedForms)
        );
    }

    #[test]
    fn duplicate_keyword_is_rejected() {
        assert_eq!(
            parse_label_params(&["one: a", "one: b"]),
            Err(ParamsError::DuplicateKeyword {
                keyword: "one".to_string()
            })
        );
    }

    #[test]
    fn empty_params_are_rejected() {
        let params: [&str; 0] = [];
        assert_eq!(parse_label_params(&params), Err(ParamsError::Empty));
    }
}
