//! Parser for the label params of transform tokens.
//!
//! A transform token carries its phrase forms after a pipe, e.g.
//! `{count|| message, messages}` or `{count|| one: message, other: messages}`.
//! This module splits that section into params and classifies them as
//! positional forms or `keyword: text` pairs. Rule kinds then map the result
//! to transform options.

mod error;
mod parser;

pub use error::ParamsError;
pub use parser::{LabelParams, parse_label, parse_label_params, split_params};
