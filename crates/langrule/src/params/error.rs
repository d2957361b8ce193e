//! Label params error types.

use thiserror::Error;

/// An error that occurred while reading label params.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// No params were given.
    #[error("no params given")]
    Empty,

    /// A backslash at the end of the input escapes nothing.
    #[error("dangling escape at column {column}")]
    DanglingEscape { column: usize },

    /// Some params were `keyword: text` pairs and some were bare forms.
    #[error("cannot mix named and positional params")]
    MixedForms,

    /// The same keyword was named twice.
    #[error("duplicate keyword '{keyword}'")]
    DuplicateKeyword { keyword: String },

    /// More positional forms than the rule kind accepts.
    #[error("expected at most {max} forms, got {got}")]
    TooManyForms { max: usize, got: usize },

    /// The rule kind has no positional form.
    #[error("named params required, e.g. 'keyword: text'")]
    NamedFormRequired,
}
