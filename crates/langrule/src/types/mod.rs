mod ids;
mod person;
mod token;
mod value;

use indexmap::IndexMap;

pub use ids::{LanguageId, RuleId, TranslatorId};
pub use person::{Gender, Person};
pub use token::Token;
pub use value::Value;

/// Ordered mapping from rule keyword to the phrase variant it selects.
///
/// Declaration order is significant: the transform engine evaluates rules in
/// this order and the first match wins.
pub type Options = IndexMap<String, String>;
