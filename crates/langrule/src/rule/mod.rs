//! Rules: language-scoped predicates over runtime values.
//!
//! A [`Rule`] pairs a parsed [`Definition`] with the [`RuleKind`] that knows
//! how to interpret it.
//!
//! [`RuleKind`]: crate::kinds::RuleKind

mod condition;
mod definition;
mod instance;
mod values;

pub use condition::{Clause, Condition, Operator};
pub use definition::{Definition, DefinitionValue};
pub use instance::{NewRule, Rule};
pub use values::{humanize_values, sanitize_values};
