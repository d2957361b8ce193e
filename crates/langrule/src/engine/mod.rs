//! The rule engine facade.
//!
//! [`RuleBook`] ties a [`RuleKindRegistry`](crate::RuleKindRegistry) to the
//! store, cache and audit collaborators. It owns no mutable state of its own:
//! every operation is a function of its inputs and what the collaborators
//! hold.

mod book;
mod lifecycle;
mod transform;

pub use book::RuleBook;
pub use lifecycle::RuleDraft;
