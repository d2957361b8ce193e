pub mod audit;
pub mod cache;
pub mod engine;
pub mod error;
pub mod kinds;
pub mod params;
pub mod rule;
pub mod store;
pub mod sync;
pub mod types;

pub use audit::{AuditAction, AuditEvent, AuditLog, MemoryAuditLog, TracingAuditLog};
pub use cache::{MemoryRuleCache, RuleCache, cache_key};
pub use engine::{RuleBook, RuleDraft};
pub use error::{RuleError, compute_suggestions};
pub use kinds::{
    GenderKind, GenderListKind, ListKind, NumberKind, RuleKind, RuleKindRegistry, ValueKind,
};
pub use params::{LabelParams, ParamsError, split_params};
pub use rule::{Definition, DefinitionValue, NewRule, Rule, humanize_values, sanitize_values};
pub use store::{MemoryRuleStore, RuleStore, StoreError};
pub use sync::SyncRecord;
pub use types::{Gender, LanguageId, Options, Person, RuleId, Token, TranslatorId, Value};

/// Creates an [`Options`] map from keyword/form pairs, keeping their order.
///
/// # Example
///
/// ```
/// use langrule::options;
///
/// let o = options! { "one" => "message", "other" => "messages" };
/// assert_eq!(o.len(), 2);
/// assert_eq!(o.get_index(0).map(|(k, _)| k.as_str()), Some("one"));
/// assert_eq!(o["other"], "messages");
/// ```
#[macro_export]
macro_rules! options {
    {} => {
        $crate::Options::new()
    };
    { $($keyword:expr => $form:expr),+ $(,)? } => {
        {
            let mut map = $crate::Options::new();
            $(
                map.insert($keyword.to_string(), $form.to_string());
            )+
            map
        }
    };
}
