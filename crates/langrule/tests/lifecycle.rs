//! Tests for rule creation, update and deletion, with audit and cache effects.

use langrule::{
    AuditAction, Definition, LanguageId, MemoryAuditLog, MemoryRuleCache, NewRule, Rule,
    RuleBook, RuleDraft, RuleError, RuleId, RuleStore, StoreError, TranslatorId, cache_key,
    options,
};
use std::sync::Arc;

const EDITOR: TranslatorId = TranslatorId::new(1);
const REVIEWER: TranslatorId = TranslatorId::new(2);

struct Fixture {
    book: RuleBook,
    audit: Arc<MemoryAuditLog>,
    cache: Arc<MemoryRuleCache>,
}

fn fixture() -> Fixture {
    let audit = Arc::new(MemoryAuditLog::new());
    let cache = Arc::new(MemoryRuleCache::new());
    let book = RuleBook::builder()
        .audit(audit.clone())
        .cache(cache.clone())
        .build();
    Fixture { book, audit, cache }
}

fn one_rule(book: &RuleBook) -> Rule {
    book.create_with_log(
        RuleDraft::builder()
            .language("en")
            .kind("number")
            .keyword("one")
            .definition(Definition::new().with("part1", "is").with("value1", "1"))
            .build(),
        EDITOR,
    )
    .unwrap()
}

fn en() -> LanguageId {
    LanguageId::from("en")
}

#[test]
fn create_assigns_ids_and_audits() {
    let f = fixture();
    let first = one_rule(&f.book);
    let second = f
        .book
        .create_with_log(
            RuleDraft::builder()
                .language("en")
                .kind("gender")
                .definition(Definition::new().with("part", "is").with("value", "male"))
                .build(),
            EDITOR,
        )
        .unwrap();

    assert_eq!(first.id(), RuleId::new(1));
    assert_eq!(second.id(), RuleId::new(2));
    assert_eq!(second.keyword(), "gender");
    assert_eq!(first.translator(), Some(EDITOR));

    let events = f.audit.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].action, AuditAction::Created);
    assert_eq!(events[0].rule, first.id());
    assert_eq!(events[0].translator, EDITOR);
    assert_eq!(events[0].keyword, "one");
}

#[test]
fn create_rejects_unknown_kind() {
    let f = fixture();
    let err = f
        .book
        .create_with_log(
            RuleDraft::builder().language("en").kind("plural").build(),
            EDITOR,
        )
        .unwrap_err();
    assert!(matches!(err, RuleError::UnknownRuleKind { .. }));
    assert!(f.book.rules_for_language(&en()).unwrap().is_empty());
    assert!(f.audit.events().is_empty());
}

#[test]
fn unchanged_save_is_not_audited() {
    let f = fixture();
    let mut rule = one_rule(&f.book);
    assert!(f.book.save_with_log(&mut rule, REVIEWER).unwrap());
    assert_eq!(rule.translator(), Some(EDITOR));
    assert_eq!(f.audit.events().len(), 1);
}

#[test]
fn changed_save_records_translator_and_audits() {
    let f = fixture();
    let mut rule = one_rule(&f.book);
    rule.set_definition(Definition::new().with("part1", "is").with("value1", "1, 21"));
    assert!(f.book.save_with_log(&mut rule, REVIEWER).unwrap());
    assert_eq!(rule.translator(), Some(REVIEWER));

    let events = f.audit.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].action, AuditAction::Updated);
    assert_eq!(events[1].translator, REVIEWER);

    let stored = f.book.fetch_by_id(rule.id()).unwrap().unwrap();
    assert_eq!(stored, rule);
    assert!(stored.evaluate(&21.into()).unwrap());
}

#[test]
fn renaming_a_rule_changes_transform_lookup() {
    let f = fixture();
    let mut rule = one_rule(&f.book);
    rule.set_keyword("single");
    f.book.save_with_log(&mut rule, REVIEWER).unwrap();

    let options = options! { "single" => "item", "other" => "items" };
    assert_eq!(
        f.book.transform("count", &1.into(), &options, &en()).unwrap(),
        "item"
    );
    assert!(
        f.book
            .rule_for_keyword_and_language("one", &en())
            .unwrap()
            .is_none()
    );
}

#[test]
fn saving_a_deleted_rule_returns_false() {
    let f = fixture();
    let mut rule = one_rule(&f.book);
    f.book.destroy_with_log(&rule, EDITOR).unwrap();
    rule.set_keyword("renamed");
    assert!(!f.book.save_with_log(&mut rule, REVIEWER).unwrap());
    assert!(f.book.rules_for_language(&en()).unwrap().is_empty());
}

#[test]
fn destroy_always_audits() {
    let f = fixture();
    let rule = one_rule(&f.book);
    assert!(f.book.destroy_with_log(&rule, REVIEWER).unwrap());
    assert!(!f.book.destroy_with_log(&rule, REVIEWER).unwrap());

    let actions: Vec<AuditAction> = f.audit.events().iter().map(|e| e.action).collect();
    assert_eq!(
        actions,
        vec![AuditAction::Created, AuditAction::Deleted, AuditAction::Deleted]
    );
}

// =========================================================================
// Cache coherence
// =========================================================================

#[test]
fn fetch_reads_through_the_cache() {
    let f = fixture();
    let rule = one_rule(&f.book);
    let key = cache_key(rule.id());
    assert_eq!(key, "language_rule_[1]");
    assert!(!f.cache.contains(&key));

    let fetched = f.book.fetch_by_id(rule.id()).unwrap().unwrap();
    assert_eq!(fetched, rule);
    assert!(f.cache.contains(&key));
    assert_eq!(f.book.fetch_by_id(rule.id()).unwrap().unwrap(), rule);
}

#[test]
fn fetch_of_missing_rule_is_not_cached() {
    let f = fixture();
    assert!(f.book.fetch_by_id(RuleId::new(42)).unwrap().is_none());
    assert!(f.cache.is_empty());
}

#[test]
fn save_invalidates_cached_copy() {
    let f = fixture();
    let mut rule = one_rule(&f.book);
    f.book.fetch_by_id(rule.id()).unwrap();

    rule.set_definition(Definition::new().with("part1", "is").with("value1", "2"));
    f.book.save_with_log(&mut rule, REVIEWER).unwrap();
    assert!(!f.cache.contains(&cache_key(rule.id())));

    let fetched = f.book.fetch_by_id(rule.id()).unwrap().unwrap();
    assert_eq!(fetched.definition().text("value1"), Some("2"));
}

#[test]
fn unchanged_save_still_invalidates() {
    let f = fixture();
    let mut rule = one_rule(&f.book);
    f.book.fetch_by_id(rule.id()).unwrap();
    f.book.save_with_log(&mut rule, EDITOR).unwrap();
    assert!(f.cache.is_empty());
}

#[test]
fn destroy_invalidates_cached_copy() {
    let f = fixture();
    let rule = one_rule(&f.book);
    f.book.fetch_by_id(rule.id()).unwrap();
    f.book.destroy_with_log(&rule, EDITOR).unwrap();
    assert!(f.cache.is_empty());
    assert!(f.book.fetch_by_id(rule.id()).unwrap().is_none());
}

// =========================================================================
// Storage failures
// =========================================================================

struct OfflineStore;

impl RuleStore for OfflineStore {
    fn find_by_id(&self, _: RuleId) -> Result<Option<Rule>, StoreError> {
        Err(offline())
    }

    fn find_all(&self, _: &LanguageId) -> Result<Vec<Rule>, StoreError> {
        Err(offline())
    }

    fn find_one(&self, _: &LanguageId, _: &str) -> Result<Option<Rule>, StoreError> {
        Err(offline())
    }

    fn create(&self, _: NewRule) -> Result<Rule, StoreError> {
        Err(offline())
    }

    fn save(&self, _: &Rule) -> Result<bool, StoreError> {
        Err(offline())
    }

    fn delete(&self, _: &Rule) -> Result<bool, StoreError> {
        Err(offline())
    }
}

fn offline() -> StoreError {
    StoreError::Unavailable {
        message: "connection refused".to_string(),
    }
}

#[test]
fn store_failures_propagate() {
    let audit = Arc::new(MemoryAuditLog::new());
    let book = RuleBook::builder()
        .store(Arc::new(OfflineStore))
        .audit(audit.clone())
        .build();

    let err = book
        .transform("count", &1.into(), &options! { "one" => "x" }, &en())
        .unwrap_err();
    assert!(matches!(err, RuleError::Storage(StoreError::Unavailable { .. })));

    let err = book
        .create_with_log(RuleDraft::builder().language("en").kind("number").build(), EDITOR)
        .unwrap_err();
    assert!(matches!(err, RuleError::Storage(_)));
    assert!(audit.events().is_empty());

    let err = book
        .import_sync_record(
            &en(),
            EDITOR,
            &serde_json::json!({"token": "count", "type": "number", "definition": {}}),
        )
        .unwrap_err();
    assert!(matches!(err, RuleError::Storage(_)));
    assert!(book.fetch_by_id(RuleId::new(1)).is_err());
}
