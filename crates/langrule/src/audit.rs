//! Audit trail for rule changes.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::rule::Rule;
use crate::types::{LanguageId, RuleId, TranslatorId};

/// Records who created, changed or deleted a rule.
pub trait AuditLog: Send + Sync {
    fn record_created(&self, translator: TranslatorId, rule: &Rule);
    fn record_updated(&self, translator: TranslatorId, rule: &Rule);
    fn record_deleted(&self, translator: TranslatorId, rule: &Rule);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub translator: TranslatorId,
    pub rule: RuleId,
    pub language: LanguageId,
    pub keyword: String,
}

impl AuditEvent {
    pub fn new(action: AuditAction, translator: TranslatorId, rule: &Rule) -> Self {
        Self {
            action,
            translator,
            rule: rule.id(),
            language: rule.language().clone(),
            keyword: rule.keyword().to_string(),
        }
    }
}

/// Emits audit records as `tracing` events on the `langrule::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditLog;

impl TracingAuditLog {
    fn emit(action: AuditAction, translator: TranslatorId, rule: &Rule) {
        info!(
            target: "langrule::audit",
            ?action,
            %translator,
            rule_id = %rule.id(),
            language = %rule.language(),
            keyword = rule.keyword(),
            "language rule audit"
        );
    }
}

impl AuditLog for TracingAuditLog {
    fn record_created(&self, translator: TranslatorId, rule: &Rule) {
        Self::emit(AuditAction::Created, translator, rule);
    }

    fn record_updated(&self, translator: TranslatorId, rule: &Rule) {
        Self::emit(AuditAction::Updated, translator, rule);
    }

    fn record_deleted(&self, translator: TranslatorId, rule: &Rule) {
        Self::emit(AuditAction::Deleted, translator, rule);
    }
}

/// Keeps audit records in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    events: RwLock<Vec<AuditEvent>>,
}

impl MemoryAuditLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.read().clone()
    }

    fn push(&self, action: AuditAction, translator: TranslatorId, rule: &Rule) {
        self.events
            .write()
            .push(AuditEvent::new(action, translator, rule));
    }
}

impl AuditLog for MemoryAuditLog {
    fn record_created(&self, translator: TranslatorId, rule: &Rule) {
        self.push(AuditAction::Created, translator, rule);
    }

    fn record_updated(&self, translator: TranslatorId, rule: &Rule) {
        self.push(AuditAction::Updated, translator, rule);
    }

    fn record_deleted(&self, translator: TranslatorId, rule: &Rule) {
        self.push(AuditAction::Deleted, translator, rule);
    }
}
