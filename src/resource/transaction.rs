//! Ledger transactions: resource wiring and derived totals.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use entity::transaction::{Transaction, TransactionDraft, TransactionKind, TransactionPatch};

use crate::controller::config::{ControllerConfig, InsertPosition};
use crate::resource::Resource;

/// Marker type wiring ledger transactions into the controller.
pub struct Transactions;

/// Filters for transaction list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionFilters {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<String>,
    /// Restrict to a calendar month, `YYYY-MM`.
    pub month: Option<String>,
}

impl TransactionFilters {
    /// Filters restricted to the calendar month containing `date`.
    pub fn for_month_of(date: chrono::NaiveDate) -> Self {
        Self {
            month: Some(format!("{:04}-{:02}", date.year(), date.month())),
            ..Self::default()
        }
    }
}

impl Resource for Transactions {
    type Entity = Transaction;
    type Draft = TransactionDraft;
    type Patch = TransactionPatch;
    type Filters = TransactionFilters;

    const NAME: &'static str = "transactions";

    fn id(entity: &Transaction) -> &str {
        &entity.id
    }

    fn from_draft(draft: &TransactionDraft, id: String, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            kind: draft.kind,
            amount: draft.amount,
            category_id: draft.category_id.clone(),
            memo: draft.memo.clone(),
            occurred_on: draft.occurred_on,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(entity: &mut Transaction, patch: &TransactionPatch) {
        if let Some(kind) = patch.kind {
            entity.kind = kind;
        }
        if let Some(amount) = patch.amount {
            entity.amount = amount;
        }
        if let Some(category_id) = &patch.category_id {
            entity.category_id = Some(category_id.clone());
        }
        if let Some(memo) = &patch.memo {
            entity.memo = Some(memo.clone());
        }
        if let Some(occurred_on) = patch.occurred_on {
            entity.occurred_on = occurred_on;
        }
    }

    fn config() -> ControllerConfig {
        // Newest entries show first on the ledger screen.
        ControllerConfig::new(5 * 60).with_insert_position(InsertPosition::Front)
    }
}

/// Income/expense totals derived from the loaded sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionStats {
    /// Sum of income amounts, in won.
    pub income_total: i64,
    /// Sum of expense amounts, in won (stored positive).
    pub expense_total: i64,
    /// Number of transactions counted.
    pub count: usize,
}

impl TransactionStats {
    /// Totals over a loaded sequence.
    pub fn from_items(items: &[Transaction]) -> Self {
        let mut stats = Self::default();
        for item in items {
            match item.kind {
                TransactionKind::Income => stats.income_total += item.amount,
                TransactionKind::Expense => stats.expense_total += item.amount,
            }
            stats.count += 1;
        }
        stats
    }

    /// Income minus expenses.
    pub fn balance(&self) -> i64 {
        self.income_total - self.expense_total
    }
}
