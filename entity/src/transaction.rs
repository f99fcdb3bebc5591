use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether a transaction adds to or subtracts from the household balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    /// Amount in won. Expenses are stored as positive values; the kind
    /// determines the sign when computing a balance.
    pub amount: i64,
    pub category_id: Option<String>,
    pub memo: Option<String>,
    pub occurred_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client supplies when recording a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount: i64,
    pub category_id: Option<String>,
    pub memo: Option<String>,
    pub occurred_on: NaiveDate,
}

/// Partial update for a transaction. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPatch {
    pub kind: Option<TransactionKind>,
    pub amount: Option<i64>,
    pub category_id: Option<String>,
    pub memo: Option<String>,
    pub occurred_on: Option<NaiveDate>,
}
