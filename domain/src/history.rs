use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

use crate::points::PointAmount;
use crate::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "CREDIT")]
    Credit,
    #[serde(rename = "DEBIT")]
    Debit,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Credit => write!(f, "CREDIT"),
            TransactionKind::Debit => write!(f, "DEBIT"),
        }
    }
}

/// One committed balance mutation. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub entry_id: u64,
    pub user_id: UserId,
    pub amount: PointAmount,
    pub kind: TransactionKind,
    pub timestamp: OffsetDateTime,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(
        entry_id: u64,
        user_id: UserId,
        amount: PointAmount,
        kind: TransactionKind,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            entry_id,
            user_id,
            amount,
            kind,
            timestamp,
        }
    }

    /// Effect of this entry on the balance it was applied to.
    #[must_use]
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            TransactionKind::Credit => self.amount.get(),
            TransactionKind::Debit => -self.amount.get(),
        }
    }
}
