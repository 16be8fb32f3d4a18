use serde::Serialize;
use time::OffsetDateTime;

use domain::history::{HistoryEntry, TransactionKind};
use domain::points::Balance;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success_with_data(data: Option<T>) -> Self {
        Self {
            ok: true,
            error: None,
            data,
        }
    }
}

fn unix_millis(timestamp: OffsetDateTime) -> i64 {
    (timestamp.unix_timestamp_nanos() / 1_000_000) as i64
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPointResponse {
    pub id: i64,
    pub point: i64,
    pub update_millis: i64,
}

impl From<Balance> for UserPointResponse {
    fn from(balance: Balance) -> Self {
        Self {
            id: balance.user_id.get(),
            point: balance.amount,
            update_millis: unix_millis(balance.last_updated),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PointHistoryResponse {
    pub id: u64,
    pub user_id: i64,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub update_millis: i64,
}

impl From<HistoryEntry> for PointHistoryResponse {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.entry_id,
            user_id: entry.user_id.get(),
            amount: entry.amount.get(),
            kind: entry.kind,
            update_millis: unix_millis(entry.timestamp),
        }
    }
}
