//! Point ledger DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::point_transaction::PointTransaction;

/// Request body for `POST /users/{id}/points`.
///
/// The running balance is never part of the request: the gateway computes
/// `balance_after` from the user's latest ledger row atomically.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPointsRequest {
    /// Transaction type string (e.g. `"quiz_completed"`).
    pub tx_type: String,
    /// Signed point delta: positive = credit, negative = debit.
    pub amount: i64,
    /// Human-readable description.
    pub description: String,
    /// Optional free-form metadata bag (e.g. a `campaign_id` tag).
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

/// A stored ledger row.
#[derive(Debug, Serialize, ToSchema)]
pub struct PointTransactionResponse {
    /// Ledger row identifier.
    pub id: i64,
    /// The user whose balance moved.
    pub user_id: Uuid,
    /// Transaction type string.
    pub tx_type: String,
    /// Signed point delta.
    pub amount: i64,
    /// Balance immediately after this transaction.
    pub balance_after: i64,
    /// Human-readable description.
    pub description: String,
    /// Optional metadata bag.
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    /// Append timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<PointTransaction> for PointTransactionResponse {
    fn from(tx: PointTransaction) -> Self {
        Self {
            id: tx.id,
            user_id: *tx.user_id.as_uuid(),
            tx_type: tx.tx_type.as_str().to_string(),
            amount: tx.amount,
            balance_after: tx.balance_after,
            description: tx.description,
            metadata: tx.metadata,
            created_at: tx.created_at,
        }
    }
}

/// Ledger history response, newest first.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionListResponse {
    /// Transactions, newest first.
    pub data: Vec<PointTransactionResponse>,
}
