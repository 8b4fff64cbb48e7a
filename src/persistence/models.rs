//! Database row shapes and their validation into domain types.
//!
//! The original document store returned schemaless records; here every
//! row is validated at the persistence boundary and mapped into the
//! strongly-typed domain representation. Enumerated columns that carry an
//! unknown string fail the conversion instead of leaking into business
//! logic.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::campaign_entry::{CampaignEntry, PaymentMethod, PaymentStatus};
use crate::domain::leaderboard::{CampaignLeaderboard, LeaderboardEntry};
use crate::domain::participation::Participation;
use crate::domain::point_transaction::{PointTransaction, TransactionType};
use crate::domain::{CampaignId, MovieId, UserId};
use crate::error::GatewayError;

/// A participation row from the `participations` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipationRow {
    /// The participating user.
    pub user_id: Uuid,
    /// Accumulated points.
    pub total_points: i64,
    /// Number of predictions made.
    pub predictions_count: i32,
    /// Number of correct predictions.
    pub correct_predictions: i32,
}

impl TryFrom<ParticipationRow> for Participation {
    type Error = GatewayError;

    fn try_from(row: ParticipationRow) -> Result<Self, Self::Error> {
        let predictions_count = u32::try_from(row.predictions_count).map_err(|_| {
            GatewayError::PersistenceError(format!(
                "negative predictions_count for user {}",
                row.user_id
            ))
        })?;
        let correct_predictions = u32::try_from(row.correct_predictions).map_err(|_| {
            GatewayError::PersistenceError(format!(
                "negative correct_predictions for user {}",
                row.user_id
            ))
        })?;
        Ok(Self {
            user_id: UserId::from_uuid(row.user_id),
            total_points: row.total_points,
            predictions_count,
            correct_predictions,
        })
    }
}

/// A campaign entry row from the `campaign_entries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampaignEntryRow {
    /// Entry identifier.
    pub id: Uuid,
    /// Campaign the entry belongs to.
    pub campaign_id: Uuid,
    /// The entering user.
    pub user_id: Uuid,
    /// Entry fee, when present.
    pub entry_fee: Option<f64>,
    /// Fee tier label, when present.
    pub entry_fee_tier: Option<String>,
    /// Payment status string.
    pub payment_status: String,
    /// Payment method string, when present.
    pub payment_method: Option<String>,
    /// Self-reported city.
    pub city: Option<String>,
    /// Self-reported state.
    pub state: Option<String>,
    /// Signup timestamp.
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<CampaignEntryRow> for CampaignEntry {
    type Error = GatewayError;

    fn try_from(row: CampaignEntryRow) -> Result<Self, Self::Error> {
        let payment_status = PaymentStatus::parse(&row.payment_status).ok_or_else(|| {
            GatewayError::PersistenceError(format!(
                "unknown payment status {:?} on entry {}",
                row.payment_status, row.id
            ))
        })?;
        let payment_method = row
            .payment_method
            .as_deref()
            .map(|method| {
                PaymentMethod::parse(method).ok_or_else(|| {
                    GatewayError::PersistenceError(format!(
                        "unknown payment method {method:?} on entry {}",
                        row.id
                    ))
                })
            })
            .transpose()?;
        Ok(Self {
            id: row.id,
            campaign_id: CampaignId::from_uuid(row.campaign_id),
            user_id: UserId::from_uuid(row.user_id),
            entry_fee: row.entry_fee,
            entry_fee_tier: row.entry_fee_tier,
            payment_status,
            payment_method,
            city: row.city,
            state: row.state,
            joined_at: row.joined_at,
        })
    }
}

/// A point transaction row from the `point_transactions` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PointTransactionRow {
    /// Ledger row identifier.
    pub id: i64,
    /// The user whose balance moved.
    pub user_id: Uuid,
    /// Transaction type string.
    pub tx_type: String,
    /// Signed point delta.
    pub amount: i64,
    /// Balance after the transaction.
    pub balance_after: i64,
    /// Human-readable description.
    pub description: String,
    /// Optional metadata bag.
    pub metadata: Option<serde_json::Value>,
    /// Append timestamp.
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PointTransactionRow> for PointTransaction {
    type Error = GatewayError;

    fn try_from(row: PointTransactionRow) -> Result<Self, Self::Error> {
        let tx_type = TransactionType::parse(&row.tx_type).ok_or_else(|| {
            GatewayError::PersistenceError(format!(
                "unknown transaction type {:?} on ledger row {}",
                row.tx_type, row.id
            ))
        })?;
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            tx_type,
            amount: row.amount,
            balance_after: row.balance_after,
            description: row.description,
            metadata: row.metadata,
            created_at: row.created_at,
        })
    }
}

/// A leaderboard snapshot row from the `leaderboards` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardRow {
    /// Campaign the leaderboard belongs to.
    pub campaign_id: Uuid,
    /// Leaderboard type label.
    pub board_type: String,
    /// Movie scope, when present.
    pub movie_id: Option<Uuid>,
    /// Ranked entries as JSONB.
    pub entries: serde_json::Value,
    /// Snapshot timestamp.
    pub last_updated: DateTime<Utc>,
}

impl TryFrom<LeaderboardRow> for CampaignLeaderboard {
    type Error = GatewayError;

    fn try_from(row: LeaderboardRow) -> Result<Self, Self::Error> {
        let entries: Vec<LeaderboardEntry> =
            serde_json::from_value(row.entries).map_err(|e| {
                GatewayError::PersistenceError(format!(
                    "malformed leaderboard entries for campaign {}: {e}",
                    row.campaign_id
                ))
            })?;
        Ok(Self {
            campaign_id: CampaignId::from_uuid(row.campaign_id),
            board_type: row.board_type,
            movie_id: row.movie_id.map(MovieId::from_uuid),
            entries,
            last_updated: row.last_updated,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn unknown_payment_status_fails_at_boundary() {
        let row = CampaignEntryRow {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_fee: Some(100.0),
            entry_fee_tier: None,
            payment_status: "chargeback".to_string(),
            payment_method: None,
            city: None,
            state: None,
            joined_at: Utc::now(),
        };
        assert!(CampaignEntry::try_from(row).is_err());
    }

    #[test]
    fn valid_entry_row_converts() {
        let row = CampaignEntryRow {
            id: Uuid::new_v4(),
            campaign_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_fee: Some(100.0),
            entry_fee_tier: Some("premium".to_string()),
            payment_status: "paid".to_string(),
            payment_method: Some("upi".to_string()),
            city: Some("Pune".to_string()),
            state: None,
            joined_at: Utc::now(),
        };
        let entry = CampaignEntry::try_from(row);
        let Ok(entry) = entry else {
            panic!("expected conversion to succeed");
        };
        assert_eq!(entry.payment_status, PaymentStatus::Paid);
        assert_eq!(entry.payment_method, Some(PaymentMethod::Upi));
    }

    #[test]
    fn unknown_transaction_type_fails_at_boundary() {
        let row = PointTransactionRow {
            id: 1,
            user_id: Uuid::new_v4(),
            tx_type: "jackpot".to_string(),
            amount: 10,
            balance_after: 10,
            description: String::new(),
            metadata: None,
            created_at: Utc::now(),
        };
        assert!(PointTransaction::try_from(row).is_err());
    }

    #[test]
    fn malformed_leaderboard_entries_fail_at_boundary() {
        let row = LeaderboardRow {
            campaign_id: Uuid::new_v4(),
            board_type: "overall".to_string(),
            movie_id: None,
            entries: serde_json::json!({"not": "a list"}),
            last_updated: Utc::now(),
        };
        assert!(CampaignLeaderboard::try_from(row).is_err());
    }

    #[test]
    fn negative_prediction_counts_fail_at_boundary() {
        let row = ParticipationRow {
            user_id: Uuid::new_v4(),
            total_points: 10,
            predictions_count: -1,
            correct_predictions: 0,
        };
        assert!(Participation::try_from(row).is_err());
    }
}
