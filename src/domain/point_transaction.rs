//! The append-only point transaction ledger row.
//!
//! Every point credit or debit on the platform is one immutable
//! [`PointTransaction`]. `balance_after` is the user's balance immediately
//! after the transaction; the persistence layer computes it inside the
//! append so that `balance_after(n) = balance_after(n-1) + amount(n)`
//! holds per user even under concurrent writers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Why points moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Points earned from a fantasy campaign.
    CampaignEarned,
    /// Points earned by completing a quiz.
    QuizCompleted,
    /// Points earned by submitting a rating.
    RatingSubmitted,
    /// Points spent in the rewards center.
    Redemption,
    /// Manual correction from the admin back-office.
    AdminAdjustment,
    /// Points returned after a refund.
    Refund,
    /// Promotional bonus points.
    Bonus,
}

impl TransactionType {
    /// All transaction types, in catalog order.
    pub const ALL: [Self; 7] = [
        Self::CampaignEarned,
        Self::QuizCompleted,
        Self::RatingSubmitted,
        Self::Redemption,
        Self::AdminAdjustment,
        Self::Refund,
        Self::Bonus,
    ];

    /// Returns the type as a static string slice, as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignEarned => "campaign_earned",
            Self::QuizCompleted => "quiz_completed",
            Self::RatingSubmitted => "rating_submitted",
            Self::Redemption => "redemption",
            Self::AdminAdjustment => "admin_adjustment",
            Self::Refund => "refund",
            Self::Bonus => "bonus",
        }
    }

    /// Parses a stored type string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable row of the point ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointTransaction {
    /// Ledger row identifier, monotonically increasing per insert.
    pub id: i64,
    /// The user whose balance moved.
    pub user_id: UserId,
    /// Why the points moved.
    pub tx_type: TransactionType,
    /// Signed point delta: positive = credit, negative = debit.
    pub amount: i64,
    /// The user's balance immediately after this transaction.
    pub balance_after: i64,
    /// Human-readable description.
    pub description: String,
    /// Optional free-form metadata bag (e.g. a `campaign_id` tag).
    pub metadata: Option<serde_json::Value>,
    /// Append timestamp.
    pub created_at: DateTime<Utc>,
}

impl PointTransaction {
    /// Returns `true` if this transaction credits points to the user.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        self.amount > 0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn type_strings_round_trip() {
        for tx_type in TransactionType::ALL {
            assert_eq!(TransactionType::parse(tx_type.as_str()), Some(tx_type));
        }
        assert_eq!(TransactionType::parse("jackpot"), None);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&TransactionType::CampaignEarned).ok();
        assert_eq!(json.as_deref(), Some("\"campaign_earned\""));
    }

    #[test]
    fn credit_detection() {
        let tx = PointTransaction {
            id: 1,
            user_id: UserId::new(),
            tx_type: TransactionType::Redemption,
            amount: -500,
            balance_after: 250,
            description: "voucher redemption".to_string(),
            metadata: None,
            created_at: Utc::now(),
        };
        assert!(!tx.is_credit());
    }
}
