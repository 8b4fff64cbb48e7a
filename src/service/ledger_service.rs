//! Ledger service: the append-only point transaction log.

use chrono::Utc;

use crate::domain::point_transaction::{PointTransaction, TransactionType};
use crate::domain::{CampaignId, EventBus, PlatformEvent, UserId};
use crate::error::GatewayError;
use crate::persistence::PostgresStore;
use crate::service::mirror_write_rejection;

/// Orchestration layer for the point ledger. Append and read only; no
/// update or delete operations exist anywhere in this service.
#[derive(Debug, Clone)]
pub struct LedgerService {
    store: PostgresStore,
    event_bus: EventBus,
    default_limit: u32,
    max_limit: u32,
}

impl LedgerService {
    /// Creates a new `LedgerService` with the configured history page
    /// size bounds.
    #[must_use]
    pub fn new(store: PostgresStore, event_bus: EventBus, default_limit: u32, max_limit: u32) -> Self {
        Self {
            store,
            event_bus,
            default_limit,
            max_limit,
        }
    }

    /// Appends one immutable transaction and returns it with its
    /// server-computed running balance.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::InvalidRequest`] for a zero amount or
    /// balance overflow, or a [`GatewayError`] if the write fails.
    /// Permission-denied writes are mirrored onto the event bus before
    /// being re-thrown.
    pub async fn record(
        &self,
        user_id: UserId,
        tx_type: TransactionType,
        amount: i64,
        description: &str,
        metadata: Option<serde_json::Value>,
    ) -> Result<PointTransaction, GatewayError> {
        if amount == 0 {
            return Err(GatewayError::InvalidRequest(
                "amount must be non-zero".to_string(),
            ));
        }

        let stored = self
            .store
            .append_point_transaction(user_id, tx_type, amount, description, metadata.as_ref())
            .await
            .inspect_err(|err| {
                mirror_write_rejection(&self.event_bus, "point_transactions", err);
            })?;

        let _ = self.event_bus.publish(PlatformEvent::PointsRecorded {
            user_id: *stored.user_id.as_uuid(),
            tx_type: stored.tx_type.to_string(),
            amount: stored.amount,
            balance_after: stored.balance_after,
            campaign_id: campaign_tag(stored.metadata.as_ref()),
            timestamp: Utc::now(),
        });

        tracing::info!(
            user_id = %stored.user_id,
            tx_type = %stored.tx_type,
            amount = stored.amount,
            balance_after = stored.balance_after,
            "point transaction recorded"
        );
        Ok(stored)
    }

    /// Returns the most recent transactions for a user, newest first.
    ///
    /// A missing limit falls back to the configured default; any limit is
    /// clamped to the configured maximum.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the fetch fails.
    pub async fn recent_for_user(
        &self,
        user_id: UserId,
        limit: Option<u32>,
    ) -> Result<Vec<PointTransaction>, GatewayError> {
        let limit = limit
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit);
        self.store
            .user_point_transactions(user_id, i64::from(limit))
            .await
    }

    /// Returns all transactions tagged with a campaign, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] if the fetch fails.
    pub async fn for_campaign(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<PointTransaction>, GatewayError> {
        self.store.campaign_point_transactions(campaign_id).await
    }
}

/// Extracts the `campaign_id` tag from a transaction metadata bag, when
/// present and well-formed.
fn campaign_tag(metadata: Option<&serde_json::Value>) -> Option<CampaignId> {
    metadata?
        .get("campaign_id")?
        .as_str()?
        .parse::<uuid::Uuid>()
        .ok()
        .map(CampaignId::from_uuid)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn campaign_tag_parses_valid_uuid() {
        let id = CampaignId::new();
        let metadata = serde_json::json!({ "campaign_id": id.to_string() });
        assert_eq!(campaign_tag(Some(&metadata)), Some(id));
    }

    #[test]
    fn campaign_tag_ignores_missing_or_malformed() {
        assert_eq!(campaign_tag(None), None);
        let no_tag = serde_json::json!({ "source": "quiz" });
        assert_eq!(campaign_tag(Some(&no_tag)), None);
        let malformed = serde_json::json!({ "campaign_id": "not-a-uuid" });
        assert_eq!(campaign_tag(Some(&malformed)), None);
    }
}
