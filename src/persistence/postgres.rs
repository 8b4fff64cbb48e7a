//! PostgreSQL implementation of the document store.

use sqlx::PgPool;
use uuid::Uuid;

use super::models::{CampaignEntryRow, LeaderboardRow, ParticipationRow, PointTransactionRow};
use crate::domain::campaign_entry::{CampaignEntry, NewCampaignEntry, PaymentMethod, PaymentStatus};
use crate::domain::leaderboard::{CampaignLeaderboard, board_key};
use crate::domain::participation::Participation;
use crate::domain::point_transaction::{PointTransaction, TransactionType};
use crate::domain::{CampaignId, MovieId, ParentRef, UserId};
use crate::error::GatewayError;

/// PostgreSQL-backed document store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all participation records under a campaign or tournament.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::PersistenceError`] on database failure or
    /// when a stored row fails boundary validation.
    pub async fn participations_for(
        &self,
        parent: &ParentRef,
    ) -> Result<Vec<Participation>, GatewayError> {
        let rows = sqlx::query_as::<_, ParticipationRow>(
            "SELECT user_id, total_points, predictions_count, correct_predictions \
             FROM participations WHERE parent_kind = $1 AND parent_id = $2 ORDER BY id ASC",
        )
        .bind(parent.kind.as_str())
        .bind(parent.id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(Participation::try_from).collect()
    }

    /// Creates or replaces a user's participation record under a parent.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure.
    pub async fn upsert_participation(
        &self,
        parent: &ParentRef,
        participation: &Participation,
    ) -> Result<(), GatewayError> {
        sqlx::query(
            "INSERT INTO participations \
             (parent_kind, parent_id, user_id, total_points, predictions_count, correct_predictions) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (parent_kind, parent_id, user_id) DO UPDATE SET \
             total_points = EXCLUDED.total_points, \
             predictions_count = EXCLUDED.predictions_count, \
             correct_predictions = EXCLUDED.correct_predictions",
        )
        .bind(parent.kind.as_str())
        .bind(parent.id)
        .bind(*participation.user_id.as_uuid())
        .bind(participation.total_points)
        .bind(i64::from(participation.predictions_count))
        .bind(i64::from(participation.correct_predictions))
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    /// Inserts a new campaign entry and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure.
    pub async fn insert_entry(
        &self,
        entry: &NewCampaignEntry,
    ) -> Result<CampaignEntry, GatewayError> {
        let row = sqlx::query_as::<_, CampaignEntryRow>(
            "INSERT INTO campaign_entries \
             (campaign_id, user_id, entry_fee, entry_fee_tier, payment_status, payment_method, city, state) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, campaign_id, user_id, entry_fee, entry_fee_tier, payment_status, \
                       payment_method, city, state, joined_at",
        )
        .bind(*entry.campaign_id.as_uuid())
        .bind(*entry.user_id.as_uuid())
        .bind(entry.entry_fee)
        .bind(entry.entry_fee_tier.as_deref())
        .bind(entry.payment_status.as_str())
        .bind(entry.payment_method.map(|m| m.as_str()))
        .bind(entry.city.as_deref())
        .bind(entry.state.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.try_into()
    }

    /// Fetches campaign entries, optionally scoped to one campaign.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure or when a stored row
    /// fails boundary validation.
    pub async fn entries(
        &self,
        campaign: Option<CampaignId>,
    ) -> Result<Vec<CampaignEntry>, GatewayError> {
        let rows = if let Some(campaign_id) = campaign {
            sqlx::query_as::<_, CampaignEntryRow>(
                "SELECT id, campaign_id, user_id, entry_fee, entry_fee_tier, payment_status, \
                        payment_method, city, state, joined_at \
                 FROM campaign_entries WHERE campaign_id = $1 ORDER BY joined_at ASC",
            )
            .bind(*campaign_id.as_uuid())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, CampaignEntryRow>(
                "SELECT id, campaign_id, user_id, entry_fee, entry_fee_tier, payment_status, \
                        payment_method, city, state, joined_at \
                 FROM campaign_entries ORDER BY joined_at ASC",
            )
            .fetch_all(&self.pool)
            .await
        }
        .map_err(map_db_err)?;

        rows.into_iter().map(CampaignEntry::try_from).collect()
    }

    /// Fetches a single campaign entry by ID.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure or when the stored
    /// row fails boundary validation.
    pub async fn get_entry(&self, id: Uuid) -> Result<Option<CampaignEntry>, GatewayError> {
        let row = sqlx::query_as::<_, CampaignEntryRow>(
            "SELECT id, campaign_id, user_id, entry_fee, entry_fee_tier, payment_status, \
                    payment_method, city, state, joined_at \
             FROM campaign_entries WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(CampaignEntry::try_from).transpose()
    }

    /// Applies a Pending→Paid / Pending→Refunded transition conditionally.
    ///
    /// Returns the updated entry, or `None` when the entry does not exist
    /// or is no longer Pending (the caller distinguishes the two).
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure or when the stored
    /// row fails boundary validation.
    pub async fn settle_entry_payment(
        &self,
        id: Uuid,
        to: PaymentStatus,
        method: Option<PaymentMethod>,
    ) -> Result<Option<CampaignEntry>, GatewayError> {
        let row = sqlx::query_as::<_, CampaignEntryRow>(
            "UPDATE campaign_entries \
             SET payment_status = $2, payment_method = COALESCE($3, payment_method) \
             WHERE id = $1 AND payment_status = 'pending' \
             RETURNING id, campaign_id, user_id, entry_fee, entry_fee_tier, payment_status, \
                       payment_method, city, state, joined_at",
        )
        .bind(id)
        .bind(to.as_str())
        .bind(method.map(|m| m.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(CampaignEntry::try_from).transpose()
    }

    /// Appends one point transaction, computing `balance_after` from the
    /// user's latest ledger row inside a single database transaction.
    ///
    /// Concurrent appends for the same user serialize on a per-user
    /// advisory lock, so the running balance chain stays consistent.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::InvalidRequest`] if the balance would
    /// overflow, or a [`GatewayError`] on database failure.
    pub async fn append_point_transaction(
        &self,
        user_id: UserId,
        tx_type: TransactionType,
        amount: i64,
        description: &str,
        metadata: Option<&serde_json::Value>,
    ) -> Result<PointTransaction, GatewayError> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        // Serialize same-user appends; a plain FOR UPDATE would not cover
        // the user's first-ever transaction.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        let previous: Option<i64> = sqlx::query_scalar(
            "SELECT balance_after FROM point_transactions \
             WHERE user_id = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(*user_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_err)?;

        let balance_after = previous
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or_else(|| GatewayError::InvalidRequest("point balance overflow".to_string()))?;

        let row = sqlx::query_as::<_, PointTransactionRow>(
            "INSERT INTO point_transactions \
             (user_id, tx_type, amount, balance_after, description, metadata) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, user_id, tx_type, amount, balance_after, description, metadata, created_at",
        )
        .bind(*user_id.as_uuid())
        .bind(tx_type.as_str())
        .bind(amount)
        .bind(balance_after)
        .bind(description)
        .bind(metadata)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;

        row.try_into()
    }

    /// Fetches the most recent point transactions for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure or when a stored row
    /// fails boundary validation.
    pub async fn user_point_transactions(
        &self,
        user_id: UserId,
        limit: i64,
    ) -> Result<Vec<PointTransaction>, GatewayError> {
        let rows = sqlx::query_as::<_, PointTransactionRow>(
            "SELECT id, user_id, tx_type, amount, balance_after, description, metadata, created_at \
             FROM point_transactions WHERE user_id = $1 ORDER BY id DESC LIMIT $2",
        )
        .bind(*user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(PointTransaction::try_from).collect()
    }

    /// Fetches all point transactions tagged with a campaign in their
    /// metadata, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure or when a stored row
    /// fails boundary validation.
    pub async fn campaign_point_transactions(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Vec<PointTransaction>, GatewayError> {
        let rows = sqlx::query_as::<_, PointTransactionRow>(
            "SELECT id, user_id, tx_type, amount, balance_after, description, metadata, created_at \
             FROM point_transactions WHERE metadata->>'campaign_id' = $1 ORDER BY id DESC",
        )
        .bind(campaign_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        rows.into_iter().map(PointTransaction::try_from).collect()
    }

    /// Overwrites the leaderboard snapshot for its `(campaign, key)`.
    /// A full replace, last write wins.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure.
    pub async fn upsert_leaderboard(
        &self,
        board: &CampaignLeaderboard,
    ) -> Result<(), GatewayError> {
        let entries = serde_json::to_value(&board.entries)
            .map_err(|e| GatewayError::Internal(format!("leaderboard serialization: {e}")))?;

        sqlx::query(
            "INSERT INTO leaderboards \
             (campaign_id, board_key, board_type, movie_id, entries, last_updated) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (campaign_id, board_key) DO UPDATE SET \
             board_type = EXCLUDED.board_type, \
             movie_id = EXCLUDED.movie_id, \
             entries = EXCLUDED.entries, \
             last_updated = EXCLUDED.last_updated",
        )
        .bind(*board.campaign_id.as_uuid())
        .bind(board.board_key())
        .bind(board.board_type.as_str())
        .bind(board.movie_id.map(|m| *m.as_uuid()))
        .bind(entries)
        .bind(board.last_updated)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    /// Reads a leaderboard snapshot verbatim; `None` if never computed.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError`] on database failure or when the stored
    /// row fails boundary validation.
    pub async fn get_leaderboard(
        &self,
        campaign_id: CampaignId,
        board_type: &str,
        movie_id: Option<MovieId>,
    ) -> Result<Option<CampaignLeaderboard>, GatewayError> {
        let row = sqlx::query_as::<_, LeaderboardRow>(
            "SELECT campaign_id, board_type, movie_id, entries, last_updated \
             FROM leaderboards WHERE campaign_id = $1 AND board_key = $2",
        )
        .bind(*campaign_id.as_uuid())
        .bind(board_key(board_type, movie_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.map(CampaignLeaderboard::try_from).transpose()
    }
}

/// Maps a sqlx error into a [`GatewayError`], surfacing Postgres
/// `insufficient_privilege` (42501) as a permission-denied error.
fn map_db_err(e: sqlx::Error) -> GatewayError {
    if let sqlx::Error::Database(db) = &e
        && db.code().as_deref() == Some("42501")
    {
        return GatewayError::PermissionDenied(db.message().to_string());
    }
    GatewayError::PersistenceError(e.to_string())
}
