//! Participation and entry aggregation DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::campaign_entry::{EntryStats, MonthlyRevenue};
use crate::domain::participation::{ParticipationStats, RankedParticipant};
use crate::domain::{ParentKind, ParentRef};

/// One aggregation target in a batch request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatsTargetDto {
    /// Parent kind: `"campaign"` or `"tournament"`.
    #[schema(value_type = String)]
    pub kind: ParentKind,
    /// Parent identifier.
    pub id: Uuid,
}

impl From<StatsTargetDto> for ParentRef {
    fn from(dto: StatsTargetDto) -> Self {
        Self {
            kind: dto.kind,
            id: dto.id,
        }
    }
}

/// Request body for `POST /stats/participation`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchStatsRequest {
    /// Parents to aggregate, in response order.
    pub targets: Vec<StatsTargetDto>,
}

/// A participant annotated with their rank in the top listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct RankedParticipantDto {
    /// 1-based rank.
    pub rank: u32,
    /// The participating user.
    pub user_id: Uuid,
    /// The user's accumulated points.
    pub total_points: i64,
}

impl From<RankedParticipant> for RankedParticipantDto {
    fn from(p: RankedParticipant) -> Self {
        Self {
            rank: p.rank,
            user_id: *p.user_id.as_uuid(),
            total_points: p.total_points,
        }
    }
}

/// Participation aggregation for one parent.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipationStatsResponse {
    /// Number of participation records.
    pub total_participants: u64,
    /// Sum of points across all records.
    pub total_points: i64,
    /// Mean points per participant; `0` when there are no participants.
    pub average_points: f64,
    /// Sum of predictions across all records.
    pub total_predictions: u64,
    /// Sum of correct predictions across all records.
    pub total_correct_predictions: u64,
    /// Percentage of predictions that were correct; `0` when there are
    /// no predictions.
    pub accuracy_rate: f64,
    /// Top participants by points.
    pub top_participants: Vec<RankedParticipantDto>,
}

impl From<ParticipationStats> for ParticipationStatsResponse {
    fn from(stats: ParticipationStats) -> Self {
        Self {
            total_participants: stats.total_participants,
            total_points: stats.total_points,
            average_points: stats.average_points,
            total_predictions: stats.total_predictions,
            total_correct_predictions: stats.total_correct_predictions,
            accuracy_rate: stats.accuracy_rate,
            top_participants: stats
                .top_participants
                .into_iter()
                .map(RankedParticipantDto::from)
                .collect(),
        }
    }
}

/// One per-target result in a batch aggregation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchStatsItem {
    /// Parent kind string.
    pub kind: String,
    /// Parent identifier.
    pub id: Uuid,
    /// The aggregation (all-zero when the target's fetch failed).
    pub stats: ParticipationStatsResponse,
}

/// Response body for `POST /stats/participation`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BatchStatsResponse {
    /// Per-target aggregations, in request order.
    pub results: Vec<BatchStatsItem>,
}

/// Request body for `POST /participations` (scoring sync).
#[derive(Debug, Deserialize, ToSchema)]
pub struct SyncParticipationRequest {
    /// Parent kind: `"campaign"` or `"tournament"`.
    #[schema(value_type = String)]
    pub kind: ParentKind,
    /// Parent identifier.
    pub parent_id: Uuid,
    /// The participating user.
    pub user_id: Uuid,
    /// Accumulated points.
    pub total_points: i64,
    /// Number of predictions made.
    pub predictions_count: u32,
    /// Number of correct predictions.
    pub correct_predictions: u32,
}

/// One month in the revenue time series.
#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyRevenueDto {
    /// Calendar month label, e.g. `"Mar 2026"`.
    pub month: String,
    /// Revenue from paid entries that month.
    pub revenue: f64,
    /// Distinct users with a paid entry that month.
    pub paying_users: u64,
}

impl From<MonthlyRevenue> for MonthlyRevenueDto {
    fn from(m: MonthlyRevenue) -> Self {
        Self {
            month: m.month,
            revenue: m.revenue,
            paying_users: m.paying_users,
        }
    }
}

/// Entry revenue/segmentation aggregation.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntryStatsResponse {
    /// Number of entry records.
    pub total_entries: u64,
    /// Distinct users across all entries.
    pub unique_participants: u64,
    /// Entries with paid status.
    pub paid_entries: u64,
    /// Entries with pending status.
    pub pending_entries: u64,
    /// Entries with refunded status.
    pub refunded_entries: u64,
    /// Revenue over paid entries with a defined fee.
    pub total_revenue: f64,
    /// Mean fee over paid entries with a defined fee.
    pub average_entry_fee: f64,
    /// Revenue per fee tier.
    pub revenue_by_tier: BTreeMap<String, f64>,
    /// Revenue per payment method.
    pub revenue_by_method: BTreeMap<String, f64>,
    /// Entry counts per city.
    pub entries_by_city: BTreeMap<String, u64>,
    /// Entry counts per state.
    pub entries_by_state: BTreeMap<String, u64>,
    /// Chronologically ascending monthly revenue series.
    pub monthly_revenue: Vec<MonthlyRevenueDto>,
}

impl From<EntryStats> for EntryStatsResponse {
    fn from(stats: EntryStats) -> Self {
        Self {
            total_entries: stats.total_entries,
            unique_participants: stats.unique_participants,
            paid_entries: stats.paid_entries,
            pending_entries: stats.pending_entries,
            refunded_entries: stats.refunded_entries,
            total_revenue: stats.total_revenue,
            average_entry_fee: stats.average_entry_fee,
            revenue_by_tier: stats.revenue_by_tier,
            revenue_by_method: stats.revenue_by_method,
            entries_by_city: stats.entries_by_city,
            entries_by_state: stats.entries_by_state,
            monthly_revenue: stats
                .monthly_revenue
                .into_iter()
                .map(MonthlyRevenueDto::from)
                .collect(),
        }
    }
}
