//! Shared DTO types used across multiple endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// Optional campaign scope for aggregation endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CampaignScopeParams {
    /// Campaign to scope the aggregation to; absent means platform-wide.
    pub campaign_id: Option<uuid::Uuid>,
}

/// History page size for ledger reads.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct LimitParams {
    /// Maximum number of rows to return. Falls back to the configured
    /// default and is clamped to the configured maximum.
    pub limit: Option<u32>,
}

/// Movie scope for movie-specific leaderboards.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MovieScopeParams {
    /// Movie the leaderboard is scoped to, for movie boards.
    pub movie_id: Option<uuid::Uuid>,
}
