//! Leaderboard DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::leaderboard::{CampaignLeaderboard, LeaderboardEntry, LeaderboardScore};

/// One unranked score in a leaderboard update.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ScoreDto {
    /// The scored user.
    pub user_id: Uuid,
    /// The user's points.
    pub total_points: i64,
}

impl From<ScoreDto> for LeaderboardScore {
    fn from(dto: ScoreDto) -> Self {
        Self {
            user_id: UserId::from_uuid(dto.user_id),
            total_points: dto.total_points,
        }
    }
}

/// Request body for `PUT /campaigns/{id}/leaderboards/{board_type}`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLeaderboardRequest {
    /// Movie scope for movie-specific boards.
    #[serde(default)]
    pub movie_id: Option<Uuid>,
    /// Scores to rank. Callers supply the full entry set; the update is
    /// a complete replace, not an increment.
    pub entries: Vec<ScoreDto>,
}

/// One ranked row of a leaderboard snapshot.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntryDto {
    /// The ranked user.
    pub user_id: Uuid,
    /// The user's points.
    pub total_points: i64,
    /// 1-based rank.
    pub rank: u32,
}

impl From<LeaderboardEntry> for LeaderboardEntryDto {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: *entry.user_id.as_uuid(),
            total_points: entry.total_points,
            rank: entry.rank,
        }
    }
}

/// A full leaderboard snapshot.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardResponse {
    /// Campaign the leaderboard belongs to.
    pub campaign_id: Uuid,
    /// Leaderboard type label.
    pub board_type: String,
    /// Movie scope, when present.
    pub movie_id: Option<Uuid>,
    /// Ranked entries, descending by points.
    pub entries: Vec<LeaderboardEntryDto>,
    /// When this snapshot was computed.
    pub last_updated: DateTime<Utc>,
}

impl From<CampaignLeaderboard> for LeaderboardResponse {
    fn from(board: CampaignLeaderboard) -> Self {
        Self {
            campaign_id: *board.campaign_id.as_uuid(),
            board_type: board.board_type,
            movie_id: board.movie_id.map(|m| *m.as_uuid()),
            entries: board
                .entries
                .into_iter()
                .map(LeaderboardEntryDto::from)
                .collect(),
            last_updated: board.last_updated,
        }
    }
}
