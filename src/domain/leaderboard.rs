//! Denormalized campaign leaderboards.
//!
//! A [`CampaignLeaderboard`] is a periodically recomputed snapshot keyed by
//! `(campaign, board type, optional movie)`. It is entirely derived data:
//! safe to delete and regenerate from participation records. Updates are
//! full-replace overwrites, last write wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CampaignId, MovieId, UserId};

/// An unranked score submitted to a leaderboard recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardScore {
    /// The scored user.
    pub user_id: UserId,
    /// The user's points.
    pub total_points: i64,
}

/// One ranked row of a leaderboard snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// The ranked user.
    pub user_id: UserId,
    /// The user's points.
    pub total_points: i64,
    /// 1-based rank. Ties receive distinct consecutive ranks in stable
    /// input order, not standard-competition ranking.
    pub rank: u32,
}

/// A full leaderboard snapshot for one `(campaign, type, movie?)` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignLeaderboard {
    /// Campaign the leaderboard belongs to.
    pub campaign_id: CampaignId,
    /// Leaderboard type label (e.g. `"overall"`, `"weekly"`).
    pub board_type: String,
    /// Movie scope for movie-specific boards.
    pub movie_id: Option<MovieId>,
    /// Ranked entries, descending by points.
    pub entries: Vec<LeaderboardEntry>,
    /// When this snapshot was computed.
    pub last_updated: DateTime<Utc>,
}

impl CampaignLeaderboard {
    /// Returns the document key for this snapshot: the board type, with
    /// the movie id appended as `type_movieId` for movie-scoped boards.
    #[must_use]
    pub fn board_key(&self) -> String {
        board_key(&self.board_type, self.movie_id)
    }
}

/// Builds the document key for a `(type, movie?)` pair.
#[must_use]
pub fn board_key(board_type: &str, movie_id: Option<MovieId>) -> String {
    match movie_id {
        Some(movie) => format!("{board_type}_{movie}"),
        None => board_type.to_string(),
    }
}

/// Ranks scores into leaderboard entries: stable descending sort by
/// points, 1-based consecutive ranks.
#[must_use]
pub fn rank_entries(mut scores: Vec<LeaderboardScore>) -> Vec<LeaderboardEntry> {
    scores.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    scores
        .into_iter()
        .enumerate()
        .map(|(idx, score)| LeaderboardEntry {
            user_id: score.user_id,
            total_points: score.total_points,
            rank: idx as u32 + 1,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn score(points: i64) -> LeaderboardScore {
        LeaderboardScore {
            user_id: UserId::new(),
            total_points: points,
        }
    }

    #[test]
    fn ranks_are_dense_and_stable_for_ties() {
        let first_fifty = score(50);
        let second_fifty = score(50);
        let ranked = rank_entries(vec![score(100), first_fifty, second_fifty]);

        let points: Vec<i64> = ranked.iter().map(|e| e.total_points).collect();
        assert_eq!(points, vec![100, 50, 50]);
        let ranks: Vec<u32> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);

        // Ties keep their input order.
        let Some(second) = ranked.get(1) else {
            panic!("expected a second entry");
        };
        assert_eq!(second.user_id, first_fifty.user_id);
    }

    #[test]
    fn empty_scores_rank_to_empty() {
        assert!(rank_entries(Vec::new()).is_empty());
    }

    #[test]
    fn board_key_without_movie_is_bare_type() {
        assert_eq!(board_key("overall", None), "overall");
    }

    #[test]
    fn board_key_with_movie_appends_id() {
        let movie = MovieId::new();
        let key = board_key("movie", Some(movie));
        assert_eq!(key, format!("movie_{movie}"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let board = CampaignLeaderboard {
            campaign_id: CampaignId::new(),
            board_type: "overall".to_string(),
            movie_id: None,
            entries: rank_entries(vec![score(10), score(30)]),
            last_updated: Utc::now(),
        };
        let json = serde_json::to_string(&board).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        let parsed: CampaignLeaderboard = serde_json::from_str(&json).ok().unwrap_or_else(|| {
            panic!("deserialization failed");
        });
        assert_eq!(parsed.entries, board.entries);
    }
}
