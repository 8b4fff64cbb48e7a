//! Participation records and their aggregation.
//!
//! A [`Participation`] is one row per (user, campaign-or-tournament) pair,
//! created on the user's first prediction and mutated by the scoring path.
//! [`ParticipationStats`] is the pure reduction used by the stats endpoints:
//! totals, guarded averages, accuracy, and a top-N ranking.

use serde::{Deserialize, Serialize};

use super::UserId;

/// One user's participation in a campaign or tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participation {
    /// The participating user.
    pub user_id: UserId,
    /// Accumulated points. Monotonically non-decreasing in practice,
    /// but not enforced here.
    pub total_points: i64,
    /// Number of predictions the user has made.
    pub predictions_count: u32,
    /// Number of those predictions that scored as correct.
    pub correct_predictions: u32,
}

/// A participant annotated with their 1-based rank in a top-N listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedParticipant {
    /// 1-based position in the ranking.
    pub rank: u32,
    /// The participating user.
    pub user_id: UserId,
    /// The user's accumulated points.
    pub total_points: i64,
}

/// Summary statistics over all participations under one parent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipationStats {
    /// Number of participation records.
    pub total_participants: u64,
    /// Sum of points across all records.
    pub total_points: i64,
    /// Mean points per participant. `0.0` when there are no participants.
    pub average_points: f64,
    /// Sum of predictions across all records.
    pub total_predictions: u64,
    /// Sum of correct predictions across all records.
    pub total_correct_predictions: u64,
    /// Percentage of predictions that were correct. `0.0` when there are
    /// no predictions.
    pub accuracy_rate: f64,
    /// The top participants by points, stable order for ties.
    pub top_participants: Vec<RankedParticipant>,
}

impl ParticipationStats {
    /// The canonical all-zero aggregation, used both for empty parents and
    /// as the substitute for a failed parent in a batch.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_participants: 0,
            total_points: 0,
            average_points: 0.0,
            total_predictions: 0,
            total_correct_predictions: 0,
            accuracy_rate: 0.0,
            top_participants: Vec::new(),
        }
    }
}

/// Reduces participation records into [`ParticipationStats`].
///
/// `top_limit` bounds the `top_participants` listing. The top listing is
/// sorted descending by points with a stable sort, so ties keep their
/// fetch order and receive distinct consecutive ranks.
#[must_use]
pub fn aggregate_participations(
    records: &[Participation],
    top_limit: usize,
) -> ParticipationStats {
    if records.is_empty() {
        return ParticipationStats::empty();
    }

    let total_participants = records.len() as u64;
    let total_points: i64 = records.iter().map(|p| p.total_points).sum();
    let total_predictions: u64 = records.iter().map(|p| u64::from(p.predictions_count)).sum();
    let total_correct_predictions: u64 = records
        .iter()
        .map(|p| u64::from(p.correct_predictions))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let average_points = total_points as f64 / total_participants as f64;

    #[allow(clippy::cast_precision_loss)]
    let accuracy_rate = if total_predictions == 0 {
        0.0
    } else {
        total_correct_predictions as f64 / total_predictions as f64 * 100.0
    };

    let mut ranked: Vec<&Participation> = records.iter().collect();
    ranked.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    let top_participants = ranked
        .into_iter()
        .take(top_limit)
        .enumerate()
        .map(|(idx, p)| RankedParticipant {
            rank: idx as u32 + 1,
            user_id: p.user_id,
            total_points: p.total_points,
        })
        .collect();

    ParticipationStats {
        total_participants,
        total_points,
        average_points,
        total_predictions,
        total_correct_predictions,
        accuracy_rate,
        top_participants,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn participation(points: i64, predictions: u32, correct: u32) -> Participation {
        Participation {
            user_id: UserId::new(),
            total_points: points,
            predictions_count: predictions,
            correct_predictions: correct,
        }
    }

    #[test]
    fn empty_input_yields_zeros_not_nan() {
        let stats = aggregate_participations(&[], 10);
        assert_eq!(stats.total_participants, 0);
        assert_eq!(stats.average_points, 0.0);
        assert_eq!(stats.accuracy_rate, 0.0);
        assert!(stats.top_participants.is_empty());
    }

    #[test]
    fn totals_and_averages() {
        let records = vec![
            participation(100, 10, 5),
            participation(50, 4, 4),
            participation(150, 6, 3),
        ];
        let stats = aggregate_participations(&records, 10);
        assert_eq!(stats.total_participants, 3);
        assert_eq!(stats.total_points, 300);
        assert_eq!(stats.average_points, 100.0);
        assert_eq!(stats.total_predictions, 20);
        assert_eq!(stats.total_correct_predictions, 12);
        assert_eq!(stats.accuracy_rate, 60.0);
    }

    #[test]
    fn zero_predictions_guards_accuracy() {
        let records = vec![participation(100, 0, 0)];
        let stats = aggregate_participations(&records, 10);
        assert_eq!(stats.accuracy_rate, 0.0);
    }

    #[test]
    fn top_listing_is_ranked_descending() {
        let records = vec![
            participation(10, 1, 0),
            participation(30, 1, 0),
            participation(20, 1, 0),
        ];
        let stats = aggregate_participations(&records, 10);
        let points: Vec<i64> = stats
            .top_participants
            .iter()
            .map(|p| p.total_points)
            .collect();
        assert_eq!(points, vec![30, 20, 10]);
        let ranks: Vec<u32> = stats.top_participants.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn ties_keep_fetch_order() {
        let first = participation(50, 1, 0);
        let second = participation(50, 1, 0);
        let records = vec![first.clone(), second.clone()];
        let stats = aggregate_participations(&records, 10);
        let Some(top) = stats.top_participants.first() else {
            panic!("expected a top participant");
        };
        assert_eq!(top.user_id, first.user_id);
        let Some(runner_up) = stats.top_participants.get(1) else {
            panic!("expected a second participant");
        };
        assert_eq!(runner_up.user_id, second.user_id);
    }

    #[test]
    fn top_listing_is_limited() {
        let records: Vec<Participation> =
            (0..25).map(|i| participation(i, 1, 0)).collect();
        let stats = aggregate_participations(&records, 10);
        assert_eq!(stats.top_participants.len(), 10);
    }

    #[test]
    fn top_points_sum_never_exceeds_total() {
        let records: Vec<Participation> =
            (0..25).map(|i| participation(i * 7, 1, 0)).collect();
        let stats = aggregate_participations(&records, 10);
        let top_sum: i64 = stats
            .top_participants
            .iter()
            .map(|p| p.total_points)
            .sum();
        assert!(top_sum <= stats.total_points);
    }
}
