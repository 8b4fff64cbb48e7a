//! Prize distribution tables and tier resolution.
//!
//! A [`PrizeDistribution`] is an admin-authored, immutable ordered list of
//! [`PrizeTier`]s attached to a campaign. [`applicable_tiers`] is a pure,
//! synchronous function of the distribution and the live participant
//! count; it performs no I/O and reads no process-global state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a prize tier pays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrizeType {
    /// Direct cash payout.
    Cash,
    /// A voucher code.
    Voucher,
    /// Platform coupons.
    Coupons,
    /// Anything else (described in the tier text).
    Other,
}

impl PrizeType {
    /// Returns the prize type as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Voucher => "voucher",
            Self::Coupons => "coupons",
            Self::Other => "other",
        }
    }

    /// Parses a prize type string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cash" => Some(Self::Cash),
            "voucher" => Some(Self::Voucher),
            "coupons" => Some(Self::Coupons),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl fmt::Display for PrizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a prize distribution table.
///
/// `rank_end` of `None` means the tier is open-ended ("this rank and
/// above"); the wire-level `-1` sentinel is translated at the DTO
/// boundary and never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeTier {
    /// First rank covered by the tier (1-based).
    pub rank_start: u32,
    /// Last rank covered, or `None` for an open-ended tier.
    pub rank_end: Option<u32>,
    /// Prize amount, currency-agnostic.
    pub prize_amount: f64,
    /// What the tier pays out.
    pub prize_type: PrizeType,
    /// Minimum live participant count for the tier to activate.
    /// `None` means the tier is always active.
    pub min_participants: Option<u32>,
    /// Admin-authored display text.
    pub description: String,
}

impl PrizeTier {
    /// Renders the tier's rank range for display.
    ///
    /// A single rank shows as that number ("5"), an open-ended tier as
    /// "start+" ("1+"), and all others as "start-end" ("1-10").
    #[must_use]
    pub fn rank_label(&self) -> String {
        match self.rank_end {
            None => format!("{}+", self.rank_start),
            Some(end) if end == self.rank_start => self.rank_start.to_string(),
            Some(end) => format!("{}-{}", self.rank_start, end),
        }
    }

    /// Returns `true` if the tier is active at the given participant count.
    #[must_use]
    pub fn is_active(&self, participant_count: u32) -> bool {
        self.min_participants
            .is_none_or(|gate| gate <= participant_count)
    }
}

/// An immutable, ordered prize distribution table for one campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrizeDistribution {
    /// Tiers in admin-authored order.
    pub tiers: Vec<PrizeTier>,
}

/// A tier that is active at the current participant count, annotated with
/// its display rank label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicableTier {
    /// Display rank range ("5", "1+", "1-10").
    pub rank_label: String,
    /// First rank covered by the tier.
    pub rank_start: u32,
    /// Last rank covered, or `None` for an open-ended tier.
    pub rank_end: Option<u32>,
    /// Prize amount.
    pub prize_amount: f64,
    /// What the tier pays out.
    pub prize_type: PrizeType,
    /// Admin-authored display text.
    pub description: String,
}

/// Filters a distribution to the tiers active at `participant_count` and
/// renders their rank labels, preserving the authored tier order.
#[must_use]
pub fn applicable_tiers(
    distribution: &PrizeDistribution,
    participant_count: u32,
) -> Vec<ApplicableTier> {
    distribution
        .tiers
        .iter()
        .filter(|tier| tier.is_active(participant_count))
        .map(|tier| ApplicableTier {
            rank_label: tier.rank_label(),
            rank_start: tier.rank_start,
            rank_end: tier.rank_end,
            prize_amount: tier.prize_amount,
            prize_type: tier.prize_type,
            description: tier.description.clone(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn tier(start: u32, end: Option<u32>, min: Option<u32>) -> PrizeTier {
        PrizeTier {
            rank_start: start,
            rank_end: end,
            prize_amount: 1000.0,
            prize_type: PrizeType::Cash,
            min_participants: min,
            description: "tier".to_string(),
        }
    }

    #[test]
    fn open_ended_tier_renders_plus() {
        assert_eq!(tier(1, None, None).rank_label(), "1+");
    }

    #[test]
    fn single_rank_renders_bare_number() {
        assert_eq!(tier(5, Some(5), None).rank_label(), "5");
    }

    #[test]
    fn range_renders_start_dash_end() {
        assert_eq!(tier(1, Some(10), None).rank_label(), "1-10");
    }

    #[test]
    fn gate_excludes_below_threshold() {
        let distribution = PrizeDistribution {
            tiers: vec![tier(1, Some(3), Some(100))],
        };
        assert!(applicable_tiers(&distribution, 50).is_empty());
        assert_eq!(applicable_tiers(&distribution, 100).len(), 1);
    }

    #[test]
    fn ungated_tiers_always_apply() {
        let distribution = PrizeDistribution {
            tiers: vec![tier(1, Some(1), None), tier(2, Some(10), Some(1000))],
        };
        let active = applicable_tiers(&distribution, 0);
        assert_eq!(active.len(), 1);
        let Some(first) = active.first() else {
            panic!("expected an active tier");
        };
        assert_eq!(first.rank_label, "1");
    }

    #[test]
    fn authored_order_is_preserved() {
        let distribution = PrizeDistribution {
            tiers: vec![
                tier(4, Some(10), None),
                tier(1, Some(1), None),
                tier(2, Some(3), None),
            ],
        };
        let labels: Vec<String> = applicable_tiers(&distribution, 10)
            .into_iter()
            .map(|t| t.rank_label)
            .collect();
        assert_eq!(labels, vec!["4-10", "1", "2-3"]);
    }
}
