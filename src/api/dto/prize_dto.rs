//! Prize distribution DTOs.
//!
//! The wire format keeps the admin-facing `-1` sentinel for open-ended
//! rank ranges; it is translated to `Option<u32>` here and never reaches
//! the domain layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::prize::{ApplicableTier, PrizeDistribution, PrizeTier, PrizeType};
use crate::error::GatewayError;

/// Open-ended rank range sentinel used on the wire.
const OPEN_ENDED: i64 = -1;

/// One prize tier as authored by an admin.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PrizeTierDto {
    /// First rank covered by the tier (1-based).
    pub rank_start: u32,
    /// Last rank covered; `-1` means open-ended ("this rank and above").
    pub rank_end: i64,
    /// Prize amount, currency-agnostic.
    pub prize_amount: f64,
    /// Prize type: `"cash"`, `"voucher"`, `"coupons"`, or `"other"`.
    pub prize_type: String,
    /// Minimum live participant count for the tier to activate.
    #[serde(default)]
    pub min_participants: Option<u32>,
    /// Admin-authored display text.
    #[serde(default)]
    pub description: String,
}

impl TryFrom<PrizeTierDto> for PrizeTier {
    type Error = GatewayError;

    fn try_from(dto: PrizeTierDto) -> Result<Self, Self::Error> {
        let rank_end = match dto.rank_end {
            OPEN_ENDED => None,
            end if end >= 0 => Some(u32::try_from(end).map_err(|_| {
                GatewayError::InvalidRequest(format!("rank_end out of range: {end}"))
            })?),
            end => {
                return Err(GatewayError::InvalidRequest(format!(
                    "rank_end must be -1 or non-negative, got {end}"
                )));
            }
        };
        let prize_type = PrizeType::parse(&dto.prize_type).ok_or_else(|| {
            GatewayError::InvalidRequest(format!("unknown prize type: {}", dto.prize_type))
        })?;
        Ok(Self {
            rank_start: dto.rank_start,
            rank_end,
            prize_amount: dto.prize_amount,
            prize_type,
            min_participants: dto.min_participants,
            description: dto.description,
        })
    }
}

/// Request body for `POST /prize-tiers/applicable`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApplicableTiersRequest {
    /// Prize distribution table, in admin-authored order.
    pub tiers: Vec<PrizeTierDto>,
    /// Current live participant count.
    pub participant_count: u32,
}

impl ApplicableTiersRequest {
    /// Validates the request into a typed [`PrizeDistribution`].
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::InvalidRequest`] on a malformed tier.
    pub fn into_distribution(self) -> Result<(PrizeDistribution, u32), GatewayError> {
        let tiers = self
            .tiers
            .into_iter()
            .map(PrizeTier::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((PrizeDistribution { tiers }, self.participant_count))
    }
}

/// An active tier with its display rank label.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicableTierDto {
    /// Display rank range: `"5"`, `"1+"`, or `"1-10"`.
    pub rank_label: String,
    /// First rank covered by the tier.
    pub rank_start: u32,
    /// Last rank covered; `-1` for open-ended tiers.
    pub rank_end: i64,
    /// Prize amount.
    pub prize_amount: f64,
    /// Prize type string.
    pub prize_type: String,
    /// Admin-authored display text.
    pub description: String,
}

impl From<ApplicableTier> for ApplicableTierDto {
    fn from(tier: ApplicableTier) -> Self {
        Self {
            rank_label: tier.rank_label,
            rank_start: tier.rank_start,
            rank_end: tier.rank_end.map_or(OPEN_ENDED, i64::from),
            prize_amount: tier.prize_amount,
            prize_type: tier.prize_type.as_str().to_string(),
            description: tier.description,
        }
    }
}

/// Response body for `POST /prize-tiers/applicable`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicableTiersResponse {
    /// Tiers active at the supplied participant count, in authored order.
    pub applicable_tiers: Vec<ApplicableTierDto>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn dto(rank_start: u32, rank_end: i64) -> PrizeTierDto {
        PrizeTierDto {
            rank_start,
            rank_end,
            prize_amount: 500.0,
            prize_type: "cash".to_string(),
            min_participants: None,
            description: String::new(),
        }
    }

    #[test]
    fn sentinel_maps_to_open_ended() {
        let tier = PrizeTier::try_from(dto(1, -1));
        let Ok(tier) = tier else {
            panic!("expected conversion to succeed");
        };
        assert_eq!(tier.rank_end, None);
        assert_eq!(tier.rank_label(), "1+");
    }

    #[test]
    fn plain_rank_end_maps_to_some() {
        let tier = PrizeTier::try_from(dto(5, 5));
        let Ok(tier) = tier else {
            panic!("expected conversion to succeed");
        };
        assert_eq!(tier.rank_end, Some(5));
    }

    #[test]
    fn other_negative_rank_end_is_rejected() {
        assert!(PrizeTier::try_from(dto(1, -2)).is_err());
    }

    #[test]
    fn unknown_prize_type_is_rejected() {
        let mut bad = dto(1, 3);
        bad.prize_type = "jackpot".to_string();
        assert!(PrizeTier::try_from(bad).is_err());
    }

    #[test]
    fn open_ended_round_trips_back_to_sentinel() {
        let tier = ApplicableTier {
            rank_label: "1+".to_string(),
            rank_start: 1,
            rank_end: None,
            prize_amount: 500.0,
            prize_type: PrizeType::Cash,
            description: String::new(),
        };
        let dto = ApplicableTierDto::from(tier);
        assert_eq!(dto.rank_end, -1);
    }
}
