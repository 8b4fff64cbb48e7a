//! Campaign entry DTOs for create, payment update, and read operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::campaign_entry::{
    CampaignEntry, NewCampaignEntry, PaymentMethod, PaymentStatus,
};
use crate::domain::{CampaignId, UserId};
use crate::error::GatewayError;

/// Request body for `POST /entries`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    /// Campaign the entry belongs to.
    pub campaign_id: Uuid,
    /// The entering user.
    pub user_id: Uuid,
    /// Entry fee, currency-agnostic. Absent for free entries.
    #[serde(default)]
    pub entry_fee: Option<f64>,
    /// Fee tier label.
    #[serde(default)]
    pub entry_fee_tier: Option<String>,
    /// Initial payment status; defaults to `"pending"`.
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Settlement method, when already known at signup.
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Self-reported city.
    #[serde(default)]
    pub city: Option<String>,
    /// Self-reported state.
    #[serde(default)]
    pub state: Option<String>,
}

impl TryFrom<CreateEntryRequest> for NewCampaignEntry {
    type Error = GatewayError;

    fn try_from(req: CreateEntryRequest) -> Result<Self, Self::Error> {
        let payment_status = match req.payment_status.as_deref() {
            None => PaymentStatus::Pending,
            Some(status) => PaymentStatus::parse(status).ok_or_else(|| {
                GatewayError::InvalidRequest(format!("unknown payment status: {status}"))
            })?,
        };
        let payment_method = req
            .payment_method
            .as_deref()
            .map(|method| {
                PaymentMethod::parse(method).ok_or_else(|| {
                    GatewayError::InvalidRequest(format!("unknown payment method: {method}"))
                })
            })
            .transpose()?;
        Ok(Self {
            campaign_id: CampaignId::from_uuid(req.campaign_id),
            user_id: UserId::from_uuid(req.user_id),
            entry_fee: req.entry_fee,
            entry_fee_tier: req.entry_fee_tier,
            payment_status,
            payment_method,
            city: req.city,
            state: req.state,
        })
    }
}

/// Request body for `PATCH /entries/{id}/payment`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    /// Target status: `"paid"` or `"refunded"`.
    pub status: String,
    /// Settlement method, recorded on the transition when supplied.
    #[serde(default)]
    pub method: Option<String>,
}

/// A stored campaign entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct EntryResponse {
    /// Entry identifier.
    pub id: Uuid,
    /// Campaign the entry belongs to.
    pub campaign_id: Uuid,
    /// The entering user.
    pub user_id: Uuid,
    /// Entry fee, when present.
    pub entry_fee: Option<f64>,
    /// Fee tier label, when present.
    pub entry_fee_tier: Option<String>,
    /// Payment status string.
    pub payment_status: String,
    /// Payment method string, when present.
    pub payment_method: Option<String>,
    /// Self-reported city.
    pub city: Option<String>,
    /// Self-reported state.
    pub state: Option<String>,
    /// Signup timestamp.
    pub joined_at: DateTime<Utc>,
}

impl From<CampaignEntry> for EntryResponse {
    fn from(entry: CampaignEntry) -> Self {
        Self {
            id: entry.id,
            campaign_id: *entry.campaign_id.as_uuid(),
            user_id: *entry.user_id.as_uuid(),
            entry_fee: entry.entry_fee,
            entry_fee_tier: entry.entry_fee_tier,
            payment_status: entry.payment_status.to_string(),
            payment_method: entry.payment_method.map(|m| m.as_str().to_string()),
            city: entry.city,
            state: entry.state,
            joined_at: entry.joined_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn missing_status_defaults_to_pending() {
        let req = CreateEntryRequest {
            campaign_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_fee: Some(99.0),
            entry_fee_tier: None,
            payment_status: None,
            payment_method: None,
            city: None,
            state: None,
        };
        let entry = NewCampaignEntry::try_from(req);
        let Ok(entry) = entry else {
            panic!("expected conversion to succeed");
        };
        assert_eq!(entry.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let req = CreateEntryRequest {
            campaign_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_fee: None,
            entry_fee_tier: None,
            payment_status: Some("chargeback".to_string()),
            payment_method: None,
            city: None,
            state: None,
        };
        assert!(NewCampaignEntry::try_from(req).is_err());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let req = CreateEntryRequest {
            campaign_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            entry_fee: None,
            entry_fee_tier: None,
            payment_status: None,
            payment_method: Some("card".to_string()),
            city: None,
            state: None,
        };
        assert!(NewCampaignEntry::try_from(req).is_err());
    }
}
