//! Campaign entries and their revenue/segmentation aggregation.
//!
//! A [`CampaignEntry`] is created at signup time and never deleted; its
//! payment status moves Pending→Paid or Pending→Refunded only.
//! [`EntryStats`] is the pure reduction behind the entry-stats endpoint:
//! revenue totals, tier/method/city/state breakdowns, and a monthly
//! revenue series that counts distinct paying users per month.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{CampaignId, UserId};

/// Bucket label for entries without an explicit fee tier.
pub const DEFAULT_TIER: &str = "default";

/// Bucket label for entries without a recorded payment method.
pub const UNKNOWN_METHOD: &str = "unknown";

/// Payment lifecycle state of a campaign entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Entry recorded, payment not yet settled.
    Pending,
    /// Payment settled.
    Paid,
    /// Payment returned to the user.
    Refunded,
}

impl PaymentStatus {
    /// Returns the status as a static string slice, as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
        }
    }

    /// Parses a stored status string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "refunded" => Some(Self::Refunded),
            _ => None,
        }
    }

    /// Returns `true` if this status may transition to `next`.
    ///
    /// Only Pending→Paid and Pending→Refunded are legal; Paid and Refunded
    /// are terminal.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid) | (Self::Pending, Self::Refunded)
        )
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a paid entry was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Unified Payments Interface.
    Upi,
    /// Direct bank transfer.
    Bank,
    /// Platform wallet balance.
    Wallet,
}

impl PaymentMethod {
    /// Returns the method as a static string slice, as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Bank => "bank",
            Self::Wallet => "wallet",
        }
    }

    /// Parses a stored method string.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upi" => Some(Self::Upi),
            "bank" => Some(Self::Bank),
            "wallet" => Some(Self::Wallet),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user's signup entry into a campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignEntry {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Campaign the entry belongs to.
    pub campaign_id: CampaignId,
    /// The entering user.
    pub user_id: UserId,
    /// Entry fee, currency-agnostic. Absent for free entries.
    pub entry_fee: Option<f64>,
    /// Fee tier label the user entered under.
    pub entry_fee_tier: Option<String>,
    /// Payment lifecycle state.
    pub payment_status: PaymentStatus,
    /// Settlement method, recorded once payment completes.
    pub payment_method: Option<PaymentMethod>,
    /// Self-reported city.
    pub city: Option<String>,
    /// Self-reported state.
    pub state: Option<String>,
    /// Signup timestamp.
    pub joined_at: DateTime<Utc>,
}

/// Input shape for recording a new campaign entry at signup time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampaignEntry {
    /// Campaign the entry belongs to.
    pub campaign_id: CampaignId,
    /// The entering user.
    pub user_id: UserId,
    /// Entry fee, currency-agnostic. Absent for free entries.
    pub entry_fee: Option<f64>,
    /// Fee tier label the user entered under.
    pub entry_fee_tier: Option<String>,
    /// Initial payment status. Defaults to Pending when not supplied.
    pub payment_status: PaymentStatus,
    /// Settlement method, when already known at signup.
    pub payment_method: Option<PaymentMethod>,
    /// Self-reported city.
    pub city: Option<String>,
    /// Self-reported state.
    pub state: Option<String>,
}

/// One month in the revenue time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    /// Calendar month label, e.g. `"Mar 2026"`.
    pub month: String,
    /// Revenue from paid entries that month.
    pub revenue: f64,
    /// Number of distinct users with a paid entry that month.
    pub paying_users: u64,
}

/// Revenue and segmentation statistics over a set of campaign entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryStats {
    /// Number of entry records.
    pub total_entries: u64,
    /// Number of distinct users across all entries.
    pub unique_participants: u64,
    /// Entries with Paid status.
    pub paid_entries: u64,
    /// Entries with Pending status.
    pub pending_entries: u64,
    /// Entries with Refunded status.
    pub refunded_entries: u64,
    /// Sum of fees over Paid entries with a defined fee.
    pub total_revenue: f64,
    /// Mean fee over Paid entries with a defined fee. `0.0` when there
    /// are none.
    pub average_entry_fee: f64,
    /// Revenue per fee tier; entries without a tier bucket under
    /// [`DEFAULT_TIER`].
    pub revenue_by_tier: BTreeMap<String, f64>,
    /// Revenue per payment method; entries without a method bucket under
    /// [`UNKNOWN_METHOD`].
    pub revenue_by_method: BTreeMap<String, f64>,
    /// Entry counts per city; entries without a city are excluded.
    pub entries_by_city: BTreeMap<String, u64>,
    /// Entry counts per state; entries without a state are excluded.
    pub entries_by_state: BTreeMap<String, u64>,
    /// Chronologically ascending monthly revenue series.
    pub monthly_revenue: Vec<MonthlyRevenue>,
}

impl EntryStats {
    /// The canonical all-zero aggregation returned for an empty entry set.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_entries: 0,
            unique_participants: 0,
            paid_entries: 0,
            pending_entries: 0,
            refunded_entries: 0,
            total_revenue: 0.0,
            average_entry_fee: 0.0,
            revenue_by_tier: BTreeMap::new(),
            revenue_by_method: BTreeMap::new(),
            entries_by_city: BTreeMap::new(),
            entries_by_state: BTreeMap::new(),
            monthly_revenue: Vec::new(),
        }
    }
}

/// Reduces campaign entries into [`EntryStats`].
///
/// Revenue figures only count Paid entries with a defined fee. Breakdown
/// maps are `BTreeMap`s so serialized output is deterministic.
#[must_use]
pub fn aggregate_entries(entries: &[CampaignEntry]) -> EntryStats {
    if entries.is_empty() {
        return EntryStats::empty();
    }

    let mut stats = EntryStats::empty();
    stats.total_entries = entries.len() as u64;

    let mut users: HashSet<UserId> = HashSet::new();
    let mut paid_fee_count: u64 = 0;
    // (year, month) -> (revenue, distinct paying users)
    let mut months: BTreeMap<(i32, u32), (f64, HashSet<UserId>)> = BTreeMap::new();

    for entry in entries {
        users.insert(entry.user_id);

        match entry.payment_status {
            PaymentStatus::Paid => stats.paid_entries += 1,
            PaymentStatus::Pending => stats.pending_entries += 1,
            PaymentStatus::Refunded => stats.refunded_entries += 1,
        }

        if let Some(city) = &entry.city {
            *stats.entries_by_city.entry(city.clone()).or_insert(0) += 1;
        }
        if let Some(state) = &entry.state {
            *stats.entries_by_state.entry(state.clone()).or_insert(0) += 1;
        }

        if entry.payment_status != PaymentStatus::Paid {
            continue;
        }

        let key = (entry.joined_at.year(), entry.joined_at.month());
        let month = months.entry(key).or_insert((0.0, HashSet::new()));
        month.1.insert(entry.user_id);

        let Some(fee) = entry.entry_fee else {
            continue;
        };

        paid_fee_count += 1;
        stats.total_revenue += fee;
        month.0 += fee;

        let tier = entry
            .entry_fee_tier
            .clone()
            .unwrap_or_else(|| DEFAULT_TIER.to_string());
        *stats.revenue_by_tier.entry(tier).or_insert(0.0) += fee;

        let method = entry
            .payment_method
            .map_or(UNKNOWN_METHOD.to_string(), |m| m.as_str().to_string());
        *stats.revenue_by_method.entry(method).or_insert(0.0) += fee;
    }

    stats.unique_participants = users.len() as u64;

    #[allow(clippy::cast_precision_loss)]
    if paid_fee_count > 0 {
        stats.average_entry_fee = stats.total_revenue / paid_fee_count as f64;
    }

    stats.monthly_revenue = months
        .into_iter()
        .map(|((year, month), (revenue, paying))| MonthlyRevenue {
            month: month_label(year, month),
            revenue,
            paying_users: paying.len() as u64,
        })
        .collect();

    stats
}

/// Renders a `(year, month)` pair as a `"%b %Y"` label, e.g. `"Mar 2026"`.
fn month_label(year: i32, month: u32) -> String {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let name = NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("Jan");
    format!("{name} {year}")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(
        user_id: UserId,
        fee: Option<f64>,
        status: PaymentStatus,
        joined_at: DateTime<Utc>,
    ) -> CampaignEntry {
        CampaignEntry {
            id: uuid::Uuid::new_v4(),
            campaign_id: CampaignId::new(),
            user_id,
            entry_fee: fee,
            entry_fee_tier: None,
            payment_status: status,
            payment_method: None,
            city: None,
            state: None,
            joined_at,
        }
    }

    fn march(day: u32) -> DateTime<Utc> {
        let Some(ts) = Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).single() else {
            panic!("valid timestamp");
        };
        ts
    }

    #[test]
    fn empty_input_yields_empty_stats() {
        let stats = aggregate_entries(&[]);
        assert_eq!(stats, EntryStats::empty());
    }

    #[test]
    fn revenue_counts_only_paid_entries_with_fee() {
        let user = UserId::new();
        let entries = vec![
            entry(user, Some(100.0), PaymentStatus::Paid, march(1)),
            entry(user, Some(100.0), PaymentStatus::Pending, march(2)),
            entry(user, Some(100.0), PaymentStatus::Refunded, march(3)),
            entry(user, None, PaymentStatus::Paid, march(4)),
        ];
        let stats = aggregate_entries(&entries);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.paid_entries, 2);
        assert_eq!(stats.pending_entries, 1);
        assert_eq!(stats.refunded_entries, 1);
        assert_eq!(stats.total_revenue, 100.0);
        assert_eq!(stats.average_entry_fee, 100.0);
    }

    #[test]
    fn unique_participants_deduplicates_users() {
        let user = UserId::new();
        let entries = vec![
            entry(user, Some(50.0), PaymentStatus::Paid, march(1)),
            entry(user, Some(50.0), PaymentStatus::Paid, march(2)),
            entry(UserId::new(), Some(50.0), PaymentStatus::Paid, march(3)),
        ];
        let stats = aggregate_entries(&entries);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.unique_participants, 2);
    }

    #[test]
    fn missing_tier_and_method_bucket_under_defaults() {
        let mut with_tier = entry(UserId::new(), Some(200.0), PaymentStatus::Paid, march(1));
        with_tier.entry_fee_tier = Some("premium".to_string());
        with_tier.payment_method = Some(PaymentMethod::Upi);
        let without = entry(UserId::new(), Some(100.0), PaymentStatus::Paid, march(2));

        let stats = aggregate_entries(&[with_tier, without]);
        assert_eq!(stats.revenue_by_tier.get("premium"), Some(&200.0));
        assert_eq!(stats.revenue_by_tier.get(DEFAULT_TIER), Some(&100.0));
        assert_eq!(stats.revenue_by_method.get("upi"), Some(&200.0));
        assert_eq!(stats.revenue_by_method.get(UNKNOWN_METHOD), Some(&100.0));
    }

    #[test]
    fn missing_city_is_excluded_not_bucketed() {
        let mut located = entry(UserId::new(), Some(10.0), PaymentStatus::Paid, march(1));
        located.city = Some("Mumbai".to_string());
        located.state = Some("Maharashtra".to_string());
        let unlocated = entry(UserId::new(), Some(10.0), PaymentStatus::Paid, march(2));

        let stats = aggregate_entries(&[located, unlocated]);
        assert_eq!(stats.entries_by_city.len(), 1);
        assert_eq!(stats.entries_by_city.get("Mumbai"), Some(&1));
        assert_eq!(stats.entries_by_state.len(), 1);
    }

    #[test]
    fn monthly_series_counts_distinct_paying_users() {
        let entries = vec![
            entry(UserId::new(), Some(100.0), PaymentStatus::Paid, march(5)),
            entry(UserId::new(), Some(200.0), PaymentStatus::Paid, march(20)),
        ];
        let stats = aggregate_entries(&entries);
        assert_eq!(stats.monthly_revenue.len(), 1);
        let Some(month) = stats.monthly_revenue.first() else {
            panic!("expected one month");
        };
        assert_eq!(month.month, "Mar 2026");
        assert_eq!(month.revenue, 300.0);
        assert_eq!(month.paying_users, 2);
    }

    #[test]
    fn repeat_paying_user_counts_once_per_month() {
        let user = UserId::new();
        let entries = vec![
            entry(user, Some(100.0), PaymentStatus::Paid, march(5)),
            entry(user, Some(100.0), PaymentStatus::Paid, march(6)),
        ];
        let stats = aggregate_entries(&entries);
        let Some(month) = stats.monthly_revenue.first() else {
            panic!("expected one month");
        };
        assert_eq!(month.revenue, 200.0);
        assert_eq!(month.paying_users, 1);
    }

    #[test]
    fn monthly_series_is_chronological() {
        let Some(jan) = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).single() else {
            panic!("valid timestamp");
        };
        let Some(dec) = Utc.with_ymd_and_hms(2025, 12, 10, 0, 0, 0).single() else {
            panic!("valid timestamp");
        };
        let entries = vec![
            entry(UserId::new(), Some(10.0), PaymentStatus::Paid, jan),
            entry(UserId::new(), Some(20.0), PaymentStatus::Paid, dec),
        ];
        let stats = aggregate_entries(&entries);
        let labels: Vec<&str> = stats
            .monthly_revenue
            .iter()
            .map(|m| m.month.as_str())
            .collect();
        assert_eq!(labels, vec!["Dec 2025", "Jan 2026"]);
    }

    #[test]
    fn transition_matrix_only_allows_pending_exits() {
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Paid));
        assert!(PaymentStatus::Pending.can_transition_to(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Refunded));
        assert!(!PaymentStatus::Paid.can_transition_to(PaymentStatus::Pending));
        assert!(!PaymentStatus::Refunded.can_transition_to(PaymentStatus::Paid));
        assert!(!PaymentStatus::Pending.can_transition_to(PaymentStatus::Pending));
    }

    #[test]
    fn status_strings_round_trip() {
        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PaymentStatus::parse("chargeback"), None);
    }

    #[test]
    fn method_strings_round_trip() {
        for method in [PaymentMethod::Upi, PaymentMethod::Bank, PaymentMethod::Wallet] {
            assert_eq!(PaymentMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::parse("card"), None);
    }
}
