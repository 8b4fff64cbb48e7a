//! Per-connection subscription manager.
//!
//! Tracks which campaign IDs a WebSocket client is subscribed to and
//! provides server-side event filtering. Events without a campaign
//! association (rejected writes, untagged ledger appends) only reach
//! wildcard subscribers.

use std::collections::HashSet;

use crate::domain::CampaignId;

/// Manages the set of campaign subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed campaign IDs. If `subscribe_all` is true, this set is
    /// ignored.
    campaign_ids: HashSet<CampaignId>,
    /// Whether the client subscribes to all events (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds campaign IDs to the subscription set. `"*"` enables the
    /// wildcard.
    pub fn subscribe(&mut self, ids: &[CampaignId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for id in ids {
            self.campaign_ids.insert(*id);
        }
    }

    /// Removes campaign IDs from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[CampaignId]) {
        for id in ids {
            self.campaign_ids.remove(id);
        }
    }

    /// Returns `true` if an event with the given campaign association
    /// matches the subscription filter.
    #[must_use]
    pub fn matches(&self, campaign_id: Option<CampaignId>) -> bool {
        if self.subscribe_all {
            return true;
        }
        campaign_id.is_some_and(|id| self.campaign_ids.contains(&id))
    }

    /// Returns the number of explicitly subscribed campaign IDs.
    #[must_use]
    pub fn count(&self) -> usize {
        self.campaign_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(Some(CampaignId::new())));
        assert!(!mgr.matches(None));
    }

    #[test]
    fn subscribe_specific_campaign() {
        let mut mgr = SubscriptionManager::new();
        let id = CampaignId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(Some(id)));
        assert!(!mgr.matches(Some(CampaignId::new())));
    }

    #[test]
    fn wildcard_matches_everything() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[], true);
        assert!(mgr.matches(Some(CampaignId::new())));
        assert!(mgr.matches(None));
    }

    #[test]
    fn unassociated_events_need_wildcard() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&[CampaignId::new()], false);
        assert!(!mgr.matches(None));
    }

    #[test]
    fn unsubscribe_removes_campaign() {
        let mut mgr = SubscriptionManager::new();
        let id = CampaignId::new();
        mgr.subscribe(&[id], false);
        assert!(mgr.matches(Some(id)));
        mgr.unsubscribe(&[id]);
        assert!(!mgr.matches(Some(id)));
    }

    #[test]
    fn count_tracks_explicit() {
        let mut mgr = SubscriptionManager::new();
        assert_eq!(mgr.count(), 0);
        mgr.subscribe(&[CampaignId::new(), CampaignId::new()], false);
        assert_eq!(mgr.count(), 2);
    }
}
