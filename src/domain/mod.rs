//! Domain layer: core types, pure aggregation, and the event system.
//!
//! This module contains the platform's domain model: typed identifiers,
//! participation and entry records with their pure reductions, the prize
//! tier resolver, the point ledger row, leaderboard ranking, and the
//! broadcast event bus.

pub mod campaign_entry;
pub mod event_bus;
pub mod ids;
pub mod leaderboard;
pub mod participation;
pub mod platform_event;
pub mod point_transaction;
pub mod prize;

pub use event_bus::EventBus;
pub use ids::{CampaignId, MovieId, ParentKind, ParentRef, UserId};
pub use platform_event::PlatformEvent;
