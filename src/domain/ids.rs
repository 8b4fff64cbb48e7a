//! Type-safe identifiers for campaigns, tournaments, users, and movies.
//!
//! Each identifier is a newtype wrapper around [`uuid::Uuid`] so that the
//! different ID spaces cannot be confused with one another. [`ParentRef`]
//! addresses the two kinds of participation parents (fantasy campaigns and
//! cricket tournaments) under which participation records live.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Creates a new random identifier (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Creates an identifier from an existing [`uuid::Uuid`].
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner [`uuid::Uuid`].
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id! {
    /// Unique identifier for a fantasy campaign.
    CampaignId
}

uuid_id! {
    /// Unique identifier for a platform user.
    UserId
}

uuid_id! {
    /// Unique identifier for a movie (movie-scoped leaderboards).
    MovieId
}

/// The kind of parent a participation record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentKind {
    /// A fantasy campaign (movies fantasy game).
    Campaign,
    /// A cricket tournament (cricket prediction game).
    Tournament,
}

impl ParentKind {
    /// Returns the kind as a static string slice, as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Campaign => "campaign",
            Self::Tournament => "tournament",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a participation parent: a campaign or a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentRef {
    /// Which collection the parent lives in.
    pub kind: ParentKind,
    /// The parent document identifier.
    pub id: uuid::Uuid,
}

impl ParentRef {
    /// Creates a campaign parent reference.
    #[must_use]
    pub const fn campaign(id: CampaignId) -> Self {
        Self {
            kind: ParentKind::Campaign,
            id: *id.as_uuid(),
        }
    }

    /// Creates a tournament parent reference.
    #[must_use]
    pub const fn tournament(id: uuid::Uuid) -> Self {
        Self {
            kind: ParentKind::Tournament,
            id,
        }
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        let a = CampaignId::new();
        let b = CampaignId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_uuid_format() {
        let id = UserId::new();
        let s = format!("{id}");
        assert_eq!(s.len(), 36); // UUID string length
        assert!(s.contains('-'));
    }

    #[test]
    fn serde_round_trip() {
        let id = CampaignId::new();
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        let deserialized: CampaignId = serde_json::from_str(&json).ok().unwrap_or_else(|| {
            panic!("deserialization failed");
        });
        assert_eq!(id, deserialized);
    }

    #[test]
    fn from_uuid_round_trip() {
        let uuid = uuid::Uuid::new_v4();
        let id = MovieId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = UserId::new();
        let mut map = HashMap::new();
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }

    #[test]
    fn parent_kind_strings_match_collections() {
        assert_eq!(ParentKind::Campaign.as_str(), "campaign");
        assert_eq!(ParentKind::Tournament.as_str(), "tournament");
    }

    #[test]
    fn parent_ref_display_includes_kind() {
        let parent = ParentRef::campaign(CampaignId::new());
        let s = format!("{parent}");
        assert!(s.starts_with("campaign/"));
    }
}
