//! Link entity representing a token → gurt address mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `token` and `target_address` never change after creation. Only
/// `access_count` and `updated_at` move, and only through a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub token: String,
    pub target_address: String,
    pub access_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        token: String,
        target_address: String,
        access_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            token,
            target_address,
            access_count,
            created_at,
            updated_at,
        }
    }
}

/// Input data for inserting a new link.
///
/// The access counter and timestamps are owned by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub token: String,
    pub target_address: String,
}

/// The caller-facing projection of a [`Link`].
///
/// Internal ids, counters and timestamps stay behind the registry boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub token: String,
    pub target_address: String,
}

impl From<Link> for LinkView {
    fn from(link: Link) -> Self {
        Self {
            token: link.token,
            target_address: link.target_address,
        }
    }
}
