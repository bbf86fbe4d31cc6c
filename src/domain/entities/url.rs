//! Url entity representing a registered site origin.

use chrono::{DateTime, Utc};

/// A registered site origin (`scheme://host`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Url {
    /// Creates a new Url instance.
    pub fn new(id: i64, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            created_at,
        }
    }
}

/// One row of the URL listing: a Url paired with its most recent check.
///
/// Check fields are `None` when the Url has never been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlListing {
    pub id: i64,
    pub name: String,
    pub last_check_at: Option<DateTime<Utc>>,
    pub last_status_code: Option<i32>,
}

impl UrlListing {
    /// Returns true if the Url has at least one check.
    pub fn is_checked(&self) -> bool {
        self.last_check_at.is_some()
    }
}
