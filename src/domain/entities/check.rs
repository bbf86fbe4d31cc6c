//! Check entity representing one verification run of a Url.

use chrono::{DateTime, Utc};

/// A point-in-time check of a Url: HTTP status and extracted page metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub id: i64,
    pub url_id: i64,
    pub status_code: Option<i32>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording a new check.
///
/// `created_at` is not part of the input; the database assigns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCheck {
    pub status_code: Option<i32>,
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Metadata extracted from a fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewCheck {
    /// Builds the check input from a response status and the page summary.
    pub fn from_page(status_code: u16, summary: PageSummary) -> Self {
        Self {
            status_code: Some(i32::from(status_code)),
            h1: summary.h1,
            title: summary.title,
            description: summary.description,
        }
    }
}
