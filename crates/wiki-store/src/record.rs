//! Records exchanged with the persistence service.
//!
//! Timestamps are milliseconds since the Unix epoch.

use serde::{Deserialize, Serialize};

/// A wiki page with its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPage {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Page list entry without content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiPageSummary {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    #[serde(default)]
    pub section_id: Option<String>,
    pub updated_at: i64,
}

impl From<&WikiPage> for WikiPageSummary {
    fn from(page: &WikiPage) -> Self {
        Self {
            id: page.id.clone(),
            title: page.title.clone(),
            tags: page.tags.clone(),
            section_id: page.section_id.clone(),
            updated_at: page.updated_at,
        }
    }
}

/// A stored earlier state of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WikiRevision {
    pub id: String,
    pub page_id: String,
    /// Page title at the time of the snapshot.
    pub title: String,
    pub created_at: i64,
}

/// A named group of pages. Sections nest through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub created_at: i64,
}
