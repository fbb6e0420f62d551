//! Persistence service contract.

use crate::record::{Section, WikiPage, WikiPageSummary, WikiRevision};

/// Failure reported by the persistence service.
///
/// The service only reports a message; callers show it as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    message: String,
}

impl ServiceError {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Named operations of the persistence service.
///
/// Listings and search results are ordered by most recently updated first.
pub trait WikiService: Send + Sync {
    /// List all pages without content.
    fn list_wiki_pages(&self) -> Result<Vec<WikiPageSummary>, ServiceError>;

    /// Fetch a page with its content.
    fn get_wiki_page(&self, id: &str) -> Result<WikiPage, ServiceError>;

    /// Create a page, optionally inside a section.
    fn create_wiki_page(
        &self,
        title: &str,
        content: &str,
        tags: &[String],
        section_id: Option<&str>,
    ) -> Result<WikiPage, ServiceError>;

    /// Replace a page's title, content and tags.
    ///
    /// The previous state is kept as a revision. A `None` section leaves
    /// the page's section unchanged.
    fn update_wiki_page(
        &self,
        id: &str,
        title: &str,
        content: &str,
        tags: &[String],
        section_id: Option<&str>,
    ) -> Result<WikiPage, ServiceError>;

    /// Delete a page.
    fn delete_wiki_page(&self, id: &str) -> Result<(), ServiceError>;

    /// Find pages whose title, content or tags contain `query`, ignoring
    /// case.
    fn search_wiki_pages(&self, query: &str) -> Result<Vec<WikiPageSummary>, ServiceError>;

    /// List stored revisions of a page, newest first.
    fn list_wiki_revisions(&self, page_id: &str) -> Result<Vec<WikiRevision>, ServiceError>;

    /// Make a revision the current state of its page.
    ///
    /// The state being replaced is kept as a revision.
    fn restore_wiki_revision(
        &self,
        page_id: &str,
        revision_id: &str,
    ) -> Result<WikiPage, ServiceError>;

    /// List all sections.
    fn list_sections(&self) -> Result<Vec<Section>, ServiceError>;

    /// Create a section, optionally nested in another.
    fn create_section(&self, name: &str, parent_id: Option<&str>) -> Result<Section, ServiceError>;

    /// Rename a section.
    fn update_section(&self, id: &str, name: &str) -> Result<Section, ServiceError>;

    /// Delete a section.
    fn delete_section(&self, id: &str) -> Result<(), ServiceError>;
}
