//! Client-side page store.

use crate::record::{Section, WikiPage, WikiPageSummary, WikiRevision};
use crate::service::{ServiceError, WikiService};

/// Page state shown by the editor, backed by a [`WikiService`].
///
/// Every operation clears [`error`](Self::error) before calling the
/// service and records the failure there if the call fails. Operations
/// that change pages refresh the page list and make the result the current
/// page.
#[derive(Debug)]
pub struct WikiStore<S> {
    service: S,
    pages: Vec<WikiPageSummary>,
    current_page: Option<WikiPage>,
    is_loading: bool,
    error: Option<ServiceError>,
}

impl<S: WikiService> WikiStore<S> {
    /// Create an empty store.
    #[must_use]
    pub fn new(service: S) -> Self {
        Self {
            service,
            pages: Vec::new(),
            current_page: None,
            is_loading: false,
            error: None,
        }
    }

    /// Page list from the last successful [`load_pages`](Self::load_pages).
    #[must_use]
    pub fn pages(&self) -> &[WikiPageSummary] {
        &self.pages
    }

    /// Page open in the editor.
    #[must_use]
    pub fn current_page(&self) -> Option<&WikiPage> {
        self.current_page.as_ref()
    }

    /// Whether a service call is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Failure of the last operation, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&ServiceError> {
        self.error.as_ref()
    }

    /// Underlying service.
    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Refresh the page list. Failures are only recorded.
    pub fn load_pages(&mut self) {
        if let Ok(pages) = self.call("load_pages", S::list_wiki_pages) {
            self.pages = pages;
        }
    }

    /// Open a page. Failures are only recorded.
    pub fn load_page(&mut self, id: &str) {
        if let Ok(page) = self.call("load_page", |s| s.get_wiki_page(id)) {
            self.current_page = Some(page);
        }
    }

    /// Create a page and open it.
    pub fn create_page(
        &mut self,
        title: &str,
        content: &str,
        tags: Vec<String>,
        section_id: Option<&str>,
    ) -> Result<WikiPage, ServiceError> {
        let page = self.call("create_page", |s| {
            s.create_wiki_page(title, content, &tags, section_id)
        })?;
        Ok(self.open_changed(page))
    }

    /// Save a page and keep it open.
    pub fn update_page(
        &mut self,
        id: &str,
        title: &str,
        content: &str,
        tags: Vec<String>,
        section_id: Option<&str>,
    ) -> Result<WikiPage, ServiceError> {
        let page = self.call("update_page", |s| {
            s.update_wiki_page(id, title, content, &tags, section_id)
        })?;
        Ok(self.open_changed(page))
    }

    /// Delete a page, closing it if it is open.
    pub fn delete_page(&mut self, id: &str) -> Result<(), ServiceError> {
        self.call("delete_page", |s| s.delete_wiki_page(id))?;
        self.load_pages();
        if self.current_page.as_ref().is_some_and(|p| p.id == id) {
            self.current_page = None;
        }
        Ok(())
    }

    /// Search pages. Failures are recorded and yield no results.
    pub fn search_pages(&mut self, query: &str) -> Vec<WikiPageSummary> {
        self.call("search_pages", |s| s.search_wiki_pages(query))
            .unwrap_or_default()
    }

    /// List revisions of a page. Failures are recorded and yield no results.
    pub fn list_revisions(&mut self, page_id: &str) -> Vec<WikiRevision> {
        self.call("list_revisions", |s| s.list_wiki_revisions(page_id))
            .unwrap_or_default()
    }

    /// Restore a revision and open the restored page.
    pub fn restore_revision(
        &mut self,
        page_id: &str,
        revision_id: &str,
    ) -> Result<WikiPage, ServiceError> {
        let page = self.call("restore_revision", |s| {
            s.restore_wiki_revision(page_id, revision_id)
        })?;
        Ok(self.open_changed(page))
    }

    pub fn list_sections(&mut self) -> Result<Vec<Section>, ServiceError> {
        self.call("list_sections", S::list_sections)
    }

    pub fn create_section(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Section, ServiceError> {
        self.call("create_section", |s| s.create_section(name, parent_id))
    }

    pub fn update_section(&mut self, id: &str, name: &str) -> Result<Section, ServiceError> {
        self.call("update_section", |s| s.update_section(id, name))
    }

    pub fn delete_section(&mut self, id: &str) -> Result<(), ServiceError> {
        self.call("delete_section", |s| s.delete_section(id))
    }

    /// Close the open page.
    pub fn clear_current_page(&mut self) {
        self.current_page = None;
    }

    fn open_changed(&mut self, page: WikiPage) -> WikiPage {
        self.load_pages();
        self.current_page = Some(page.clone());
        page
    }

    fn call<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&S) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        self.is_loading = true;
        self.error = None;

        let result = f(&self.service);

        self.is_loading = false;
        if let Err(err) = &result {
            tracing::error!(operation, error = %err, "Wiki service call failed");
            self.error = Some(err.clone());
        }
        result
    }
}
