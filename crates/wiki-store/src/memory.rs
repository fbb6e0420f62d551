//! In-memory persistence service for testing.
//!
//! Provides [`MemoryWikiService`] for unit testing without a backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use crate::record::{Section, WikiPage, WikiPageSummary, WikiRevision};
use crate::service::{ServiceError, WikiService};

#[derive(Debug, Default)]
struct State {
    pages: HashMap<String, WikiPage>,
    /// Revisions per page id, each with the page snapshot it restores.
    revisions: HashMap<String, Vec<(WikiRevision, WikiPage)>>,
    sections: Vec<Section>,
    last_timestamp: i64,
}

impl State {
    /// Wall clock milliseconds, strictly increasing across calls.
    fn tick(&mut self) -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX));
        self.last_timestamp = now.max(self.last_timestamp + 1);
        self.last_timestamp
    }

    fn page_mut(&mut self, id: &str) -> Result<&mut WikiPage, ServiceError> {
        self.pages
            .get_mut(id)
            .ok_or_else(|| ServiceError::new(format!("Page not found: {id}")))
    }

    fn check_section(&self, id: &str) -> Result<(), ServiceError> {
        if self.sections.iter().any(|s| s.id == id) {
            Ok(())
        } else {
            Err(ServiceError::new(format!("Section not found: {id}")))
        }
    }

    fn snapshot(&mut self, page: WikiPage) {
        let revision = WikiRevision {
            id: Uuid::new_v4().simple().to_string(),
            page_id: page.id.clone(),
            title: page.title.clone(),
            created_at: self.tick(),
        };
        self.revisions
            .entry(page.id.clone())
            .or_default()
            .push((revision, page));
    }

    fn summaries<'a>(&self, pages: impl Iterator<Item = &'a WikiPage>) -> Vec<WikiPageSummary> {
        let mut summaries: Vec<_> = pages.map(WikiPageSummary::from).collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        summaries
    }
}

/// In-memory persistence service for testing.
///
/// Page and revision ids are random UUIDs. Timestamps come from the wall
/// clock but never repeat, so ordering by update time is stable even for
/// operations within the same millisecond.
///
/// # Example
///
/// ```ignore
/// use wiki_store::{MemoryWikiService, WikiService};
///
/// let service = MemoryWikiService::new();
/// let page = service.create_wiki_page("Guide", "# Guide", &[], None)?;
/// assert_eq!(service.list_wiki_pages()?.len(), 1);
///
/// service.set_unavailable(true);
/// assert!(service.get_wiki_page(&page.id).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MemoryWikiService {
    state: RwLock<State>,
    unavailable: AtomicBool,
}

impl MemoryWikiService {
    /// Create an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation fail until reset, as if the backend were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn state(&self) -> Result<RwLockWriteGuard<'_, State>, ServiceError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(ServiceError::new("Service unavailable"));
        }
        self.state
            .write()
            .map_err(|_| ServiceError::new("Service state lock poisoned"))
    }
}

impl WikiService for MemoryWikiService {
    fn list_wiki_pages(&self) -> Result<Vec<WikiPageSummary>, ServiceError> {
        let state = self.state()?;
        Ok(state.summaries(state.pages.values()))
    }

    fn get_wiki_page(&self, id: &str) -> Result<WikiPage, ServiceError> {
        Ok(self.state()?.page_mut(id)?.clone())
    }

    fn create_wiki_page(
        &self,
        title: &str,
        content: &str,
        tags: &[String],
        section_id: Option<&str>,
    ) -> Result<WikiPage, ServiceError> {
        let mut state = self.state()?;
        if let Some(section_id) = section_id {
            state.check_section(section_id)?;
        }

        let now = state.tick();
        let page = WikiPage {
            id: Uuid::new_v4().simple().to_string(),
            title: title.to_owned(),
            content: content.to_owned(),
            tags: tags.to_vec(),
            section_id: section_id.map(str::to_owned),
            created_at: now,
            updated_at: now,
        };
        state.pages.insert(page.id.clone(), page.clone());
        Ok(page)
    }

    fn update_wiki_page(
        &self,
        id: &str,
        title: &str,
        content: &str,
        tags: &[String],
        section_id: Option<&str>,
    ) -> Result<WikiPage, ServiceError> {
        let mut state = self.state()?;
        if let Some(section_id) = section_id {
            state.check_section(section_id)?;
        }

        let previous = state.page_mut(id)?.clone();
        state.snapshot(previous);

        let now = state.tick();
        let page = state.page_mut(id)?;
        page.title = title.to_owned();
        page.content = content.to_owned();
        page.tags = tags.to_vec();
        if let Some(section_id) = section_id {
            page.section_id = Some(section_id.to_owned());
        }
        page.updated_at = now;
        Ok(page.clone())
    }

    fn delete_wiki_page(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.state()?;
        state
            .pages
            .remove(id)
            .ok_or_else(|| ServiceError::new(format!("Page not found: {id}")))?;
        state.revisions.remove(id);
        Ok(())
    }

    fn search_wiki_pages(&self, query: &str) -> Result<Vec<WikiPageSummary>, ServiceError> {
        let state = self.state()?;
        let query = query.to_lowercase();
        let matches = state.pages.values().filter(|page| {
            page.title.to_lowercase().contains(&query)
                || page.content.to_lowercase().contains(&query)
                || page.tags.iter().any(|t| t.to_lowercase().contains(&query))
        });
        Ok(state.summaries(matches))
    }

    fn list_wiki_revisions(&self, page_id: &str) -> Result<Vec<WikiRevision>, ServiceError> {
        let state = self.state()?;
        let mut revisions: Vec<WikiRevision> = state
            .revisions
            .get(page_id)
            .map(|entries| entries.iter().map(|(rev, _)| rev.clone()).collect())
            .unwrap_or_default();
        revisions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(revisions)
    }

    fn restore_wiki_revision(
        &self,
        page_id: &str,
        revision_id: &str,
    ) -> Result<WikiPage, ServiceError> {
        let mut state = self.state()?;
        let restored = state
            .revisions
            .get(page_id)
            .and_then(|entries| entries.iter().find(|(rev, _)| rev.id == revision_id))
            .map(|(_, page)| page.clone())
            .ok_or_else(|| ServiceError::new("Revision not found"))?;

        let current = state.page_mut(page_id)?.clone();
        state.snapshot(current);

        let now = state.tick();
        let page = state.page_mut(page_id)?;
        *page = WikiPage {
            updated_at: now,
            ..restored
        };
        Ok(page.clone())
    }

    fn list_sections(&self) -> Result<Vec<Section>, ServiceError> {
        Ok(self.state()?.sections.clone())
    }

    fn create_section(&self, name: &str, parent_id: Option<&str>) -> Result<Section, ServiceError> {
        let mut state = self.state()?;
        if let Some(parent_id) = parent_id {
            state.check_section(parent_id)?;
        }

        let section = Section {
            id: Uuid::new_v4().simple().to_string(),
            name: name.to_owned(),
            parent_id: parent_id.map(str::to_owned),
            created_at: state.tick(),
        };
        state.sections.push(section.clone());
        Ok(section)
    }

    fn update_section(&self, id: &str, name: &str) -> Result<Section, ServiceError> {
        let mut state = self.state()?;
        let section = state
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::new(format!("Section not found: {id}")))?;
        section.name = name.to_owned();
        Ok(section.clone())
    }

    /// Child sections move up to the deleted section's parent and its pages
    /// become unsectioned.
    fn delete_section(&self, id: &str) -> Result<(), ServiceError> {
        let mut state = self.state()?;
        let index = state
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| ServiceError::new(format!("Section not found: {id}")))?;
        let removed = state.sections.remove(index);

        for child in &mut state.sections {
            if child.parent_id.as_deref() == Some(id) {
                child.parent_id.clone_from(&removed.parent_id);
            }
        }
        for page in state.pages.values_mut() {
            if page.section_id.as_deref() == Some(id) {
                page.section_id = None;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|&t| t.to_owned()).collect()
    }

    #[test]
    fn test_create_and_get() {
        let service = MemoryWikiService::new();
        let page = service
            .create_wiki_page("Guide", "# Guide", &tags(&["docs"]), None)
            .unwrap();

        assert_eq!(page.created_at, page.updated_at);
        assert_eq!(service.get_wiki_page(&page.id).unwrap(), page);
    }

    #[test]
    fn test_get_missing_page() {
        let service = MemoryWikiService::new();
        let err = service.get_wiki_page("nope").unwrap_err();
        assert_eq!(err.message(), "Page not found: nope");
    }

    #[test]
    fn test_list_newest_first() {
        let service = MemoryWikiService::new();
        let first = service.create_wiki_page("First", "", &[], None).unwrap();
        let second = service.create_wiki_page("Second", "", &[], None).unwrap();
        service
            .update_wiki_page(&first.id, "First v2", "", &[], None)
            .unwrap();

        let ids: Vec<_> = service
            .list_wiki_pages()
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_update_keeps_revision() {
        let service = MemoryWikiService::new();
        let page = service.create_wiki_page("Draft", "v1", &[], None).unwrap();
        let updated = service
            .update_wiki_page(&page.id, "Final", "v2", &[], None)
            .unwrap();

        assert_eq!(updated.created_at, page.created_at);
        assert!(updated.updated_at > page.updated_at);

        let revisions = service.list_wiki_revisions(&page.id).unwrap();
        assert_eq!(revisions.len(), 1);
        assert_eq!(revisions[0].title, "Draft");
        assert_eq!(revisions[0].page_id, page.id);
    }

    #[test]
    fn test_update_without_section_keeps_section() {
        let service = MemoryWikiService::new();
        let section = service.create_section("Ops", None).unwrap();
        let page = service
            .create_wiki_page("Runbook", "", &[], Some(&section.id))
            .unwrap();
        let updated = service
            .update_wiki_page(&page.id, "Runbook", "steps", &[], None)
            .unwrap();
        assert_eq!(updated.section_id, Some(section.id));
    }

    #[test]
    fn test_create_in_missing_section() {
        let service = MemoryWikiService::new();
        assert!(service.create_wiki_page("x", "", &[], Some("nope")).is_err());
        assert!(service.list_wiki_pages().unwrap().is_empty());
    }

    #[test]
    fn test_restore_snapshots_current_state() {
        let service = MemoryWikiService::new();
        let page = service.create_wiki_page("T", "one", &[], None).unwrap();
        service.update_wiki_page(&page.id, "T", "two", &[], None).unwrap();

        let revision = service.list_wiki_revisions(&page.id).unwrap().remove(0);
        let restored = service
            .restore_wiki_revision(&page.id, &revision.id)
            .unwrap();
        assert_eq!(restored.content, "one");

        let revisions = service.list_wiki_revisions(&page.id).unwrap();
        assert_eq!(revisions.len(), 2);
        // Newest revision holds the state that was replaced
        let undo = service
            .restore_wiki_revision(&page.id, &revisions[0].id)
            .unwrap();
        assert_eq!(undo.content, "two");
    }

    #[test]
    fn test_restore_missing_revision() {
        let service = MemoryWikiService::new();
        let page = service.create_wiki_page("T", "", &[], None).unwrap();
        let err = service.restore_wiki_revision(&page.id, "nope").unwrap_err();
        assert_eq!(err.message(), "Revision not found");
        assert!(service.list_wiki_revisions(&page.id).unwrap().is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let service = MemoryWikiService::new();
        service
            .create_wiki_page("Deploy Guide", "", &[], None)
            .unwrap();
        service
            .create_wiki_page("Other", "how to DEPLOY", &[], None)
            .unwrap();
        service
            .create_wiki_page("Tagged", "", &tags(&["Deployment"]), None)
            .unwrap();
        service.create_wiki_page("Unrelated", "", &[], None).unwrap();

        let titles: Vec<_> = service
            .search_wiki_pages("deploy")
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Tagged", "Other", "Deploy Guide"]);
    }

    #[test]
    fn test_delete_page() {
        let service = MemoryWikiService::new();
        let page = service.create_wiki_page("T", "", &[], None).unwrap();
        service.delete_wiki_page(&page.id).unwrap();
        assert!(service.get_wiki_page(&page.id).is_err());
        assert!(service.delete_wiki_page(&page.id).is_err());
    }

    #[test]
    fn test_sections() {
        let service = MemoryWikiService::new();
        let root = service.create_section("Engineering", None).unwrap();
        let child = service.create_section("Backend", Some(&root.id)).unwrap();
        assert!(service.create_section("Orphan", Some("nope")).is_err());

        let renamed = service.update_section(&child.id, "Services").unwrap();
        assert_eq!(renamed.name, "Services");

        let page = service
            .create_wiki_page("API", "", &[], Some(&root.id))
            .unwrap();
        service.delete_section(&root.id).unwrap();

        let sections = service.list_sections().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].parent_id, None);
        assert_eq!(service.get_wiki_page(&page.id).unwrap().section_id, None);
    }

    #[test]
    fn test_unavailable() {
        let service = MemoryWikiService::new();
        service.set_unavailable(true);
        assert_eq!(
            service.list_wiki_pages().unwrap_err().message(),
            "Service unavailable"
        );
        service.set_unavailable(false);
        assert!(service.list_wiki_pages().is_ok());
    }
}
