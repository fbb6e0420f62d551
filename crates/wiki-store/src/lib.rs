//! Wiki page persistence for the editor.
//!
//! Pages, revisions and sections live in an external persistence service
//! reached through a fixed set of named operations. This crate provides:
//!
//! - [`WikiService`] trait with those operations and the record types they
//!   exchange
//! - [`WikiStore`], the client-side state the editor reads: the page list,
//!   the open page, a loading flag and the last error
//! - [`MemoryWikiService`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use wiki_store::{MemoryWikiService, WikiStore};
//!
//! let mut store = WikiStore::new(MemoryWikiService::new());
//! store.create_page("Runbook", "# Runbook", vec!["ops".to_owned()], None)?;
//! store.load_pages();
//! assert_eq!(store.pages().len(), 1);
//! ```

#[cfg(any(test, feature = "mock"))]
mod memory;
mod record;
mod service;
mod store;

#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryWikiService;
pub use record::{Section, WikiPage, WikiPageSummary, WikiRevision};
pub use service::{ServiceError, WikiService};
pub use store::WikiStore;
