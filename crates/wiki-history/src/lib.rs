//! Editor history and text editing helpers.
//!
//! - [`EditorHistory`]: bounded, debounced, linear undo/redo over content
//!   snapshots. One instance per editing session; methods take `&mut self`
//!   so callers serialize access.
//! - [`Clock`]: time source for debouncing, injectable for tests
//!   ([`ManualClock`] behind the `mock` feature).
//! - [`wrap_selection`], [`insert_at_cursor`] and [`MarkdownFormat`]: pure
//!   string edits behind the formatting toolbar.

mod clock;
mod editing;
mod history;

#[cfg(any(test, feature = "mock"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use editing::{Edit, MarkdownFormat, insert_at_cursor, wrap_selection};
pub use history::{DEFAULT_CAPACITY, DEFAULT_DEBOUNCE, EditorHistory, HistoryBuilder};
