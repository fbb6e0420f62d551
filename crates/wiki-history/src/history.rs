//! Linear undo/redo history of content snapshots.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use wiki_config::HistoryConfig;

use crate::clock::{Clock, SystemClock};

/// Default number of retained snapshots.
pub const DEFAULT_CAPACITY: usize = 100;

/// Default minimum time between two recorded snapshots.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Bounded, debounced undo/redo history for one editing session.
///
/// Snapshots form a line, not a tree: saving after an undo drops every
/// snapshot that could have been redone. A save is ignored when it comes
/// within the debounce window of the previous accepted save, or when it
/// equals the current snapshot. When the history grows past its capacity
/// the oldest snapshot is dropped.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wiki_history::EditorHistory;
///
/// let mut history = EditorHistory::builder()
///     .debounce(Duration::ZERO)
///     .build("draft");
///
/// history.save("draft, revised");
/// assert_eq!(history.undo(), Some("draft"));
/// assert_eq!(history.redo(), Some("draft, revised"));
/// assert_eq!(history.redo(), None);
/// ```
pub struct EditorHistory {
    entries: VecDeque<String>,
    cursor: Option<usize>,
    capacity: usize,
    debounce: Duration,
    last_save: Option<Instant>,
    clock: Arc<dyn Clock>,
}

impl EditorHistory {
    /// Create a history with default settings, seeded with `initial`.
    ///
    /// An empty `initial` string leaves the history empty.
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self::builder().build(initial)
    }

    /// Start configuring a history.
    #[must_use]
    pub fn builder() -> HistoryBuilder {
        HistoryBuilder::default()
    }

    /// Create a history from configuration, seeded with `initial`.
    #[must_use]
    pub fn from_config(config: &HistoryConfig, initial: &str) -> Self {
        Self::builder()
            .capacity(config.capacity)
            .debounce(config.debounce())
            .build(initial)
    }

    /// Record a snapshot.
    ///
    /// Returns whether the snapshot was recorded. Debounced and duplicate
    /// saves leave the history untouched.
    pub fn save(&mut self, content: &str) -> bool {
        let now = self.clock.now();
        if let Some(last) = self.last_save
            && now.saturating_duration_since(last) < self.debounce
        {
            tracing::debug!("Save ignored: inside debounce window");
            return false;
        }

        if self.current() == Some(content) {
            tracing::debug!("Save ignored: content unchanged");
            return false;
        }

        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push_back(content.to_owned());
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            tracing::debug!(capacity = self.capacity, "Evicted oldest snapshot");
        }
        self.cursor = Some(self.entries.len() - 1);
        self.last_save = Some(now);
        true
    }

    /// Step back one snapshot and return it.
    ///
    /// Returns `None` when already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&str> {
        let cursor = self.cursor.filter(|&cursor| cursor > 0)? - 1;
        self.cursor = Some(cursor);
        self.entries.get(cursor).map(String::as_str)
    }

    /// Step forward one snapshot and return it.
    ///
    /// Returns `None` when already at the newest snapshot.
    pub fn redo(&mut self) -> Option<&str> {
        let cursor = self.cursor? + 1;
        let entry = self.entries.get(cursor)?;
        self.cursor = Some(cursor);
        Some(entry.as_str())
    }

    /// Whether [`undo`](Self::undo) would return a snapshot.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    /// Whether [`redo`](Self::redo) would return a snapshot.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Replace the whole history with a single snapshot.
    ///
    /// Use when switching to a different document.
    pub fn reset(&mut self, content: &str) {
        self.entries.clear();
        self.entries.push_back(content.to_owned());
        self.cursor = Some(0);
    }

    /// The current snapshot, if any.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.cursor?).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EditorHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for EditorHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorHistory")
            .field("len", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("capacity", &self.capacity)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

/// Builder for [`EditorHistory`].
pub struct HistoryBuilder {
    capacity: usize,
    debounce: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for HistoryBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            debounce: DEFAULT_DEBOUNCE,
            clock: Arc::new(SystemClock),
        }
    }
}

impl HistoryBuilder {
    /// Maximum number of retained snapshots (at least 1).
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Minimum time between two recorded snapshots.
    #[must_use]
    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Time source used for debouncing.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the history, seeded with `initial` unless it is empty.
    #[must_use]
    pub fn build(self, initial: &str) -> EditorHistory {
        let (entries, cursor) = if initial.is_empty() {
            (VecDeque::new(), None)
        } else {
            (VecDeque::from([initial.to_owned()]), Some(0))
        };

        EditorHistory {
            entries,
            cursor,
            capacity: self.capacity,
            debounce: self.debounce,
            last_save: None,
            clock: self.clock,
        }
    }
}
