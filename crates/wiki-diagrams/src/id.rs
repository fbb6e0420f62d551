//! Identifier generators for diagram container elements.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique identifiers for diagram elements.
///
/// Shared between renders, possibly from several threads at once.
pub trait DiagramIdGenerator: Send + Sync {
    /// Next identifier. Never repeats for the lifetime of the generator.
    fn next_id(&self) -> String;
}

/// Monotonic counter, deterministic across runs.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter starting at `first`.
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl DiagramIdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl DiagramIdGenerator for RandomIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::starting_at(5);
        assert_eq!(ids.next_id(), "5");
        assert_eq!(ids.next_id(), "6");
    }

    #[test]
    fn test_sequential_ids_unique_across_threads() {
        let ids = Arc::new(SequentialIds::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = Arc::clone(&ids);
                thread::spawn(move || (0..100).map(|_| ids.next_id()).collect::<Vec<_>>())
            })
            .collect();

        let all: HashSet<String> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        assert_eq!(all.len(), 400);
    }

    #[test]
    fn test_random_ids_differ() {
        let ids = RandomIds;
        let first = ids.next_id();
        assert_ne!(first, ids.next_id());
        assert_eq!(first.len(), 32);
    }
}
