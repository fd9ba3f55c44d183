//! History Store
//!
//! Bounded, newest-first log of past analysis results, kept per subject.
//! The registry guards every store behind one lock so prepend-newest and
//! evict-tail stay atomic under concurrent requests.

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;

use crate::error::EngineError;
use crate::models::{AnalysisResult, HistoryEntry};

/// Reference retention bound
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded newest-first log for one subject
#[derive(Debug)]
pub struct HistoryStore {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_id: u64,
}

impl HistoryStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            next_id: 0,
        }
    }

    /// Append a result as the newest entry, evicting from the tail when the
    /// capacity bound is exceeded. Entry ids increase monotonically.
    pub fn record(&mut self, result: AnalysisResult, image_ref: impl Into<String>) -> HistoryEntry {
        self.next_id += 1;
        let entry = HistoryEntry {
            id: self.next_id,
            timestamp: result.analyzed_at,
            result,
            image_ref: image_ref.into(),
        };

        self.entries.push_front(entry.clone());
        self.entries.truncate(self.capacity);
        entry
    }

    /// All retained entries, newest first
    pub fn list(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Result<HistoryEntry, EngineError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("history entry {}", id)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-subject history stores behind a single lock
#[derive(Debug)]
pub struct HistoryRegistry {
    capacity: usize,
    stores: Mutex<HashMap<String, HistoryStore>>,
}

impl HistoryRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            stores: Mutex::new(HashMap::new()),
        }
    }

    pub fn record(
        &self,
        subject: &str,
        result: AnalysisResult,
        image_ref: impl Into<String>,
    ) -> HistoryEntry {
        let mut stores = self.stores.lock();
        stores
            .entry(subject.to_string())
            .or_insert_with(|| HistoryStore::new(self.capacity))
            .record(result, image_ref)
    }

    pub fn list(&self, subject: &str) -> Vec<HistoryEntry> {
        let stores = self.stores.lock();
        stores.get(subject).map(HistoryStore::list).unwrap_or_default()
    }

    pub fn get(&self, subject: &str, id: u64) -> Result<HistoryEntry, EngineError> {
        let stores = self.stores.lock();
        stores
            .get(subject)
            .ok_or_else(|| EngineError::NotFound(format!("history entry {}", id)))?
            .get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assembler;
    use crate::engine::catalog::SymptomCatalog;
    use crate::engine::random::FixedSequence;
    use chrono::Utc;

    fn sample_result() -> AnalysisResult {
        let catalog = SymptomCatalog::standard();
        let symptom = catalog.by_key("normal").unwrap();
        assembler::assemble(symptom, Utc::now(), &mut FixedSequence::new([0.5, 0.5]))
    }

    #[test]
    fn test_record_prepends_newest_first() {
        let mut store = HistoryStore::new(DEFAULT_CAPACITY);

        let first = store.record(sample_result(), "img-1");
        let second = store.record(sample_result(), "img-2");

        let entries = store.list();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, second.id);
        assert_eq!(entries[1].id, first.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut store = HistoryStore::new(50);

        for i in 1..=51 {
            store.record(sample_result(), format!("img-{}", i));
        }

        let entries = store.list();
        assert_eq!(entries.len(), 50);
        // Newest first: entry 51 leads, entry 2 is the oldest survivor.
        assert_eq!(entries[0].id, 51);
        assert_eq!(entries[0].image_ref, "img-51");
        assert_eq!(entries[49].id, 2);
        assert_eq!(entries[49].image_ref, "img-2");
        // Entry 1 was evicted.
        assert!(store.get(1).is_err());
    }

    #[test]
    fn test_get_hit_and_miss() {
        let mut store = HistoryStore::new(10);
        let entry = store.record(sample_result(), "img");

        assert_eq!(store.get(entry.id).unwrap().image_ref, "img");
        let err = store.get(999).unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[test]
    fn test_registry_scopes_by_subject() {
        let registry = HistoryRegistry::new(10);

        registry.record("device-a", sample_result(), "a-1");
        registry.record("device-b", sample_result(), "b-1");
        registry.record("device-a", sample_result(), "a-2");

        assert_eq!(registry.list("device-a").len(), 2);
        assert_eq!(registry.list("device-b").len(), 1);
        assert!(registry.list("device-c").is_empty());
        assert!(registry.get("device-c", 1).is_err());
    }
}
