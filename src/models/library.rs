// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! The saved-image library: an ordered, index-addressed collection of
//! document records, persisted as a single JSON document.
//!
//! There is no delete; the only write path is `upsert`, which either replaces
//! an entry in place or appends a new one. Unreadable or malformed persisted
//! data yields an empty library so the user can still start fresh.

use super::record::DocumentRecord;
use crate::io::store::StoreBackend;
use anyhow::Result;

#[derive(Debug, Default)]
pub struct Library {
    records: Vec<DocumentRecord>,
}

impl Library {
    /// Deserialize the library from the store, failing open to empty.
    pub fn load(store: &dyn StoreBackend) -> Self {
        let value = match store.read() {
            Ok(Some(value)) => value,
            Ok(None) => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read saved library, starting empty: {}", e);
                return Self::default();
            }
        };

        match serde_json::from_str(&value) {
            Ok(records) => Self { records },
            Err(e) => {
                log::warn!("Malformed saved library, starting empty: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize the full sequence back to the store in one write.
    pub fn save(&self, store: &dyn StoreBackend) -> Result<()> {
        let value = serde_json::to_string(&self.records)?;
        store.write(&value)
    }

    /// Replace the entry at `index` in place, or append when `index` is
    /// `None` (or out of range). Returns the position written.
    pub fn upsert(&mut self, index: Option<usize>, record: DocumentRecord) -> usize {
        match index {
            Some(i) if i < self.records.len() => {
                self.records[i] = record;
                i
            }
            _ => {
                self.records.push(record);
                self.records.len() - 1
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&DocumentRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// One display row per record, labeled with its 1-based position and its
    /// comment count.
    pub fn listing(&self) -> Vec<String> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| format!("Image {} ({} comments)", i + 1, record.comments.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::store::MemStore;
    use crate::models::annotation::{Annotation, LogicalPoint};

    fn record(comment_count: usize) -> DocumentRecord {
        let comments = (0..comment_count)
            .map(|i| Annotation::new(LogicalPoint::new(i as f64, i as f64), format!("note {i}")))
            .collect();
        DocumentRecord::new("data:image/png;base64,AAAA".into(), comments)
    }

    #[test]
    fn test_load_from_empty_store() {
        let store = MemStore::new();
        assert!(Library::load(&store).is_empty());
    }

    #[test]
    fn test_load_malformed_data_fails_open() {
        let store = MemStore::preload("{not json");
        assert!(Library::load(&store).is_empty());
    }

    #[test]
    fn test_save_then_load_preserves_order_and_contents() {
        let store = MemStore::new();
        let mut library = Library::default();
        library.upsert(None, record(1));
        library.upsert(None, record(3));
        library.save(&store).unwrap();

        let reloaded = Library::load(&store);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.get(0).unwrap().comments.len(), 1);
        assert_eq!(reloaded.get(1).unwrap().comments.len(), 3);
    }

    #[test]
    fn test_upsert_appends_for_new_documents() {
        let mut library = Library::default();
        assert_eq!(library.upsert(None, record(1)), 0);
        assert_eq!(library.upsert(None, record(2)), 1);
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn test_upsert_replaces_exactly_one_entry_in_place() {
        let mut library = Library::default();
        library.upsert(None, record(1));
        library.upsert(None, record(2));
        library.upsert(None, record(3));

        assert_eq!(library.upsert(Some(2), record(4)), 2);
        assert_eq!(library.len(), 3);
        assert_eq!(library.get(0).unwrap().comments.len(), 1);
        assert_eq!(library.get(1).unwrap().comments.len(), 2);
        assert_eq!(library.get(2).unwrap().comments.len(), 4);
    }

    #[test]
    fn test_listing_labels() {
        let mut library = Library::default();
        library.upsert(None, record(0));
        library.upsert(None, record(2));

        assert_eq!(
            library.listing(),
            vec!["Image 1 (0 comments)", "Image 2 (2 comments)"]
        );
    }
}
