// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! Coordinates are stored in the source document's native, unscaled pixel
//! space. That is the only coordinate space ever persisted; screen positions
//! are always derived from it through the current scale state.

use serde::{Deserialize, Serialize};

/// A 2D point in the native pixel space of the open document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogicalPoint {
    pub x: f64,
    pub y: f64,
}

impl LogicalPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point comment: a logical position plus user-entered text.
///
/// Invariant: `text` is non-empty. Enforced by the session before `add`;
/// annotations are never mutated or deleted after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl Annotation {
    pub fn new(position: LogicalPoint, text: String) -> Self {
        Self {
            x: position.x,
            y: position.y,
            text,
        }
    }

    pub fn position(&self) -> LogicalPoint {
        LogicalPoint::new(self.x, self.y)
    }
}

/// In-memory ordered list of annotations for the currently open document.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: Vec<Annotation>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.annotations.clear();
    }

    pub fn add(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Swap in a full replacement set, e.g. when reopening a saved entry.
    pub fn replace_all(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    pub fn all(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut store = AnnotationStore::new();
        store.add(Annotation::new(LogicalPoint::new(1.0, 1.0), "first".into()));
        store.add(Annotation::new(LogicalPoint::new(2.0, 2.0), "second".into()));

        let all = store.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "first");
        assert_eq!(all[1].text, "second");
    }

    #[test]
    fn test_replace_all_discards_previous_contents() {
        let mut store = AnnotationStore::new();
        store.add(Annotation::new(LogicalPoint::new(1.0, 1.0), "old".into()));

        store.replace_all(vec![Annotation::new(
            LogicalPoint::new(5.0, 6.0),
            "new".into(),
        )]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.all()[0].text, "new");

        store.clear();
        assert!(store.is_empty());
    }
}
