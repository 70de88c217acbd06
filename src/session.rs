// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Session state and orchestration.
//!
//! One explicit state object owns the open document, its annotations, the
//! marker view, and the scale factors; everything is fully replaced on load,
//! reopen, and clear. No UI types appear here, so the whole click/save/reopen
//! flow is exercised headlessly by the tests at the bottom of this module.

use std::path::PathBuf;

use crate::io::media;
use crate::io::store::StoreBackend;
use crate::loader::DocumentLoader;
use crate::markers::MarkerPresenter;
use crate::models::annotation::{Annotation, AnnotationStore, LogicalPoint};
use crate::models::library::Library;
use crate::models::record::DocumentRecord;
use crate::util::scale::{self, ScaleState, ScreenPoint, ZOOM_STEP};

const SAVE_VALIDATION_MESSAGE: &str =
    "Please upload an image and add at least one comment before saving.";

/// A load that has been started but not yet installed.
struct PendingLoad {
    index: Option<usize>,
    comments: Vec<Annotation>,
}

pub struct Session {
    pub loader: DocumentLoader,
    pub annotations: AnnotationStore,
    pub markers: MarkerPresenter,
    pub scale: ScaleState,
    pub library: Library,
    /// `None` means the open document (if any) is new and unsaved;
    /// `Some(i)` means we are re-editing the saved entry at index `i`.
    current_index: Option<usize>,
    /// Entry index and comments to install when the in-flight load
    /// completes; nothing is committed until then.
    pending_load: Option<PendingLoad>,
    status: Option<String>,
}

impl Session {
    pub fn new(store: &dyn StoreBackend) -> Self {
        Self {
            loader: DocumentLoader::new(),
            annotations: AnnotationStore::new(),
            markers: MarkerPresenter::new(),
            scale: ScaleState::default(),
            library: Library::load(store),
            current_index: None,
            pending_load: None,
            status: None,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn is_open(&self) -> bool {
        self.loader.is_ready()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Start loading a picked file as a new, unsaved document.
    pub fn open_file(&mut self, path: PathBuf) {
        if let Err(message) = self.loader.begin_load(path) {
            self.status = Some(message);
            return;
        }
        self.pending_load = Some(PendingLoad {
            index: None,
            comments: Vec::new(),
        });
        self.status = None;
    }

    /// Reopen a saved entry from the library listing.
    pub fn open_entry(&mut self, index: usize) {
        let Some(record) = self.library.get(index) else {
            return;
        };
        let image = record.image.clone();
        let comments = record.comments.clone();

        if let Err(message) = self.loader.begin_load_data_url(image) {
            self.status = Some(message);
            return;
        }
        self.pending_load = Some(PendingLoad {
            index: Some(index),
            comments,
        });
        self.status = None;
    }

    /// Pump the in-flight decode; call once per frame. Returns `true` when a
    /// document just became ready, so the caller can refresh its texture.
    pub fn poll_loader(&mut self) -> bool {
        match self.loader.poll() {
            Some(Ok(())) => {
                self.finish_load();
                true
            }
            Some(Err(message)) => {
                log::error!("Load failed: {}", message);
                // the previously open document and its annotations, if any,
                // stay exactly as they were
                self.pending_load = None;
                self.status = Some(format!("Could not load the file: {message}"));
                false
            }
            None => false,
        }
    }

    /// Install scale, annotations, and markers for a freshly decoded
    /// document. Zoom always resets to 1 here.
    fn finish_load(&mut self) {
        let native_width = self
            .loader
            .document()
            .map(|d| d.width as f64)
            .unwrap_or(0.0);
        self.scale = ScaleState::for_native_width(native_width);

        let pending = self.pending_load.take();
        self.current_index = pending.as_ref().and_then(|p| p.index);
        self.annotations
            .replace_all(pending.map(|p| p.comments).unwrap_or_default());
        self.markers.render(self.annotations.all(), self.scale);
    }

    /// Resolve a canvas click into logical coordinates. `None` while no
    /// document is open (clicks during a load are ignored too).
    pub fn click_position(&self, screen: ScreenPoint) -> Option<LogicalPoint> {
        if !self.is_open() {
            return None;
        }
        scale::to_logical(screen, self.scale)
    }

    /// Commit a typed comment at a previously resolved click position.
    /// Empty or whitespace-only text creates nothing.
    pub fn add_annotation(&mut self, position: LogicalPoint, text: &str) {
        if !self.is_open() {
            return;
        }
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let annotation = Annotation::new(position, text.to_string());
        self.markers.add(&annotation, self.scale);
        self.annotations.add(annotation);
        log::info!(
            "Added comment at ({:.1}, {:.1}), total: {}",
            position.x,
            position.y,
            self.annotations.len()
        );
    }

    pub fn zoom_in(&mut self) {
        self.apply_zoom(ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.apply_zoom(-ZOOM_STEP);
    }

    fn apply_zoom(&mut self, delta: f64) {
        self.scale.zoom_by(delta);
        self.markers.reposition(self.scale);
    }

    /// Persist the open document plus its comments, then clear the canvas.
    /// Requires an open document and at least one comment.
    pub fn save(&mut self, store: &dyn StoreBackend) {
        if !self.is_open() || self.annotations.is_empty() {
            self.status = Some(SAVE_VALIDATION_MESSAGE.to_string());
            return;
        }
        let Some(document) = self.loader.document() else {
            self.status = Some(SAVE_VALIDATION_MESSAGE.to_string());
            return;
        };

        let image = match media::encode_data_url(document) {
            Ok(image) => image,
            Err(e) => {
                log::error!("Failed to encode document: {}", e);
                self.status = Some(format!("Could not save: {e}"));
                return;
            }
        };

        let record = DocumentRecord::new(image, self.annotations.all().to_vec());
        let index = self.library.upsert(self.current_index, record);
        // The entry is committed in memory even when the write fails, so a
        // retried save replaces it in place instead of appending it again.
        self.current_index = Some(index);
        if let Err(e) = self.library.save(store) {
            log::error!("Failed to persist library: {}", e);
            self.status = Some(format!("Could not save: {e}"));
            return;
        }

        log::info!("Saved image {} with {} comments", index + 1, self.annotations.len());
        self.clear_canvas();
        self.status = Some(format!("Saved image {}", index + 1));
    }

    /// Reset surface, markers, annotations, zoom, and the current entry.
    pub fn clear_canvas(&mut self) {
        self.loader.clear();
        self.markers.clear();
        self.annotations.clear();
        self.scale = ScaleState::default();
        self.current_index = None;
        self.pending_load = None;
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::media::LoadedDocument;
    use crate::io::store::MemStore;
    use crate::loader::LoadState;
    use anyhow::Result;
    use std::cell::Cell;
    use std::time::Duration;

    /// Store whose next `fail_writes` writes fail, e.g. a full disk.
    struct FlakyStore {
        inner: MemStore,
        fail_writes: Cell<u32>,
    }

    impl FlakyStore {
        fn failing_once() -> Self {
            Self {
                inner: MemStore::new(),
                fail_writes: Cell::new(1),
            }
        }
    }

    impl StoreBackend for FlakyStore {
        fn read(&self) -> Result<Option<String>> {
            self.inner.read()
        }

        fn write(&self, value: &str) -> Result<()> {
            if self.fail_writes.get() > 0 {
                self.fail_writes.set(self.fail_writes.get() - 1);
                anyhow::bail!("no space left on device");
            }
            self.inner.write(value)
        }
    }

    fn blank_document(width: u32, height: u32) -> LoadedDocument {
        LoadedDocument {
            width,
            height,
            pixels: vec![255; (width * height * 4) as usize],
        }
    }

    /// Install a decoded document directly, as if its load just completed.
    fn install(session: &mut Session, width: u32, height: u32) {
        session.loader.install(blank_document(width, height));
        session.finish_load();
    }

    fn wait_ready(session: &mut Session) {
        for _ in 0..500 {
            if session.poll_loader() {
                return;
            }
            assert!(session.status().is_none(), "load failed");
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("load did not complete in time");
    }

    fn wait_load_failure(session: &mut Session) {
        for _ in 0..500 {
            session.poll_loader();
            if session.status().is_some() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("load did not fail in time");
    }

    #[test]
    fn test_end_to_end_click_zoom_save() {
        let store = MemStore::new();
        let mut session = Session::new(&store);

        // 1200px wide against MAX_WIDTH=600 -> fit 0.5
        install(&mut session, 1200, 800);
        assert_eq!(session.scale.fit_scale, 0.5);
        assert_eq!(session.scale.zoom_scale, 1.0);

        // click at screen (100, 50) at zoom 1 -> stored logical (200, 100)
        let position = session
            .click_position(ScreenPoint { x: 100.0, y: 50.0 })
            .unwrap();
        session.add_annotation(position, "leaky pipe");
        let (stored_x, stored_y) = {
            let stored = &session.annotations.all()[0];
            (stored.x, stored.y)
        };
        assert!((stored_x - 200.0).abs() < 1e-9);
        assert!((stored_y - 100.0).abs() < 1e-9);

        // zoom to 2 -> marker renders at screen (200, 100); stored unchanged
        for _ in 0..10 {
            session.zoom_in();
        }
        assert!((session.scale.zoom_scale - 2.0).abs() < 1e-9);
        let screen = session.markers.handles()[0].screen();
        assert!((screen.x - 200.0).abs() < 1e-6);
        assert!((screen.y - 100.0).abs() < 1e-6);
        assert_eq!(session.annotations.all()[0].x, stored_x);

        // persisted comment is (200, 100) regardless of zoom at save time
        session.save(&store);
        let records: Vec<DocumentRecord> =
            serde_json::from_str(&store.contents().unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].comments[0].x - 200.0).abs() < 1e-9);
        assert!((records[0].comments[0].y - 100.0).abs() < 1e-9);
        assert_eq!(records[0].comments[0].text, "leaky pipe");

        // post-save: canvas cleared, nothing open, zoom back to 1
        assert!(!session.is_open());
        assert_eq!(session.current_index(), None);
        assert_eq!(session.scale.zoom_scale, 1.0);
        assert!(session.annotations.is_empty());
        assert!(session.markers.handles().is_empty());
    }

    #[test]
    fn test_save_validation_requires_document_and_comment() {
        let store = MemStore::new();
        let mut session = Session::new(&store);

        // no document open
        session.save(&store);
        assert_eq!(session.status(), Some(SAVE_VALIDATION_MESSAGE));
        assert!(store.contents().is_none());

        // document open but zero comments
        install(&mut session, 100, 100);
        session.save(&store);
        assert_eq!(session.status(), Some(SAVE_VALIDATION_MESSAGE));
        assert!(store.contents().is_none());
        assert!(session.is_open());
    }

    #[test]
    fn test_empty_comment_text_creates_nothing() {
        let store = MemStore::new();
        let mut session = Session::new(&store);
        install(&mut session, 100, 100);

        let position = session
            .click_position(ScreenPoint { x: 10.0, y: 10.0 })
            .unwrap();
        session.add_annotation(position, "");
        session.add_annotation(position, "   ");

        assert!(session.annotations.is_empty());
        assert!(session.markers.handles().is_empty());
    }

    #[test]
    fn test_click_ignored_with_no_open_document() {
        let store = MemStore::new();
        let session = Session::new(&store);
        assert!(session
            .click_position(ScreenPoint { x: 10.0, y: 10.0 })
            .is_none());
    }

    #[test]
    fn test_reopen_saved_entry_replaces_in_place() {
        let store = MemStore::new();
        let mut session = Session::new(&store);

        // seed three saved entries with one comment each
        for i in 0..3 {
            install(&mut session, 40, 30);
            session.add_annotation(LogicalPoint::new(5.0, 5.0), &format!("entry {i}"));
            session.save(&store);
        }
        assert_eq!(session.library.len(), 3);

        // reopen index 2, add one comment, save again
        session.open_entry(2);
        wait_ready(&mut session);
        assert_eq!(session.current_index(), Some(2));
        assert_eq!(session.annotations.len(), 1);
        assert_eq!(session.markers.handles().len(), 1);
        assert_eq!(session.scale.zoom_scale, 1.0);

        session.add_annotation(LogicalPoint::new(8.0, 9.0), "second thought");
        session.save(&store);

        // only index 2 changed; saving did not append
        assert_eq!(session.library.len(), 3);
        assert_eq!(session.library.get(0).unwrap().comments.len(), 1);
        assert_eq!(session.library.get(1).unwrap().comments.len(), 1);
        assert_eq!(session.library.get(2).unwrap().comments.len(), 2);
        assert_eq!(session.current_index(), None);

        // a new document afterwards appends exactly one entry at the end
        install(&mut session, 40, 30);
        session.add_annotation(LogicalPoint::new(1.0, 1.0), "fresh");
        session.save(&store);
        assert_eq!(session.library.len(), 4);
    }

    #[test]
    fn test_listing_reflects_persisted_library() {
        let store = MemStore::new();
        let mut session = Session::new(&store);

        install(&mut session, 40, 30);
        session.add_annotation(LogicalPoint::new(1.0, 2.0), "one");
        session.add_annotation(LogicalPoint::new(3.0, 4.0), "two");
        session.save(&store);

        assert_eq!(session.library.listing(), vec!["Image 1 (2 comments)"]);

        // a fresh session sees the same listing from the store
        let reopened = Session::new(&store);
        assert_eq!(reopened.library.listing(), vec!["Image 1 (2 comments)"]);
    }

    #[test]
    fn test_failed_load_with_nothing_open_stays_empty() {
        let store = MemStore::new();
        let mut session = Session::new(&store);

        session.open_file(PathBuf::from("/nonexistent/pinnote-session.png"));
        wait_load_failure(&mut session);

        assert!(session.status().unwrap().contains("Could not load"));
        assert_eq!(session.loader.state(), LoadState::Empty);
        assert!(session.annotations.is_empty());
        assert!(session.markers.handles().is_empty());
    }

    #[test]
    fn test_failed_load_keeps_open_document_and_annotations() {
        let store = MemStore::new();
        let mut session = Session::new(&store);

        // a saved entry, reopened for editing, with one unsaved comment
        install(&mut session, 40, 30);
        session.add_annotation(LogicalPoint::new(5.0, 5.0), "saved");
        session.save(&store);
        session.open_entry(0);
        wait_ready(&mut session);
        session.add_annotation(LogicalPoint::new(6.0, 6.0), "unsaved");
        assert_eq!(session.annotations.len(), 2);

        // a file that fails to decode leaves the open document untouched
        session.open_file(PathBuf::from("/nonexistent/pinnote-bad.png"));
        wait_load_failure(&mut session);

        assert!(session.status().unwrap().contains("Could not load"));
        assert_eq!(session.loader.state(), LoadState::Ready);
        assert_eq!(session.annotations.len(), 2);
        assert_eq!(session.markers.handles().len(), 2);
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn test_save_retry_after_write_failure_replaces_not_appends() {
        let store = FlakyStore::failing_once();
        let mut session = Session::new(&store);

        install(&mut session, 40, 30);
        session.add_annotation(LogicalPoint::new(2.0, 3.0), "first try");

        // first save: the write fails, nothing persisted, canvas kept
        session.save(&store);
        assert!(session.status().unwrap().contains("Could not save"));
        assert!(store.inner.contents().is_none());
        assert!(session.is_open());
        assert_eq!(session.library.len(), 1);
        assert_eq!(session.current_index(), Some(0));

        // retry: the same entry is replaced in place, not appended
        session.save(&store);
        assert_eq!(session.library.len(), 1);
        let records: Vec<DocumentRecord> =
            serde_json::from_str(&store.inner.contents().unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].comments[0].text, "first try");
        assert_eq!(session.current_index(), None);
        assert!(!session.is_open());
    }
}
