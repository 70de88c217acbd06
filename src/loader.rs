// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Document loading state machine.
//!
//! `Empty -> Loading -> Ready`, and back to `Empty` on clear. Decodes run on
//! a worker thread and deliver a one-shot result over an mpsc channel polled
//! each frame. The result carries the fully decoded raster, so a consumer of
//! the ready notification always sees a correctly sized backing store. At
//! most one load is in flight; starting another while `Loading` is rejected
//! rather than queued, and a failed decode falls back to whatever was loaded
//! before.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use crate::io::media::{self, LoadedDocument};

/// Where the loader is in the document lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Empty,
    Loading,
    Ready,
}

pub struct DocumentLoader {
    state: LoadState,
    document: Option<LoadedDocument>,
    receiver: Option<Receiver<Result<LoadedDocument, String>>>,
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentLoader {
    pub fn new() -> Self {
        Self {
            state: LoadState::Empty,
            document: None,
            receiver: None,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// The raster backing store, once `Ready`.
    pub fn document(&self) -> Option<&LoadedDocument> {
        self.document.as_ref()
    }

    /// Start decoding a picked file on a worker thread.
    pub fn begin_load(&mut self, path: PathBuf) -> Result<(), String> {
        self.begin(move || media::load_document(&path).map_err(|e| e.to_string()))
    }

    /// Start decoding a saved record's data URL on a worker thread.
    pub fn begin_load_data_url(&mut self, data_url: String) -> Result<(), String> {
        self.begin(move || media::decode_data_url(&data_url).map_err(|e| e.to_string()))
    }

    fn begin<F>(&mut self, decode: F) -> Result<(), String>
    where
        F: FnOnce() -> Result<LoadedDocument, String> + Send + 'static,
    {
        if self.state == LoadState::Loading {
            return Err("A file is already loading".to_string());
        }

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        self.state = LoadState::Loading;

        std::thread::spawn(move || {
            let _ = sender.send(decode());
        });

        Ok(())
    }

    /// Poll the in-flight decode. Yields the outcome exactly once; a failure
    /// applies no partial state.
    pub fn poll(&mut self) -> Option<Result<(), String>> {
        let receiver = self.receiver.as_ref()?;

        match receiver.try_recv() {
            Ok(Ok(document)) => {
                self.receiver = None;
                log::info!("Loaded document ({}x{})", document.width, document.height);
                self.document = Some(document);
                self.state = LoadState::Ready;
                Some(Ok(()))
            }
            Ok(Err(message)) => {
                self.fail();
                Some(Err(message))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.fail();
                Some(Err("load worker exited unexpectedly".to_string()))
            }
        }
    }

    /// A failed decode falls back to the state before the load started:
    /// `Ready` with the previous document intact, or `Empty`.
    fn fail(&mut self) {
        self.receiver = None;
        self.state = if self.document.is_some() {
            LoadState::Ready
        } else {
            LoadState::Empty
        };
    }

    /// Drop the backing raster and return to `Empty`.
    pub fn clear(&mut self) {
        self.state = LoadState::Empty;
        self.document = None;
        self.receiver = None;
    }

    /// Install an already-decoded document, skipping the worker thread.
    #[cfg(test)]
    pub fn install(&mut self, document: LoadedDocument) {
        self.document = Some(document);
        self.receiver = None;
        self.state = LoadState::Ready;
    }
}
