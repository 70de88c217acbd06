// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Single-key persistent store.
//!
//! The saved library lives under one key whose value is one JSON document.
//! The boundary is a trait so the library logic can be exercised against an
//! in-memory store in tests.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// One key, one value. `read` returns `None` when nothing has been written.
pub trait StoreBackend {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, value: &str) -> Result<()>;
}

/// File-backed store in the platform data directory.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store under the platform's per-user data directory.
    pub fn in_data_dir() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "pinnote")
            .context("could not determine a data directory")?;
        std::fs::create_dir_all(dirs.data_dir())
            .with_context(|| format!("failed to create {}", dirs.data_dir().display()))?;
        Ok(Self {
            path: dirs.data_dir().join("images_with_comments.json"),
        })
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StoreBackend for FileStore {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let value = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Ok(Some(value))
    }

    fn write(&self, value: &str) -> Result<()> {
        std::fs::write(&self.path, value)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemStore {
    value: std::cell::RefCell<Option<String>>,
}

#[cfg(test)]
impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    pub fn preload(value: &str) -> Self {
        Self {
            value: std::cell::RefCell::new(Some(value.to_string())),
        }
    }
}

#[cfg(test)]
impl StoreBackend for MemStore {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn write(&self, value: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}
