// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Saved document records.

use super::annotation::Annotation;
use serde::{Deserialize, Serialize};

/// A fully-resolved saved unit: a self-contained encoded raster plus the
/// comments placed on it. A record owns its comments exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// PNG data URL of the document's backing raster, at native resolution.
    pub image: String,
    pub comments: Vec<Annotation>,
}

impl DocumentRecord {
    pub fn new(image: String, comments: Vec<Annotation>) -> Self {
        Self { image, comments }
    }
}
