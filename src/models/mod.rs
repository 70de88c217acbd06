// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: annotations, saved records, and the saved-image library.

pub mod annotation;
pub mod library;
pub mod record;
