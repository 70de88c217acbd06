// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! I/O: media decoding and the persistent store.

pub mod media;
pub mod store;
