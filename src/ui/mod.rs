// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the Pinnote application.

pub mod canvas;
pub mod library_panel;
pub mod toolbar;
