// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Fit-scale and zoom-scale computation.
//!
//! Two orthogonal multipliers relate a document's native pixel space to the
//! screen: a fit factor fixed per document (wide sources are shrunk to the
//! maximum display width, never enlarged) and a user-driven zoom factor.
//! Every screen position is composed fresh from both factors, so changing the
//! zoom never requires touching stored logical coordinates.

use crate::models::annotation::LogicalPoint;

/// Maximum display width a document is fit into, in pixels.
pub const MAX_WIDTH: f64 = 600.0;

/// Lower bound of the user zoom factor.
pub const MIN_ZOOM: f64 = 0.5;

/// Upper bound of the user zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom change applied per zoom-in/zoom-out press.
pub const ZOOM_STEP: f64 = 0.1;

/// A 2D point in on-screen pixel space, relative to the canvas origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// The two scale factors in effect for the open document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleState {
    /// Fixed per document: `min(1, MAX_WIDTH / native_width)`.
    pub fit_scale: f64,
    /// User-driven, clamped to `[MIN_ZOOM, MAX_ZOOM]`.
    pub zoom_scale: f64,
}

impl Default for ScaleState {
    fn default() -> Self {
        Self {
            fit_scale: 1.0,
            zoom_scale: 1.0,
        }
    }
}

impl ScaleState {
    /// Scale state for a freshly loaded document: fit derived from its
    /// native width, zoom reset to 1.
    pub fn for_native_width(native_width: f64) -> Self {
        Self {
            fit_scale: compute_fit_scale(native_width, MAX_WIDTH),
            zoom_scale: 1.0,
        }
    }

    /// Combined logical-to-screen factor.
    pub fn effective(&self) -> f64 {
        self.fit_scale * self.zoom_scale
    }

    /// Adjust the zoom by `delta`, clamped to the valid range.
    pub fn zoom_by(&mut self, delta: f64) {
        self.zoom_scale = clamp_zoom(self.zoom_scale + delta);
    }
}

/// Fit factor for a document of the given native width. Never upscales.
pub fn compute_fit_scale(native_width: f64, max_width: f64) -> f64 {
    if native_width > max_width {
        max_width / native_width
    } else {
        1.0
    }
}

/// Clamp a requested zoom factor to `[MIN_ZOOM, MAX_ZOOM]`.
pub fn clamp_zoom(requested: f64) -> f64 {
    requested.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Project a logical point onto the screen.
pub fn to_screen(point: LogicalPoint, scale: ScaleState) -> ScreenPoint {
    let factor = scale.effective();
    ScreenPoint {
        x: point.x * factor,
        y: point.y * factor,
    }
}

/// Invert a screen position back into logical space. Returns `None` when the
/// combined factor is zero, which would make the mapping non-invertible.
pub fn to_logical(point: ScreenPoint, scale: ScaleState) -> Option<LogicalPoint> {
    let factor = scale.effective();
    if factor == 0.0 {
        return None;
    }
    Some(LogicalPoint {
        x: point.x / factor,
        y: point.y / factor,
    })
}
