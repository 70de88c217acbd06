// Copyright (c) 2026, Pinnote contributors
// SPDX-License-Identifier: BSD-3-Clause

//! Marker handles and hover tooltip.
//!
//! The presenter is a rebuildable view over the annotation store: each handle
//! keeps its own logical position as the source of truth and derives its
//! screen position from the current scale, so repositioning under any zoom
//! sequence is lossless and exactly reversible.

use crate::models::annotation::{Annotation, LogicalPoint};
use crate::util::scale::{self, ScaleState, ScreenPoint};

/// Marker radius on screen, in pixels.
pub const MARKER_RADIUS: f32 = 7.5;

/// Tooltip offset from a hovered marker's screen position, in pixels.
pub const TOOLTIP_OFFSET: f64 = 15.0;

/// One visual pin for one annotation.
#[derive(Debug, Clone)]
pub struct MarkerHandle {
    logical: LogicalPoint,
    text: String,
    screen: ScreenPoint,
}

impl MarkerHandle {
    fn new(annotation: &Annotation, scale: ScaleState) -> Self {
        let logical = annotation.position();
        Self {
            logical,
            text: annotation.text.clone(),
            screen: scale::to_screen(logical, scale),
        }
    }

    pub fn logical(&self) -> LogicalPoint {
        self.logical
    }

    pub fn screen(&self) -> ScreenPoint {
        self.screen
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Derived marker view; always regenerable from the annotation store.
#[derive(Debug, Default)]
pub struct MarkerPresenter {
    handles: Vec<MarkerHandle>,
    hovered: Option<usize>,
}

impl MarkerPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all handles and rebuild one per annotation.
    pub fn render(&mut self, annotations: &[Annotation], scale: ScaleState) {
        self.handles = annotations
            .iter()
            .map(|a| MarkerHandle::new(a, scale))
            .collect();
        self.hovered = None;
    }

    /// Append a single handle for a newly added annotation.
    pub fn add(&mut self, annotation: &Annotation, scale: ScaleState) {
        self.handles.push(MarkerHandle::new(annotation, scale));
    }

    /// Recompute every handle's screen position in place from its stored
    /// logical point. Used on zoom changes.
    pub fn reposition(&mut self, scale: ScaleState) {
        for handle in &mut self.handles {
            handle.screen = scale::to_screen(handle.logical, scale);
        }
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.hovered = None;
    }

    pub fn handles(&self) -> &[MarkerHandle] {
        &self.handles
    }

    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index;
    }

    /// Tooltip position and text while a marker is hovered.
    pub fn tooltip(&self) -> Option<(ScreenPoint, &str)> {
        let handle = self.handles.get(self.hovered?)?;
        let at = ScreenPoint {
            x: handle.screen.x + TOOLTIP_OFFSET,
            y: handle.screen.y + TOOLTIP_OFFSET,
        };
        Some((at, handle.text.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(fit: f64, zoom: f64) -> ScaleState {
        ScaleState {
            fit_scale: fit,
            zoom_scale: zoom,
        }
    }

    fn annotations() -> Vec<Annotation> {
        vec![
            Annotation::new(LogicalPoint::new(200.0, 100.0), "door".into()),
            Annotation::new(LogicalPoint::new(40.0, 60.0), "window".into()),
        ]
    }

    #[test]
    fn test_render_builds_one_handle_per_annotation() {
        let mut presenter = MarkerPresenter::new();
        presenter.render(&annotations(), scale(0.5, 1.0));

        let handles = presenter.handles();
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].screen(), ScreenPoint { x: 100.0, y: 50.0 });
        assert_eq!(handles[1].text(), "window");
    }

    #[test]
    fn test_reposition_is_lossless_across_zoom_sequence() {
        let mut presenter = MarkerPresenter::new();
        presenter.render(&annotations(), scale(0.5, 1.0));
        let initial: Vec<ScreenPoint> = presenter.handles().iter().map(|h| h.screen()).collect();

        for zoom in [2.5, 0.5, 1.0] {
            presenter.reposition(scale(0.5, zoom));
        }

        for (handle, expected) in presenter.handles().iter().zip(initial) {
            assert_eq!(handle.screen(), expected);
            // stored logical coordinates are untouched by zooming
        }
        assert_eq!(presenter.handles()[0].logical(), LogicalPoint::new(200.0, 100.0));
    }

    #[test]
    fn test_tooltip_tracks_hovered_marker_with_offset() {
        let mut presenter = MarkerPresenter::new();
        presenter.render(&annotations(), scale(0.5, 2.0));

        assert!(presenter.tooltip().is_none());

        presenter.set_hovered(Some(0));
        let (at, text) = presenter.tooltip().unwrap();
        assert_eq!(at, ScreenPoint { x: 215.0, y: 115.0 });
        assert_eq!(text, "door");

        presenter.set_hovered(None);
        assert!(presenter.tooltip().is_none());
    }
}
