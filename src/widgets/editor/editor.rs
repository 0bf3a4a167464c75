//! Timeline editor widget - state and configuration.
//!
//! The editor owns the Viewport (the only mutable shared state) and an
//! ordered set of overlay layers that read it. The UI pass lives in
//! `editor_ui.rs`; interactions come back to the host as `EditorAction`s.

use serde::{Deserialize, Serialize};

use crate::core::grid::GridConfig;
use crate::core::marker::MarkerSet;
use crate::core::view_events::ViewEventEmitter;
use crate::core::viewport::{Axis, Viewport, ZoomRange};
use crate::widgets::editor::layers::{BackgroundLayer, GridLayer, Layer, MarkerLayer};

/// Multiplicative zoom step per scroll-wheel notch
pub const ZOOM_STEP: f32 = 0.1;
pub const ZOOM_IN_FACTOR: f32 = 1.0 + ZOOM_STEP;
pub const ZOOM_OUT_FACTOR: f32 = 1.0 / ZOOM_IN_FACTOR;

/// Configuration for the timeline editor widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Padding around the edit region, in pixels
    pub padding: f32,
    pub zoom_range: ZoomRange,
    pub grid: GridConfig,
    /// Scroll-wheel pan speed, screen pixels per scroll unit
    pub scroll_pan_speed: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            padding: 16.0,
            zoom_range: ZoomRange::default(),
            grid: GridConfig::default(),
            scroll_pan_speed: 1.0,
        }
    }
}

/// Editor interaction result for the host application
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    None,
    /// User clicked at a time position (snapped to the grid when enabled)
    Seek(f32),
}

/// The composed timeline editor: viewport plus ordered overlay layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEditor {
    pub viewport: Viewport,
    pub config: EditorConfig,
    #[serde(skip)]
    pub background: BackgroundLayer,
    pub grid: GridLayer,
    /// Marker population persists with the editor (playhead, loop points)
    pub markers: MarkerLayer,
    #[serde(skip)]
    pub(crate) hovered: bool,
    #[serde(skip)]
    pub(crate) emitter: ViewEventEmitter,
}

impl Default for TimelineEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl TimelineEditor {
    pub fn new(config: EditorConfig) -> Self {
        let config = EditorConfig {
            zoom_range: config.zoom_range.sanitized(),
            grid: config.grid.clone().sanitized(),
            ..config
        };
        Self {
            viewport: Viewport::new(config.zoom_range),
            background: BackgroundLayer,
            grid: GridLayer::new(config.grid.clone()),
            markers: MarkerLayer::new(MarkerSet::new()),
            config,
            hovered: false,
            emitter: ViewEventEmitter::dummy(),
        }
    }

    /// Wire the editor's notifications (viewport changes, cursor moves)
    /// into an event bus
    pub fn set_emitter(&mut self, emitter: ViewEventEmitter) {
        self.viewport.set_emitter(emitter.clone());
        self.emitter = emitter;
    }

    /// Layers in composition order, bottom to top
    pub fn layers(&self) -> [&dyn Layer; 3] {
        [&self.background, &self.grid, &self.markers]
    }

    /// Snap a content value to the grid if snapping is enabled for the axis
    pub fn snap(&self, axis: Axis, value: f32) -> f32 {
        self.grid.config.snap_value(axis, self.viewport.zoom(axis), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_composition_order() {
        let editor = TimelineEditor::default();
        let names: Vec<&str> = editor.layers().iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["background", "grid", "markers"]);
    }

    #[test]
    fn test_editor_viewport_respects_config_zoom_range() {
        let config = EditorConfig {
            zoom_range: ZoomRange { min: 1.0, max: 8.0 },
            ..EditorConfig::default()
        };
        let mut editor = TimelineEditor::new(config);
        editor.viewport.set_zoom(Axis::Time, 1000.0);
        assert_eq!(editor.viewport.zoom(Axis::Time), 8.0);
    }

    #[test]
    fn test_inverted_config_zoom_range_is_repaired() {
        let config = EditorConfig {
            zoom_range: ZoomRange { min: 8.0, max: 1.0 },
            ..EditorConfig::default()
        };
        let mut editor = TimelineEditor::new(config);
        assert_eq!(editor.config.zoom_range, ZoomRange { min: 1.0, max: 8.0 });

        editor.viewport.set_zoom(Axis::Time, 1000.0);
        assert_eq!(editor.viewport.zoom(Axis::Time), 8.0);
    }

    #[test]
    fn test_snap_uses_grid_config() {
        let mut editor = TimelineEditor::default();
        editor.viewport.set_zoom(Axis::Time, 32.0);
        // Default grid: cell 1.0, snapping on; 32 px/unit keeps step at 1.0
        assert_eq!(editor.snap(Axis::Time, 3.4), 3.0);

        editor.grid.config.snap = [false, false];
        assert_eq!(editor.snap(Axis::Time, 3.4), 3.4);
    }
}
