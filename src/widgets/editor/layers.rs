//! Overlay layers composing the editor surface.
//!
//! Each layer is an independently renderable component: it owns only its
//! static configuration and reads the viewport during painting. Painting
//! is strictly read-only with respect to the viewport - all mutations
//! happen in the input phase before any layer paints.
//!
//! Composition order (bottom to top): background, grid, markers.

use eframe::egui::{self, Align2, Color32, Painter, Pos2, Rect};

use crate::core::grid::{grid_lines, GridConfig};
use crate::core::marker::{Marker, MarkerSet};
use crate::core::viewport::{Axis, Viewport};
use crate::theme::Theme;

/// An independently renderable visual component of the editor surface.
pub trait Layer {
    fn name(&self) -> &'static str;

    /// Whether the layer paints the full widget rect including the
    /// padding frame, rather than only the inset edit region
    fn full_bleed(&self) -> bool {
        false
    }

    /// Paint into `rect`. `viewport` maps content coordinates to pixels
    /// relative to `rect.min`; the layer must not mutate shared state.
    fn paint(&self, painter: &Painter, rect: Rect, viewport: &Viewport, theme: &Theme);
}

/// Solid fill beneath all other layers. Resizes with the widget rect and
/// carries no further logic.
#[derive(Debug, Clone, Default)]
pub struct BackgroundLayer;

impl Layer for BackgroundLayer {
    fn name(&self) -> &'static str {
        "background"
    }

    // The fill also covers the padding frame around the edit region
    fn full_bleed(&self) -> bool {
        true
    }

    fn paint(&self, painter: &Painter, rect: Rect, _viewport: &Viewport, theme: &Theme) {
        painter.rect_filled(rect, 0.0, theme.background);
    }
}

/// Grid lines at nice intervals derived from the current zoom.
/// Line positions are recomputed in full on every paint.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct GridLayer {
    /// Sanitized on every construction path, including restore from
    /// persisted state
    #[serde(deserialize_with = "de_grid_config")]
    pub config: GridConfig,
}

fn de_grid_config<'de, D>(d: D) -> Result<GridConfig, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    GridConfig::deserialize(d).map(GridConfig::sanitized)
}

impl GridLayer {
    pub fn new(config: GridConfig) -> Self {
        Self { config: config.sanitized() }
    }
}

impl Layer for GridLayer {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn paint(&self, painter: &Painter, rect: Rect, viewport: &Viewport, theme: &Theme) {
        let stroke = (theme.grid_line_width, theme.grid_line);
        for axis in Axis::BOTH {
            if !self.config.show_lines[axis.idx()] {
                continue;
            }
            let step = self.config.step(axis, viewport.zoom(axis));
            let lines = grid_lines(
                self.config.origin[axis.idx()],
                step,
                viewport.visible_range(axis),
                self.config.max_lines,
            );
            for pos in lines {
                let px = viewport.to_screen(axis, pos);
                match axis {
                    Axis::Time => {
                        let x = rect.min.x + px;
                        painter.line_segment(
                            [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
                            stroke,
                        );
                    }
                    Axis::Track => {
                        let y = rect.min.y + px;
                        painter.line_segment(
                            [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
                            stroke,
                        );
                    }
                }
            }
        }
    }
}

/// Crosshair and named markers with value labels.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MarkerLayer {
    pub markers: MarkerSet,
}

impl MarkerLayer {
    pub fn new(markers: MarkerSet) -> Self {
        Self { markers }
    }

    fn line_color(theme: &Theme, is_cursor: bool) -> Color32 {
        if is_cursor {
            theme.cursor_line
        } else {
            theme.marker_line
        }
    }

    fn paint_marker(
        &self,
        painter: &Painter,
        rect: Rect,
        viewport: &Viewport,
        theme: &Theme,
        marker: &Marker,
        is_cursor: bool,
    ) {
        let color = Self::line_color(theme, is_cursor);
        let stroke = (theme.marker_line_width, color);
        let range = viewport.visible_range(marker.axis);

        for pos in marker.positions_in(range) {
            let px = viewport.to_screen(marker.axis, pos);
            let (a, b, label_pos) = match marker.axis {
                Axis::Time => {
                    let x = rect.min.x + px;
                    (
                        Pos2::new(x, rect.min.y),
                        Pos2::new(x, rect.max.y),
                        Pos2::new(x + 4.0, rect.min.y + 2.0),
                    )
                }
                Axis::Track => {
                    let y = rect.min.y + px;
                    (
                        Pos2::new(rect.min.x, y),
                        Pos2::new(rect.max.x, y),
                        Pos2::new(rect.min.x + 2.0, y + 4.0),
                    )
                }
            };
            painter.line_segment([a, b], stroke);
            self.paint_label(painter, label_pos, marker.label(), theme);
        }
    }

    fn paint_label(&self, painter: &Painter, pos: Pos2, text: &str, theme: &Theme) {
        if text.is_empty() {
            return;
        }
        let font = egui::FontId::proportional(theme.label_size);
        // Background box behind the text for readability
        let galley = painter.layout_no_wrap(text.to_owned(), font.clone(), theme.label_color);
        let text_rect = Rect::from_min_size(pos, galley.size());
        painter.rect_filled(text_rect.expand(2.0), 2.0, theme.label_bg);
        painter.text(pos, Align2::LEFT_TOP, text, font, theme.label_color);
    }
}

impl Layer for MarkerLayer {
    fn name(&self) -> &'static str {
        "markers"
    }

    fn paint(&self, painter: &Painter, rect: Rect, viewport: &Viewport, theme: &Theme) {
        // Named markers first, cursor crosshair on top
        for marker in self.markers.named_visible() {
            self.paint_marker(painter, rect, viewport, theme, marker, false);
        }
        for axis in Axis::BOTH {
            let cursor = self.markers.cursor(axis);
            if cursor.visible {
                self.paint_marker(painter, rect, viewport, theme, cursor, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_background_bleeds_into_padding() {
        assert!(BackgroundLayer.full_bleed());
        assert!(!GridLayer::default().full_bleed());
        assert!(!MarkerLayer::default().full_bleed());
    }

    #[test]
    fn test_restored_grid_config_is_sanitized() {
        // Corrupt persisted state must come back repaired
        let json = r#"{ "config": {
            "cell": [0.0, 1.0],
            "band": { "min_px": 0.0, "max_px": 10.0 },
            "max_lines": 0
        } }"#;
        let layer: GridLayer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.config.cell, [1.0, 1.0]);
        assert!(layer.config.band.min_px > 0.0);
        assert!(layer.config.band.max_px >= 2.5 * layer.config.band.min_px);
        assert!(layer.config.max_lines >= 2);

        // Painting math accepts the repaired band
        let step = layer.config.step(Axis::Time, 32.0);
        assert!(step.is_finite() && step > 0.0);
    }
}
