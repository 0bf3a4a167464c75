//! Visual theme for the editor surface.
//!
//! Colors and font sizes are external configuration: loaded once from a
//! JSON file and treated as read-only by the layers. A missing or broken
//! theme file is never fatal - the built-in palette is used instead.

use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::Color32;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Named style properties consumed by the layers at paint time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Fill behind everything else
    pub background: Color32,
    pub grid_line: Color32,
    /// Named markers (playhead etc.)
    pub marker_line: Color32,
    /// Transient hover crosshair
    pub cursor_line: Color32,
    pub label_color: Color32,
    /// Box painted behind label text for readability
    pub label_bg: Color32,
    pub label_size: f32,
    pub grid_line_width: f32,
    pub marker_line_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color32::from_gray(30),
            grid_line: Color32::from_rgba_unmultiplied(255, 255, 255, 40),
            marker_line: Color32::from_rgb(255, 220, 100),
            cursor_line: Color32::from_rgba_unmultiplied(200, 200, 220, 140),
            label_color: Color32::from_gray(240),
            label_bg: Color32::from_black_alpha(180),
            label_size: 11.0,
            grid_line_width: 1.0,
            marker_line_width: 2.0,
        }
    }
}

impl Theme {
    /// Load a theme from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file: {}", path.display()))?;
        let theme: Theme = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse theme file: {}", path.display()))?;
        Ok(theme.sanitized())
    }

    /// Load a theme, falling back to defaults when the file is absent or
    /// malformed. Bad style input must never take the editor down.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(theme) => {
                info!("Loaded theme from {}", path.display());
                theme
            }
            Err(e) => {
                warn!("{:#}; using default theme", e);
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        if !self.label_size.is_finite() || self.label_size < 6.0 {
            self.label_size = Self::default().label_size;
        }
        if !self.grid_line_width.is_finite() || self.grid_line_width <= 0.0 {
            self.grid_line_width = Self::default().grid_line_width;
        }
        if !self.marker_line_width.is_finite() || self.marker_line_width <= 0.0 {
            self.marker_line_width = Self::default().marker_line_width;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let theme = Theme::load_or_default(Some(Path::new("/nonexistent/theme.json")));
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_partial_theme_file_keeps_defaults_for_rest() {
        let dir = std::env::temp_dir().join("seqline_theme_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("partial.json");
        std::fs::write(&path, r#"{ "label_size": 14.0 }"#).unwrap();

        let theme = Theme::load(&path).unwrap();
        assert_eq!(theme.label_size, 14.0);
        assert_eq!(theme.background, Theme::default().background);
    }

    #[test]
    fn test_malformed_file_is_nonfatal() {
        let dir = std::env::temp_dir().join("seqline_theme_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let theme = Theme::load_or_default(Some(&path));
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_sanitize_rejects_degenerate_sizes() {
        let dir = std::env::temp_dir().join("seqline_theme_test");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("degenerate.json");
        std::fs::write(&path, r#"{ "label_size": -5.0, "grid_line_width": 0.0 }"#).unwrap();

        let theme = Theme::load(&path).unwrap();
        assert_eq!(theme.label_size, Theme::default().label_size);
        assert_eq!(theme.grid_line_width, Theme::default().grid_line_width);
    }
}
