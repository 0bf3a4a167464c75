//! Grid spacing math for the timeline editor.
//!
//! Spacing is re-derived from the current zoom on every use - there is no
//! incremental line tracking, so the grid can never drift out of sync with
//! the viewport. Steps come from the 1/2/5 x 10^n series so labels stay
//! readable at any zoom.

use serde::{Deserialize, Serialize};

use crate::core::viewport::Axis;

/// Target on-screen spacing band for grid lines, in pixels.
///
/// `max_px` must be at least 2.5 * `min_px`: the nice-step series grows by
/// at most a factor of 2.5 between consecutive steps, so any band that wide
/// is guaranteed to contain a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBand {
    pub min_px: f32,
    pub max_px: f32,
}

impl Default for PixelBand {
    fn default() -> Self {
        Self { min_px: 24.0, max_px: 96.0 }
    }
}

/// Grid configuration - per-axis display/snap flags, cell geometry, limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Content coordinate of the first grid line, per axis (grid origin)
    pub origin: [f32; 2],
    /// Base cell size in content units, per axis; steps are nice multiples
    /// or submultiples of this (one beat, one track row)
    pub cell: [f32; 2],
    /// Whether to draw lines along each axis
    pub show_lines: [bool; 2],
    /// Whether editing positions snap to the grid, per axis
    pub snap: [bool; 2],
    pub band: PixelBand,
    /// Hard cap on rendered lines per axis, regardless of zoom
    pub max_lines: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            cell: [1.0, 1.0],
            show_lines: [true, true],
            snap: [true, true],
            band: PixelBand::default(),
            max_lines: 512,
        }
    }
}

impl GridConfig {
    /// Sanitize values coming from a config file
    pub fn sanitized(mut self) -> Self {
        for c in &mut self.cell {
            if !c.is_finite() || *c <= 0.0 {
                *c = 1.0;
            }
        }
        if !(self.band.min_px > 0.0) {
            self.band.min_px = PixelBand::default().min_px;
        }
        if self.band.max_px < 2.5 * self.band.min_px {
            self.band.max_px = 2.5 * self.band.min_px;
        }
        self.max_lines = self.max_lines.max(2);
        self
    }

    /// Grid step in content units for an axis at the given zoom
    pub fn step(&self, axis: Axis, zoom: f32) -> f32 {
        let cell = self.cell[axis.idx()];
        // Treat one cell as the unit so steps stay nice fractions of a cell
        cell * nice_step(zoom * cell, &self.band)
    }

    /// Round a content value to the nearest grid line if snapping is
    /// enabled for the axis; pass through unchanged otherwise.
    pub fn snap_value(&self, axis: Axis, zoom: f32, value: f32) -> f32 {
        if !self.snap[axis.idx()] {
            return value;
        }
        snap(value, self.origin[axis.idx()], self.step(axis, zoom))
    }
}

/// Smallest step from the 1/2/5 x 10^n series whose on-screen spacing
/// `step * zoom` is at least `band.min_px`.
pub fn nice_step(zoom: f32, band: &PixelBand) -> f32 {
    debug_assert!(zoom > 0.0 && band.min_px > 0.0);
    let raw = band.min_px / zoom;
    let mag = 10f32.powf(raw.log10().floor());
    for m in [1.0, 2.0, 5.0, 10.0] {
        let step = m * mag;
        if step * zoom >= band.min_px {
            return step;
        }
    }
    10.0 * mag
}

/// Next step up the 1/2/5 series (used to clamp the line count)
fn next_nice(step: f32) -> f32 {
    let mag = 10f32.powf(step.log10().floor());
    let m = step / mag;
    if m < 1.5 {
        2.0 * mag
    } else if m < 3.5 {
        5.0 * mag
    } else {
        10.0 * mag
    }
}

/// All grid line positions at multiples of `step` relative to `origin`
/// inside the content `range`. If the count would exceed `max_lines`, the
/// step is escalated through the nice series until it fits - the output is
/// never unbounded.
pub fn grid_lines(origin: f32, step: f32, range: (f32, f32), max_lines: usize) -> Vec<f32> {
    let (from, to) = if range.0 <= range.1 { range } else { (range.1, range.0) };
    if !step.is_finite() || step <= 0.0 || !(to - from).is_finite() || max_lines == 0 {
        return Vec::new();
    }

    let mut step = step;
    while (to - from) / step + 1.0 > max_lines as f32 {
        step = next_nice(step);
    }

    let first = ((from - origin) / step).ceil();
    let mut out = Vec::new();
    let mut n = first;
    loop {
        let pos = origin + n * step;
        if pos > to || out.len() >= max_lines {
            break;
        }
        out.push(pos);
        n += 1.0;
    }
    out
}

/// Round a content value to the nearest multiple of `step` from `origin`
pub fn snap(value: f32, origin: f32, step: f32) -> f32 {
    if !step.is_finite() || step <= 0.0 {
        return value;
    }
    origin + ((value - origin) / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step_spacing_stays_in_band() {
        let band = PixelBand::default();
        // Sweep zooms across many orders of magnitude
        let mut zoom = 1e-4_f32;
        while zoom < 1e5 {
            let step = nice_step(zoom, &band);
            let px = step * zoom;
            // Small slack for float rounding at decade boundaries
            assert!(
                px >= band.min_px * 0.999 && px <= band.max_px * 1.001,
                "spacing {px}px out of band at zoom {zoom} (step {step})"
            );
            zoom *= 1.7;
        }
    }

    #[test]
    fn test_nice_step_is_from_125_series() {
        let band = PixelBand::default();
        for &zoom in &[0.01, 0.5, 2.0, 32.0, 400.0] {
            let step = nice_step(zoom, &band);
            let mag = 10f32.powf(step.log10().floor());
            let m = step / mag;
            let ok = [1.0, 2.0, 5.0, 10.0].iter().any(|&c| (m - c).abs() < 1e-3);
            assert!(ok, "step {step} not in 1/2/5 series (mantissa {m})");
        }
    }

    #[test]
    fn test_step_is_pure_function_of_zoom() {
        // Recomputation never accumulates: same zoom, same step
        let cfg = GridConfig::default();
        let a = cfg.step(Axis::Time, 32.0);
        let b = cfg.step(Axis::Time, 32.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_grid_lines_cover_range_at_step() {
        let lines = grid_lines(0.0, 1.0, (0.0, 10.0), 512);
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], 0.0);
        assert_eq!(*lines.last().unwrap(), 10.0);
    }

    #[test]
    fn test_grid_lines_honor_origin() {
        let lines = grid_lines(0.5, 1.0, (0.0, 3.0), 512);
        assert_eq!(lines, vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_grid_lines_count_never_exceeds_max() {
        // Pathologically small step over a huge range
        let lines = grid_lines(0.0, 0.001, (0.0, 1e6), 128);
        assert!(lines.len() <= 128, "{} lines rendered", lines.len());
        // Escalated step still lands on nice positions
        assert!(!lines.is_empty());
    }

    #[test]
    fn test_grid_lines_empty_on_degenerate_input() {
        assert!(grid_lines(0.0, 0.0, (0.0, 10.0), 512).is_empty());
        assert!(grid_lines(0.0, f32::NAN, (0.0, 10.0), 512).is_empty());
        assert!(grid_lines(0.0, 1.0, (0.0, f32::INFINITY), 512).is_empty());
    }

    #[test]
    fn test_snap_rounds_to_nearest_line() {
        assert_eq!(snap(3.4, 0.0, 1.0), 3.0);
        assert_eq!(snap(3.6, 0.0, 1.0), 4.0);
        // Origin shifts the lattice
        assert_eq!(snap(3.4, 0.5, 1.0), 3.5);
    }

    #[test]
    fn test_snap_disabled_passes_through() {
        let cfg = GridConfig { snap: [false, true], ..GridConfig::default() };
        assert_eq!(cfg.snap_value(Axis::Time, 32.0, 3.37), 3.37);
        assert_ne!(cfg.snap_value(Axis::Track, 32.0, 3.37), 3.37);
    }

    #[test]
    fn test_sanitized_enforces_band_invariant() {
        let cfg = GridConfig {
            cell: [0.0, -2.0],
            band: PixelBand { min_px: 40.0, max_px: 50.0 },
            max_lines: 0,
            ..GridConfig::default()
        }
        .sanitized();
        assert_eq!(cfg.cell, [1.0, 1.0]);
        assert!(cfg.band.max_px >= 2.5 * cfg.band.min_px);
        assert!(cfg.max_lines >= 2);
    }
}
