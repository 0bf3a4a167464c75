//! Position markers for the timeline editor - playhead, hover crosshair,
//! repeating interval markers (e.g. musical octaves).
//!
//! A Time marker paints a vertical line at a time value; a Track marker a
//! horizontal line at a track value. Labels are re-derived from the marked
//! position every time a marker is shown or moved, so they are never stale.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::viewport::Axis;

/// Cap on expanded positions for a repeating marker within one paint pass
const MAX_REPEATS: usize = 1024;

/// A single marker: a line at a content position with an attached label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub axis: Axis,
    pub position: f32,
    pub visible: bool,
    /// When set, the marker repeats at `position + n * repeat_every` for
    /// every integer n (useful for marking octaves or bars)
    pub repeat_every: Option<f32>,
    /// Custom label text (e.g. a note name); when absent the label shows
    /// the marked value
    pub text: Option<String>,
    label: String,
}

impl Marker {
    pub fn new(axis: Axis, position: f32) -> Self {
        let mut m = Self {
            axis,
            position,
            visible: true,
            repeat_every: None,
            text: None,
            label: String::new(),
        };
        m.refresh_label();
        m
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self.refresh_label();
        self
    }

    pub fn with_repeat(mut self, every: f32) -> Self {
        self.repeat_every = (every.is_finite() && every > 0.0).then_some(every);
        self
    }

    /// Current label text; refreshed on every show/move
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Move the marker and re-derive its label
    pub fn set_position(&mut self, position: f32) {
        self.position = position;
        self.refresh_label();
    }

    fn refresh_label(&mut self) {
        self.label = match &self.text {
            Some(t) => t.clone(),
            None => match self.axis {
                Axis::Time => format!("{:.2}", self.position),
                Axis::Track => format!("{:.0}", self.position),
            },
        };
    }

    /// All positions at which this marker appears inside the content
    /// `range` (expansion of `repeat_every`; bounded)
    pub fn positions_in(&self, range: (f32, f32)) -> Vec<f32> {
        let (from, to) = if range.0 <= range.1 { range } else { (range.1, range.0) };
        match self.repeat_every {
            None => {
                if self.position >= from && self.position <= to {
                    vec![self.position]
                } else {
                    Vec::new()
                }
            }
            Some(d) => {
                let mut out = Vec::new();
                let first = self.position + ((from - self.position) / d).ceil() * d;
                let mut pos = first;
                while pos <= to && out.len() < MAX_REPEATS {
                    out.push(pos);
                    pos += d;
                }
                out
            }
        }
    }
}

/// The marker population of one editor: a transient cursor marker per axis
/// (driven by pointer tracking) plus named persistent markers (playhead,
/// loop points) in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerSet {
    cursor: [Marker; 2],
    named: IndexMap<String, Marker>,
}

impl Default for MarkerSet {
    fn default() -> Self {
        let mut time = Marker::new(Axis::Time, 0.0);
        time.visible = false;
        let mut track = Marker::new(Axis::Track, 0.0);
        track.visible = false;
        Self { cursor: [time, track], named: IndexMap::new() }
    }
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the cursor marker for an axis at a content position.
    /// Hidden -> Shown; label derived from the position.
    pub fn show(&mut self, axis: Axis, position: f32) {
        let m = &mut self.cursor[axis.idx()];
        m.visible = true;
        m.set_position(position);
    }

    /// Move a Shown cursor marker. Silent no-op while Hidden: a marker
    /// must be explicitly shown before it can be updated.
    pub fn update(&mut self, axis: Axis, position: f32) {
        let m = &mut self.cursor[axis.idx()];
        if !m.visible {
            return;
        }
        m.set_position(position);
    }

    /// Hide the cursor marker for an axis (idempotent)
    pub fn hide(&mut self, axis: Axis) {
        self.cursor[axis.idx()].visible = false;
    }

    pub fn cursor(&self, axis: Axis) -> &Marker {
        &self.cursor[axis.idx()]
    }

    /// Insert or replace a named persistent marker
    pub fn insert(&mut self, name: impl Into<String>, marker: Marker) {
        self.named.insert(name.into(), marker);
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Marker> {
        self.named.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Marker> {
        self.named.shift_remove(name)
    }

    /// Named markers that should currently paint, in insertion order
    pub fn named_visible(&self) -> impl Iterator<Item = &Marker> {
        self.named.values().filter(|m| m.visible)
    }

    /// All markers that should currently paint, bottom to top: named
    /// markers in insertion order, then the cursor pair on top.
    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> {
        self.named
            .values()
            .chain(self.cursor.iter())
            .filter(|m| m.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_while_hidden_is_noop() {
        let mut set = MarkerSet::new();
        assert!(!set.cursor(Axis::Time).visible);

        set.update(Axis::Time, 50.0);
        assert!(!set.cursor(Axis::Time).visible);
        assert_eq!(set.cursor(Axis::Time).position, 0.0);
    }

    #[test]
    fn test_hide_then_update_stays_hidden() {
        let mut set = MarkerSet::new();
        set.show(Axis::Time, 10.0);
        set.hide(Axis::Time);
        set.update(Axis::Time, 99.0);
        assert!(!set.cursor(Axis::Time).visible);
        assert_eq!(set.cursor(Axis::Time).position, 10.0);
    }

    #[test]
    fn test_show_then_update_moves_and_relabels() {
        let mut set = MarkerSet::new();
        set.show(Axis::Time, 120.0);
        assert_eq!(set.cursor(Axis::Time).label(), "120.00");

        set.update(Axis::Time, 125.0);
        let m = set.cursor(Axis::Time);
        assert!(m.visible);
        assert_eq!(m.position, 125.0);
        assert_eq!(m.label(), "125.00");
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut set = MarkerSet::new();
        set.hide(Axis::Track);
        set.hide(Axis::Track);
        assert!(!set.cursor(Axis::Track).visible);
    }

    #[test]
    fn test_custom_text_overrides_value_label() {
        let m = Marker::new(Axis::Track, 12.0).with_text("C1");
        assert_eq!(m.label(), "C1");
    }

    #[test]
    fn test_repeat_expands_only_within_range() {
        let m = Marker::new(Axis::Track, 0.0).with_repeat(12.0);
        let positions = m.positions_in((-1.0, 40.0));
        assert_eq!(positions, vec![0.0, 12.0, 24.0, 36.0]);
    }

    #[test]
    fn test_repeat_anchored_to_base_position() {
        let m = Marker::new(Axis::Track, 5.0).with_repeat(12.0);
        let positions = m.positions_in((0.0, 30.0));
        assert_eq!(positions, vec![5.0, 17.0, 29.0]);
    }

    #[test]
    fn test_non_repeating_clipped_to_range() {
        let m = Marker::new(Axis::Time, 100.0);
        assert!(m.positions_in((0.0, 50.0)).is_empty());
        assert_eq!(m.positions_in((50.0, 150.0)), vec![100.0]);
    }

    #[test]
    fn test_repeat_expansion_is_bounded() {
        let m = Marker::new(Axis::Time, 0.0).with_repeat(1e-6);
        let positions = m.positions_in((0.0, 1.0));
        assert!(positions.len() <= MAX_REPEATS);
    }

    #[test]
    fn test_invalid_repeat_ignored() {
        let m = Marker::new(Axis::Time, 0.0).with_repeat(-3.0);
        assert!(m.repeat_every.is_none());
        let m = Marker::new(Axis::Time, 0.0).with_repeat(f32::NAN);
        assert!(m.repeat_every.is_none());
    }

    #[test]
    fn test_visible_markers_order_cursor_on_top() {
        let mut set = MarkerSet::new();
        set.insert("playhead", Marker::new(Axis::Time, 4.0));
        set.show(Axis::Time, 1.5);
        let labels: Vec<&str> = set.visible_markers().map(|m| m.label()).collect();
        assert_eq!(labels, vec!["4.00", "1.50"]);
    }
}
