//! Viewport state for the timeline editor - pan/zoom per content axis.
//!
//! The viewport is the single authoritative holder of the view transform.
//! Overlay layers never own it; they read it during painting. Every
//! mutation emits a `ViewportChangedEvent` synchronously before returning,
//! so subscribers observe the new state immediately.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::view_events::{ViewEventEmitter, ViewportChangedEvent};

/// Default zoom in pixels per content unit (one beat / one track row)
pub const DEFAULT_ZOOM: f32 = 32.0;

/// Content axes of the timeline. Time maps to screen X, Track to screen Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Time,
    Track,
}

impl Axis {
    /// Index into per-axis state arrays
    #[inline]
    pub fn idx(self) -> usize {
        match self {
            Axis::Time => 0,
            Axis::Track => 1,
        }
    }

    pub const BOTH: [Axis; 2] = [Axis::Time, Axis::Track];
}

/// Allowed zoom interval in pixels per content unit. Both bounds are
/// strictly positive; requests outside are clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.25, max: 512.0 }
    }
}

impl ZoomRange {
    /// Repair a range coming from config or persisted state. Non-finite
    /// or non-positive bounds fall back to defaults; inverted bounds are
    /// swapped. The result always satisfies 0 < min <= max.
    pub fn sanitized(mut self) -> Self {
        let default = Self::default();
        if !self.min.is_finite() || self.min <= 0.0 {
            self.min = default.min;
        }
        if !self.max.is_finite() || self.max <= 0.0 {
            self.max = default.max;
        }
        if self.min > self.max {
            std::mem::swap(&mut self.min, &mut self.max);
        }
        self
    }
}

fn de_zoom_range<'de, D>(d: D) -> Result<ZoomRange, D::Error>
where
    D: serde::Deserializer<'de>,
{
    ZoomRange::deserialize(d).map(ZoomRange::sanitized)
}

/// Pan/zoom transform mapping content coordinates to widget-local screen
/// pixels: `screen = (content - offset) * zoom`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Content coordinate at the left/top widget edge, per axis
    offset: [f32; 2],
    /// Pixels per content unit, per axis; always inside `zoom_range`
    zoom: [f32; 2],
    /// Always sanitized: every construction path goes through
    /// `ZoomRange::sanitized`, so the clamps below cannot see min > max
    #[serde(deserialize_with = "de_zoom_range")]
    zoom_range: ZoomRange,
    /// Visible extent in pixels (width, height); fed by the host container
    #[serde(skip)]
    visible: [f32; 2],
    #[serde(skip)]
    emitter: ViewEventEmitter,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            zoom: [DEFAULT_ZOOM, DEFAULT_ZOOM],
            zoom_range: ZoomRange::default(),
            visible: [0.0, 0.0],
            emitter: ViewEventEmitter::dummy(),
        }
    }
}

impl Viewport {
    pub fn new(zoom_range: ZoomRange) -> Self {
        let zoom_range = zoom_range.sanitized();
        let mut vp = Self { zoom_range, ..Self::default() };
        // Defaults must respect the configured range too
        for axis in Axis::BOTH {
            vp.zoom[axis.idx()] = vp.zoom[axis.idx()].clamp(zoom_range.min, zoom_range.max);
        }
        vp
    }

    /// Attach an event emitter; mutations notify through it from now on
    pub fn set_emitter(&mut self, emitter: ViewEventEmitter) {
        self.emitter = emitter;
    }

    pub fn zoom(&self, axis: Axis) -> f32 {
        self.zoom[axis.idx()]
    }

    pub fn offset(&self, axis: Axis) -> f32 {
        self.offset[axis.idx()]
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom_range
    }

    /// Visible extent in pixels along an axis (width for Time, height for Track)
    pub fn visible_extent(&self, axis: Axis) -> f32 {
        self.visible[axis.idx()]
    }

    /// Set the zoom factor, silently clamped into the configured range.
    /// Non-finite requests are ignored; this layer never errors on input.
    pub fn set_zoom(&mut self, axis: Axis, factor: f32) {
        if !factor.is_finite() {
            return;
        }
        let clamped = factor.clamp(self.zoom_range.min, self.zoom_range.max);
        if clamped != self.zoom[axis.idx()] {
            self.zoom[axis.idx()] = clamped;
            self.notify(axis);
        }
    }

    /// Multiplicative zoom keeping the content point under `anchor_screen`
    /// (widget-local pixels) stationary. Clamped like `set_zoom`.
    pub fn zoom_by(&mut self, axis: Axis, factor: f32, anchor_screen: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchored = self.to_content(axis, anchor_screen);
        let old_zoom = self.zoom[axis.idx()];
        let new_zoom = (old_zoom * factor).clamp(self.zoom_range.min, self.zoom_range.max);
        if new_zoom == old_zoom {
            return;
        }
        self.zoom[axis.idx()] = new_zoom;
        // Re-anchor: keep `anchored` at the same screen position
        self.offset[axis.idx()] = anchored - anchor_screen / new_zoom;
        debug!(
            "Zoom {:?}: {:.3} px/unit, offset {:.2}",
            axis,
            new_zoom,
            self.offset[axis.idx()]
        );
        self.notify(axis);
    }

    /// Set the pan offset. No bounds: panning past content is permitted and
    /// clipped only visually. Non-finite values are ignored.
    pub fn set_offset(&mut self, axis: Axis, value: f32) {
        if !value.is_finite() || value == self.offset[axis.idx()] {
            return;
        }
        self.offset[axis.idx()] = value;
        self.notify(axis);
    }

    /// Pan by a screen-pixel delta (positive drags content leftwards/upwards)
    pub fn pan(&mut self, axis: Axis, screen_delta: f32) {
        let z = self.zoom[axis.idx()];
        self.set_offset(axis, self.offset[axis.idx()] + screen_delta / z);
    }

    /// Update the visible extent (called by the host container each frame)
    pub fn set_visible_size(&mut self, width: f32, height: f32) {
        let new = [width.max(0.0), height.max(0.0)];
        if new != self.visible {
            self.visible = new;
            for axis in Axis::BOTH {
                self.notify(axis);
            }
        }
    }

    /// Content coordinate -> widget-local screen pixels
    #[inline]
    pub fn to_screen(&self, axis: Axis, content: f32) -> f32 {
        (content - self.offset[axis.idx()]) * self.zoom[axis.idx()]
    }

    /// Widget-local screen pixels -> content coordinate. Exact inverse of
    /// `to_screen` up to float rounding.
    #[inline]
    pub fn to_content(&self, axis: Axis, screen: f32) -> f32 {
        screen / self.zoom[axis.idx()] + self.offset[axis.idx()]
    }

    /// Content interval currently on screen along an axis
    pub fn visible_range(&self, axis: Axis) -> (f32, f32) {
        (self.to_content(axis, 0.0), self.to_content(axis, self.visible[axis.idx()]))
    }

    fn notify(&self, axis: Axis) {
        self.emitter.emit(ViewportChangedEvent {
            axis,
            zoom: self.zoom[axis.idx()],
            offset: self.offset[axis.idx()],
        });
    }
}
