//! SEQLINE - timeline editor surface for a scriptable music sequencer.
//!
//! A pan/zoom viewport over (time x track) content composed from three
//! overlay layers: background fill, adaptive grid, position markers.
//! The sequence backend (events, tracks, timing) is an external
//! collaborator; this crate only provides the editing surface.

// Core (viewport transform, grid math, markers, events)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod paths;
pub mod theme;
pub mod widgets;

// Re-export commonly used types
pub use core::event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter};
pub use core::grid::{grid_lines, nice_step, snap, GridConfig, PixelBand};
pub use core::marker::{Marker, MarkerSet};
pub use core::view_events::{
    CursorMovedEvent, SnapToggledEvent, ViewEventEmitter, ViewportChangedEvent,
};
pub use core::viewport::{Axis, Viewport, ZoomRange};
pub use theme::Theme;
pub use widgets::editor::{timeline_editor, EditorAction, EditorConfig, TimelineEditor};
