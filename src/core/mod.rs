//! Core modules - viewport transform, grid math, markers, events.
//!
//! Everything here is independent of the UI pass: pure state plus pure
//! derivations, so the editor widget stays a thin painting shell.

pub mod event_bus;
pub mod grid;
pub mod marker;
pub mod view_events;
pub mod viewport;

// Re-exports for convenience
pub use event_bus::EventBus;
pub use marker::{Marker, MarkerSet};
pub use viewport::{Axis, Viewport, ZoomRange};
