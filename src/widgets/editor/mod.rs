//! Timeline editor widget - viewport plus ordered overlay layers.

pub mod editor;
pub mod editor_ui;
pub mod layers;

pub use editor::{EditorAction, EditorConfig, TimelineEditor};
pub use editor_ui::timeline_editor;
pub use layers::{BackgroundLayer, GridLayer, Layer, MarkerLayer};
